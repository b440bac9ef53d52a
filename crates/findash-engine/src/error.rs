//! Error types for dashboard analysis operations

use thiserror::Error;

/// Analysis engine errors.
///
/// Every variant is a user-visible message; nothing here is fatal to the
/// process. Regression alignment problems are deliberately *not* errors -
/// they surface as [`crate::engine::AnalysisOutcome::NoResult`] so the other
/// selected analyses still render.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No ticker supplied
    #[error("Please provide at least one ticker.")]
    MissingSymbols,

    /// Two-asset mode with a blank ticker
    #[error("Please provide both tickers when two assets are selected.")]
    MissingSecondSymbol,

    /// More symbols than the dashboard supports
    #[error("At most two tickers are supported, got {0}")]
    TooManySymbols(usize),

    /// A date field was left empty
    #[error("Please ensure all date fields are filled out.")]
    MissingDates,

    /// Date text did not parse
    #[error("Invalid date '{0}'. Please use DD.MM.YYYY.")]
    InvalidDate(String),

    /// Reversed or empty date range
    #[error("Start date must be before end date.")]
    StartNotBeforeEnd,

    /// Analysis identifier outside the fixed set
    #[error("Unknown analysis kind: {0}")]
    UnknownAnalysisKind(String),

    /// No analysis selected for the run
    #[error("Please select at least one analysis.")]
    NoAnalysesSelected,

    /// Combined per-symbol fetch failures; the run is aborted as a whole
    #[error("{0}")]
    FetchFailed(String),

    /// Data source rejected or could not serve a symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EngineError::StartNotBeforeEnd.to_string(),
            "Start date must be before end date."
        );

        let err = EngineError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "no rows in range".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for AAPL: no rows in range");
    }

    #[test]
    fn test_fetch_failed_carries_combined_message() {
        let err = EngineError::FetchFailed("No data found for XXX.\nNo data found for YYY.".to_string());
        let text = err.to_string();
        assert!(text.contains("XXX"));
        assert!(text.contains("YYY"));
    }
}
