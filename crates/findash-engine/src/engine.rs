//! Run-analysis orchestration: validation, fetching and chart production

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::charts;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::lookup::SymbolResolver;
use crate::session::{AnalysisSession, SeriesFrame};
use crate::source::PriceSource;

/// The fixed set of analyses the dashboard offers.
///
/// A tagged enum instead of string-keyed method dispatch: unknown
/// identifiers are rejected during request validation, not at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    IndexEvolution,
    ReturnsDistribution,
    VolatilityEvolution,
    DailyReturnsEvolution,
    WeeklyReturnsEvolution,
    LinearRegression,
}

impl AnalysisKind {
    pub const ALL: [Self; 6] = [
        Self::IndexEvolution,
        Self::ReturnsDistribution,
        Self::VolatilityEvolution,
        Self::DailyReturnsEvolution,
        Self::WeeklyReturnsEvolution,
        Self::LinearRegression,
    ];

    /// Stable identifier used on the wire and the command line
    pub fn identifier(self) -> &'static str {
        match self {
            Self::IndexEvolution => "index-evolution",
            Self::ReturnsDistribution => "returns-distribution",
            Self::VolatilityEvolution => "volatility-evolution",
            Self::DailyReturnsEvolution => "daily-returns-evolution",
            Self::WeeklyReturnsEvolution => "weekly-returns-evolution",
            Self::LinearRegression => "linear-regression",
        }
    }

    /// Human-readable label for selection lists
    pub fn label(self) -> &'static str {
        match self {
            Self::IndexEvolution => "Evolution of Index Prices",
            Self::ReturnsDistribution => "Distribution of Daily Returns",
            Self::VolatilityEvolution => "Evolution of Daily Volatility",
            Self::DailyReturnsEvolution => "Evolution of Daily Returns",
            Self::WeeklyReturnsEvolution => "Weekly Returns Evolution",
            Self::LinearRegression => "Linear Regression",
        }
    }
}

impl FromStr for AnalysisKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.identifier() == s)
            .ok_or_else(|| EngineError::UnknownAnalysisKind(s.to_string()))
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Inputs supplied by the UI layer for one run.
///
/// Dates arrive as `DD.MM.YYYY` text and analysis kinds as identifiers; both
/// are parsed and validated here before anything is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbols: Vec<String>,
    pub start: String,
    pub end: String,
    pub kinds: Vec<String>,
}

/// Result of one analysis within a run: a chart, or a neutral message when
/// that specific analysis could not be computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Chart { spec: charts::ChartSpec },
    NoResult { message: String },
}

impl AnalysisOutcome {
    pub fn chart(&self) -> Option<&charts::ChartSpec> {
        match self {
            Self::Chart { spec } => Some(spec),
            Self::NoResult { .. } => None,
        }
    }
}

/// All chart outcomes of one successful run, keyed by analysis kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub charts: BTreeMap<AnalysisKind, AnalysisOutcome>,
}

#[derive(Debug)]
struct ValidatedRequest {
    symbols: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
    kinds: Vec<AnalysisKind>,
}

/// The analysis engine: owns the price source, the symbol resolver and the
/// configuration; each [`run`](Self::run) builds a fresh session.
pub struct AnalysisEngine {
    source: Arc<dyn PriceSource>,
    resolver: SymbolResolver,
    config: EngineConfig,
}

impl AnalysisEngine {
    pub fn new(
        source: Arc<dyn PriceSource>,
        resolver: SymbolResolver,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            resolver,
            config,
        })
    }

    /// Validate one request without fetching anything.
    fn validate(request: &AnalysisRequest) -> Result<ValidatedRequest> {
        let trimmed: Vec<&str> = request.symbols.iter().map(|s| s.trim()).collect();
        if trimmed.len() > 2 {
            return Err(EngineError::TooManySymbols(trimmed.len()));
        }
        if trimmed.len() == 2 && trimmed.iter().any(|s| s.is_empty()) {
            return Err(EngineError::MissingSecondSymbol);
        }
        let symbols: Vec<String> = trimmed
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if symbols.is_empty() {
            return Err(EngineError::MissingSymbols);
        }

        if request.start.trim().is_empty() || request.end.trim().is_empty() {
            return Err(EngineError::MissingDates);
        }
        let start = parse_date(&request.start)?;
        let end = parse_date(&request.end)?;
        if start >= end {
            return Err(EngineError::StartNotBeforeEnd);
        }

        if request.kinds.is_empty() {
            return Err(EngineError::NoAnalysesSelected);
        }
        let mut kinds = Vec::new();
        for raw in &request.kinds {
            let kind: AnalysisKind = raw.trim().parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        Ok(ValidatedRequest {
            symbols,
            start,
            end,
            kinds,
        })
    }

    /// Fetch one symbol into the session, recording a failure line instead
    /// of aborting so every failing symbol is reported together. An empty
    /// result and a provider error are distinct outcomes.
    async fn fetch_into(
        &self,
        session: &mut AnalysisSession,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        failures: &mut Vec<String>,
    ) {
        match self.source.fetch_daily(symbol, start, end).await {
            Ok(bars) if bars.is_empty() => {
                failures.push(format!(
                    "No data found for {symbol}. Please check ticker names and try again."
                ));
            }
            Ok(bars) => {
                tracing::debug!(symbol, rows = bars.len(), "derived series cached");
                session.insert_frame(
                    symbol,
                    SeriesFrame::from_bars(&bars, self.config.volatility_window),
                );
            }
            Err(e) => {
                failures.push(format!("Error downloading data for {symbol}: {e}"));
            }
        }
    }

    /// Run one complete analysis: validate, fetch, derive, build charts.
    ///
    /// Any per-symbol fetch failure aborts the whole run with a combined
    /// message; regression alignment problems only suppress the regression
    /// outcome.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let validated = Self::validate(request)?;
        tracing::info!(
            symbols = ?validated.symbols,
            start = %validated.start,
            end = %validated.end,
            "running analysis"
        );

        let mut session = AnalysisSession::new();
        let mut failures = Vec::new();
        for symbol in &validated.symbols {
            self.fetch_into(&mut session, symbol, validated.start, validated.end, &mut failures)
                .await;
        }
        if !failures.is_empty() {
            tracing::warn!(count = failures.len(), "aborting run after fetch failures");
            return Err(EngineError::FetchFailed(failures.join("\n")));
        }

        // The benchmark is fetched only when the regression needs it: one
        // selected symbol that is not itself the benchmark.
        let benchmark = &self.config.benchmark_symbol;
        let needs_benchmark = validated.kinds.contains(&AnalysisKind::LinearRegression)
            && validated.symbols.len() == 1
            && &validated.symbols[0] != benchmark;
        if needs_benchmark {
            self.fetch_into(&mut session, benchmark, validated.start, validated.end, &mut failures)
                .await;
            if !failures.is_empty() {
                return Err(EngineError::FetchFailed(failures.join("\n")));
            }
        }

        for symbol in &validated.symbols {
            session.select(symbol);
        }

        let mut label_symbols = validated.symbols.clone();
        if needs_benchmark {
            label_symbols.push(benchmark.clone());
        }
        for symbol in &label_symbols {
            let info = self.resolver.display_info(symbol).await;
            session.insert_label(symbol, info);
        }

        let mut report = AnalysisReport {
            charts: BTreeMap::new(),
        };
        for kind in validated.kinds {
            let outcome = match kind {
                AnalysisKind::IndexEvolution => AnalysisOutcome::Chart {
                    spec: charts::index_evolution(&session),
                },
                AnalysisKind::ReturnsDistribution => AnalysisOutcome::Chart {
                    spec: charts::returns_distribution(&session, &self.config),
                },
                AnalysisKind::VolatilityEvolution => AnalysisOutcome::Chart {
                    spec: charts::volatility_evolution(&session),
                },
                AnalysisKind::DailyReturnsEvolution => AnalysisOutcome::Chart {
                    spec: charts::daily_returns_evolution(&session),
                },
                AnalysisKind::WeeklyReturnsEvolution => AnalysisOutcome::Chart {
                    spec: charts::weekly_returns_evolution(&session),
                },
                AnalysisKind::LinearRegression => {
                    match charts::regression::linear_regression(&session, &self.config) {
                        Ok(spec) => AnalysisOutcome::Chart { spec },
                        Err(message) => {
                            tracing::warn!(%message, "regression produced no result");
                            AnalysisOutcome::NoResult { message }
                        }
                    }
                }
            };
            report.charts.insert(kind, outcome);
        }

        Ok(report)
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d.%m.%Y")
        .map_err(|_| EngineError::InvalidDate(text.trim().to_string()))
}
