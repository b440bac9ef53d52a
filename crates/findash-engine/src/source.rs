//! Data source traits for price history and symbol metadata
//!
//! The engine talks to its providers through these traits only; the concrete
//! Yahoo Finance implementation lives in [`yahoo`]. Tests substitute a
//! `mockall` mock for [`PriceSource`].

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod yahoo;

pub use yahoo::YahooSource;

/// One trading day of adjusted-close price data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub adjclose: f64,
}

/// Provider of daily historical price series.
///
/// An `Ok` empty vector means the provider had no rows for the range (a
/// distinct outcome from a transport or provider error); callers handle the
/// two separately. Implementations must reject zero or negative prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>>;
}

/// Provider of human-readable symbol metadata.
///
/// Both lookups may fail; callers degrade gracefully (raw symbol as the
/// display name, currency omitted) and never surface these failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolInfoSource: Send + Sync {
    /// Company or index name for a symbol.
    async fn resolve_name(&self, symbol: &str) -> Result<String>;

    /// ISO currency code the symbol's prices are quoted in.
    async fn resolve_currency(&self, symbol: &str) -> Result<String>;
}
