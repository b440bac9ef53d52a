//! Yahoo Finance implementation of the data source traits

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use crate::error::{EngineError, Result};

use super::{DailyBar, PriceSource, SymbolInfoSource};

/// Yahoo Finance price and metadata source
pub struct YahooSource {}

impl YahooSource {
    /// Create a new Yahoo Finance source
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| EngineError::YahooFinance(e.to_string()))
    }

    fn to_offset(date: NaiveDate) -> Result<OffsetDateTime> {
        let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(|e| EngineError::YahooFinance(format!("invalid timestamp for {date}: {e}")))
    }
}

#[async_trait]
impl PriceSource for YahooSource {
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let provider = Self::connector()?;

        let response = provider
            .get_quote_history(symbol, Self::to_offset(start)?, Self::to_offset(end)?)
            .await
            .map_err(|e| EngineError::YahooFinance(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| EngineError::YahooFinance(e.to_string()))?;

        let mut bars: Vec<DailyBar> = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let Some(timestamp) = DateTime::from_timestamp(quote.timestamp as i64, 0) else {
                continue;
            };
            if quote.adjclose <= 0.0 {
                return Err(EngineError::DataUnavailable {
                    symbol: symbol.to_string(),
                    reason: "non-positive adjusted close price".to_string(),
                });
            }
            let date = timestamp.date_naive();
            // Yahoo occasionally repeats the last trading day; keep the
            // final row so dates stay strictly increasing.
            match bars.last_mut() {
                Some(last) if last.date == date => last.adjclose = quote.adjclose,
                _ => bars.push(DailyBar {
                    date,
                    adjclose: quote.adjclose,
                }),
            }
        }

        tracing::debug!(symbol, rows = bars.len(), "fetched daily history");
        Ok(bars)
    }
}

#[async_trait]
impl SymbolInfoSource for YahooSource {
    async fn resolve_name(&self, symbol: &str) -> Result<String> {
        let provider = Self::connector()?;

        let search = provider
            .search_ticker(symbol)
            .await
            .map_err(|e| EngineError::YahooFinance(e.to_string()))?;

        let hit = search
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .or_else(|| search.quotes.first())
            .ok_or_else(|| EngineError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no search results".to_string(),
            })?;

        let name = if hit.long_name.is_empty() {
            &hit.short_name
        } else {
            &hit.long_name
        };
        if name.is_empty() {
            return Err(EngineError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "search result has no name".to_string(),
            });
        }
        Ok(name.clone())
    }

    async fn resolve_currency(&self, symbol: &str) -> Result<String> {
        let provider = Self::connector()?;

        let response = provider
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| EngineError::YahooFinance(e.to_string()))?;

        let metadata = response
            .metadata()
            .map_err(|e| EngineError::YahooFinance(e.to_string()))?;

        metadata.currency.ok_or_else(|| EngineError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no currency in quote metadata".to_string(),
        })
    }
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new()
    }
}
