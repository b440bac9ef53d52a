//! Per-run analysis session and derived series cache

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use findash_analytics::{daily_returns, rolling_volatility};

use crate::lookup::DisplayInfo;
use crate::source::DailyBar;

/// Derived series for one symbol: aligned date, price, daily return and
/// rolling volatility vectors. `None` marks positions where a statistic is
/// undefined (the first return, the volatility warm-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub daily_returns: Vec<Option<f64>>,
    pub daily_volatility: Vec<Option<f64>>,
}

impl SeriesFrame {
    /// Derive the full frame from fetched daily bars.
    pub fn from_bars(bars: &[DailyBar], volatility_window: usize) -> Self {
        let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
        let prices: Vec<f64> = bars.iter().map(|b| b.adjclose).collect();
        let returns = daily_returns(&prices);
        let volatility = rolling_volatility(&returns, volatility_window);
        Self {
            dates,
            prices,
            daily_returns: returns,
            daily_volatility: volatility,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The mutable state of one analysis run.
///
/// Rebuilt from scratch on every run: the selected symbols (1 or 2, all with
/// a cached frame), the series cache (which may additionally hold the
/// benchmark frame for regression), and resolved display labels. Chart
/// builders only read it.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    selected: Vec<String>,
    series: HashMap<String, SeriesFrame>,
    labels: HashMap<String, DisplayInfo>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache a derived frame for a symbol
    pub fn insert_frame(&mut self, symbol: impl Into<String>, frame: SeriesFrame) {
        self.series.insert(symbol.into(), frame);
    }

    /// Mark a symbol as selected. The caller must have cached its frame.
    pub fn select(&mut self, symbol: impl Into<String>) {
        self.selected.push(symbol.into());
    }

    /// Store resolved labels for a symbol
    pub fn insert_label(&mut self, symbol: impl Into<String>, info: DisplayInfo) {
        self.labels.insert(symbol.into(), info);
    }

    /// Selected symbols, in selection order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Cached frame for a symbol, if any
    pub fn frame(&self, symbol: &str) -> Option<&SeriesFrame> {
        self.series.get(symbol)
    }

    /// Display name for a symbol, raw symbol when no label was resolved
    pub fn display_name(&self, symbol: &str) -> String {
        self.labels
            .get(symbol)
            .map_or_else(|| symbol.to_string(), |info| info.name.clone())
    }

    /// Resolved currency for a symbol, if any
    pub fn currency(&self, symbol: &str) -> Option<&str> {
        self.labels
            .get(symbol)
            .and_then(|info| info.currency.as_deref())
    }

    /// Display names of the selected symbols, for title composition
    pub fn selected_names(&self) -> Vec<String> {
        self.selected.iter().map(|s| self.display_name(s)).collect()
    }
}
