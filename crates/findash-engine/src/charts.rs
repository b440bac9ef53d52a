//! Chart specifications and the five dashboard chart builders
//!
//! Builders are stateless functions over a read-only [`AnalysisSession`];
//! they return renderer-agnostic [`ChartSpec`] values the UI layer turns
//! into actual figures. A symbol without usable data simply contributes no
//! trace - never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use findash_analytics::weekly_returns;

use crate::config::EngineConfig;
use crate::session::AnalysisSession;

pub mod regression;

/// Opacity for overlaid histograms
const HISTOGRAM_OPACITY: f64 = 0.5;

/// A renderer-agnostic chart description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

/// One named trace of a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    /// Date-indexed line; `None` values render as gaps.
    Line {
        name: String,
        dates: Vec<NaiveDate>,
        values: Vec<Option<f64>>,
    },
    /// Probability-normalized histogram over raw values.
    Histogram {
        name: String,
        values: Vec<f64>,
        bins: usize,
        opacity: f64,
        normalized: bool,
    },
    /// Scatter of x/y point pairs.
    Scatter {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
    },
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Line { name, .. } | Trace::Histogram { name, .. } | Trace::Scatter { name, .. } => name,
        }
    }
}

/// A text annotation anchored at a data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Shared title rule: the verb phrase alone for zero symbols, otherwise
/// "`<verb phrase> for <name>[ and <name>]`".
fn compose_title(verb_phrase: &str, names: &[String]) -> String {
    if names.is_empty() {
        verb_phrase.to_string()
    } else {
        format!("{verb_phrase} for {}", names.join(" and "))
    }
}

/// Price evolution: one line trace of adjusted close per selected symbol.
/// Trace names carry the resolved currency when one is known.
pub fn index_evolution(session: &AnalysisSession) -> ChartSpec {
    let traces = session
        .selected()
        .iter()
        .filter_map(|symbol| {
            let frame = session.frame(symbol)?;
            let name = match session.currency(symbol) {
                Some(currency) => format!("{} Prices ({currency})", session.display_name(symbol)),
                None => format!("{} Prices", session.display_name(symbol)),
            };
            Some(Trace::Line {
                name,
                dates: frame.dates.clone(),
                values: frame.prices.iter().copied().map(Some).collect(),
            })
        })
        .collect();

    ChartSpec {
        title: compose_title("Evolution of Index Prices", &session.selected_names()),
        x_label: "Date".to_string(),
        y_label: "Adjusted Close Price".to_string(),
        traces,
        annotation: None,
    }
}

/// Returns distribution: overlaid probability-normalized histograms of the
/// defined daily returns.
pub fn returns_distribution(session: &AnalysisSession, config: &EngineConfig) -> ChartSpec {
    let traces = session
        .selected()
        .iter()
        .filter_map(|symbol| {
            let frame = session.frame(symbol)?;
            Some(Trace::Histogram {
                name: session.display_name(symbol),
                values: frame.daily_returns.iter().flatten().copied().collect(),
                bins: config.histogram_bins,
                opacity: HISTOGRAM_OPACITY,
                normalized: true,
            })
        })
        .collect();

    ChartSpec {
        title: compose_title("Distribution of Daily Returns", &session.selected_names()),
        x_label: "Daily Returns".to_string(),
        y_label: "Probability".to_string(),
        traces,
        annotation: None,
    }
}

/// Volatility evolution: rolling volatility lines with the warm-up dropped.
pub fn volatility_evolution(session: &AnalysisSession) -> ChartSpec {
    let traces = session
        .selected()
        .iter()
        .filter_map(|symbol| {
            let frame = session.frame(symbol)?;
            let (dates, values): (Vec<NaiveDate>, Vec<Option<f64>>) = frame
                .dates
                .iter()
                .zip(&frame.daily_volatility)
                .filter_map(|(&date, &v)| v.map(|v| (date, Some(v))))
                .unzip();
            Some(Trace::Line {
                name: format!("{} Volatility", session.display_name(symbol)),
                dates,
                values,
            })
        })
        .collect();

    ChartSpec {
        title: compose_title("Evolution of Daily Volatility", &session.selected_names()),
        x_label: "Date".to_string(),
        y_label: "Volatility".to_string(),
        traces,
        annotation: None,
    }
}

/// Daily returns evolution: returns vs date, the undefined first value kept
/// as a gap rather than dropped.
pub fn daily_returns_evolution(session: &AnalysisSession) -> ChartSpec {
    let traces = session
        .selected()
        .iter()
        .filter_map(|symbol| {
            let frame = session.frame(symbol)?;
            Some(Trace::Line {
                name: format!("{} Daily Returns", session.display_name(symbol)),
                dates: frame.dates.clone(),
                values: frame.daily_returns.clone(),
            })
        })
        .collect();

    ChartSpec {
        title: compose_title("Evolution of Daily Returns", &session.selected_names()),
        x_label: "Date".to_string(),
        y_label: "Daily Returns".to_string(),
        traces,
        annotation: None,
    }
}

/// Weekly returns evolution: percentage change of week-end prices, plotted
/// against the week-ending date; the first week has no return.
pub fn weekly_returns_evolution(session: &AnalysisSession) -> ChartSpec {
    let traces = session
        .selected()
        .iter()
        .filter_map(|symbol| {
            let frame = session.frame(symbol)?;
            let weekly = weekly_returns(&frame.dates, &frame.prices);
            let (dates, values): (Vec<NaiveDate>, Vec<Option<f64>>) =
                weekly.into_iter().map(|(date, r)| (date, Some(r))).unzip();
            Some(Trace::Line {
                name: format!("{} Weekly Returns", session.display_name(symbol)),
                dates,
                values,
            })
        })
        .collect();

    ChartSpec {
        title: compose_title("Weekly Returns Evolution", &session.selected_names()),
        x_label: "Date".to_string(),
        y_label: "Weekly Returns".to_string(),
        traces,
        annotation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::DisplayInfo;
    use crate::session::SeriesFrame;
    use crate::source::DailyBar;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn session_with(symbols: &[(&str, Vec<f64>)]) -> AnalysisSession {
        let mut session = AnalysisSession::new();
        for (symbol, prices) in symbols {
            let bars: Vec<DailyBar> = prices
                .iter()
                .enumerate()
                .map(|(i, &p)| DailyBar {
                    date: date(1 + u32::try_from(i).unwrap()),
                    adjclose: p,
                })
                .collect();
            session.insert_frame(*symbol, SeriesFrame::from_bars(&bars, 20));
            session.select(*symbol);
        }
        session
    }

    #[test]
    fn test_title_composition() {
        assert_eq!(compose_title("Evolution of Index Prices", &[]), "Evolution of Index Prices");
        assert_eq!(
            compose_title("Evolution of Index Prices", &["Apple Inc.".to_string()]),
            "Evolution of Index Prices for Apple Inc."
        );
        assert_eq!(
            compose_title(
                "Evolution of Index Prices",
                &["Apple Inc.".to_string(), "S&P 500".to_string()]
            ),
            "Evolution of Index Prices for Apple Inc. and S&P 500"
        );
    }

    #[test]
    fn test_index_evolution_currency_in_trace_name() {
        let mut session = session_with(&[("AAA", vec![1.0, 2.0, 3.0])]);
        session.insert_label(
            "AAA",
            DisplayInfo {
                name: "Alpha Corp".to_string(),
                currency: Some("CHF".to_string()),
            },
        );

        let spec = index_evolution(&session);
        assert_eq!(spec.traces.len(), 1);
        assert_eq!(spec.traces[0].name(), "Alpha Corp Prices (CHF)");
        assert_eq!(spec.title, "Evolution of Index Prices for Alpha Corp");
    }

    #[test]
    fn test_index_evolution_currency_omitted_on_lookup_failure() {
        let session = session_with(&[("AAA", vec![1.0, 2.0])]);
        let spec = index_evolution(&session);
        assert_eq!(spec.traces[0].name(), "AAA Prices");
    }

    #[test]
    fn test_returns_distribution_drops_undefined() {
        let session = session_with(&[("AAA", vec![100.0, 101.0, 102.0])]);
        let spec = returns_distribution(&session, &EngineConfig::default());
        match &spec.traces[0] {
            Trace::Histogram { values, bins, normalized, .. } => {
                // 3 prices, first return undefined
                assert_eq!(values.len(), 2);
                assert_eq!(*bins, 50);
                assert!(*normalized);
            }
            other => panic!("expected histogram, got {other:?}"),
        }
    }

    #[test]
    fn test_daily_returns_keeps_leading_gap() {
        let session = session_with(&[("AAA", vec![100.0, 101.0])]);
        let spec = daily_returns_evolution(&session);
        match &spec.traces[0] {
            Trace::Line { values, .. } => {
                assert_eq!(values.len(), 2);
                assert_eq!(values[0], None);
                assert!(values[1].is_some());
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_volatility_evolution_drops_warmup() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let session = session_with(&[("AAA", prices)]);
        let spec = volatility_evolution(&session);
        match &spec.traces[0] {
            Trace::Line { dates, values, .. } => {
                // 30 points, volatility defined from index 19
                assert_eq!(dates.len(), 11);
                assert!(values.iter().all(Option::is_some));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_weekly_returns_trace() {
        // Mon-Fri for two weeks
        let mut session = AnalysisSession::new();
        let bars: Vec<DailyBar> = (1..=5)
            .chain(8..=12)
            .enumerate()
            .map(|(i, d)| DailyBar {
                date: date(d),
                adjclose: 100.0 + i as f64,
            })
            .collect();
        session.insert_frame("AAA", SeriesFrame::from_bars(&bars, 20));
        session.select("AAA");

        let spec = weekly_returns_evolution(&session);
        match &spec.traces[0] {
            Trace::Line { dates, values, .. } => {
                assert_eq!(dates, &[date(14)]);
                assert_eq!(values.len(), 1);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_single_point_symbol_renders_no_derived_traces() {
        let session = session_with(&[("AAA", vec![100.0])]);

        let spec = volatility_evolution(&session);
        match &spec.traces[0] {
            Trace::Line { dates, .. } => assert!(dates.is_empty()),
            other => panic!("expected line, got {other:?}"),
        }

        let spec = weekly_returns_evolution(&session);
        match &spec.traces[0] {
            Trace::Line { dates, .. } => assert!(dates.is_empty()),
            other => panic!("expected line, got {other:?}"),
        }
    }
}
