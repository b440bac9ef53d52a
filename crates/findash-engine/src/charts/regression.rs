//! Single-factor linear regression view (CAPM-style beta)

use findash_analytics::{align, ols};

use crate::config::EngineConfig;
use crate::session::AnalysisSession;

use super::{Annotation, ChartSpec, Trace};

/// Dependent (y) and independent (x) symbols for one regression run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegressionPair {
    y_symbol: String,
    x_symbol: String,
}

/// Decide the regression pair from the selected symbol set.
///
/// One symbol: regress it on the configured benchmark. When the selected
/// symbol *is* the benchmark the series is regressed on itself and beta is
/// 1 by construction; the chart is still rendered.
///
/// Two symbols: regress the first's returns on the second's.
fn regression_pair(session: &AnalysisSession, config: &EngineConfig) -> Option<RegressionPair> {
    match session.selected() {
        [only] => Some(RegressionPair {
            y_symbol: only.clone(),
            x_symbol: if only == &config.benchmark_symbol {
                only.clone()
            } else {
                config.benchmark_symbol.clone()
            },
        }),
        [first, second] => Some(RegressionPair {
            y_symbol: first.clone(),
            x_symbol: second.clone(),
        }),
        _ => None,
    }
}

/// Build the regression chart, or a no-result message when the two series
/// cannot be aligned. Alignment problems only suppress this one analysis;
/// they never abort the run.
pub fn linear_regression(
    session: &AnalysisSession,
    config: &EngineConfig,
) -> std::result::Result<ChartSpec, String> {
    let pair = regression_pair(session, config)
        .ok_or_else(|| "Select one or two assets to run a regression.".to_string())?;

    let y_frame = session
        .frame(&pair.y_symbol)
        .ok_or_else(|| format!("No data cached for {}", pair.y_symbol))?;
    let x_frame = session
        .frame(&pair.x_symbol)
        .ok_or_else(|| format!("No data cached for {}", pair.x_symbol))?;

    let points = align(
        &x_frame.dates,
        &x_frame.daily_returns,
        &y_frame.dates,
        &y_frame.daily_returns,
    );
    if points.is_empty() {
        return Err("No overlapping dates between the two return series.".to_string());
    }

    let Some(fit) = ols(&points) else {
        return Err("Regression is undefined for the aligned returns.".to_string());
    };

    let (x_values, y_values): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    let fitted: Vec<f64> = x_values.iter().map(|&x| fit.predict(x)).collect();

    // Beta label anchored at the maximum-x, maximum-y corner of the scatter
    let max_x = x_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_y = y_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let y_name = session.display_name(&pair.y_symbol);
    let x_name = session.display_name(&pair.x_symbol);
    let title = if pair.y_symbol == pair.x_symbol {
        format!("Linear Regression: {y_name} on itself")
    } else {
        format!("Linear Regression: {y_name} on {x_name}")
    };

    Ok(ChartSpec {
        title,
        x_label: format!("{x_name} Returns"),
        y_label: format!("{y_name} Returns"),
        traces: vec![
            Trace::Scatter {
                name: y_name,
                x: x_values.clone(),
                y: y_values,
            },
            Trace::Scatter {
                name: "Regression Line".to_string(),
                x: x_values,
                y: fitted,
            },
        ],
        annotation: Some(Annotation {
            x: max_x,
            y: max_y,
            text: format!("Beta: {:.2}", fit.slope),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SeriesFrame;
    use crate::source::DailyBar;
    use chrono::NaiveDate;

    const TOLERANCE: f64 = 1e-9;

    fn bars(prices: &[f64]) -> Vec<DailyBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(u64::try_from(i).unwrap()),
                adjclose: p,
            })
            .collect()
    }

    fn session_of(entries: &[(&str, &[f64])], selected: &[&str]) -> AnalysisSession {
        let mut session = AnalysisSession::new();
        for (symbol, prices) in entries {
            session.insert_frame(*symbol, SeriesFrame::from_bars(&bars(prices), 20));
        }
        for symbol in selected {
            session.select(*symbol);
        }
        session
    }

    fn beta_of(spec: &ChartSpec) -> f64 {
        let text = &spec.annotation.as_ref().unwrap().text;
        text.strip_prefix("Beta: ").unwrap().parse().unwrap()
    }

    #[test]
    fn test_benchmark_regressed_on_itself() {
        let prices = [100.0, 101.0, 99.5, 102.0, 103.0];
        let session = session_of(&[("^GSPC", &prices)], &["^GSPC"]);
        let spec = linear_regression(&session, &EngineConfig::default()).unwrap();

        assert!((beta_of(&spec) - 1.0).abs() < 1e-6);
        assert_eq!(spec.title, "Linear Regression: ^GSPC on itself");
    }

    #[test]
    fn test_one_symbol_regressed_on_benchmark() {
        // AAA returns are exactly 2x the benchmark returns
        let bench = [100.0, 101.0, 100.0, 102.0, 101.0];
        let asset: Vec<f64> = {
            let mut p = vec![50.0];
            for w in bench.windows(2) {
                let r = w[1] / w[0] - 1.0;
                let last = *p.last().unwrap();
                p.push(last * (1.0 + 2.0 * r));
            }
            p
        };
        let session = session_of(&[("AAA", &asset), ("^GSPC", &bench)], &["AAA"]);
        let spec = linear_regression(&session, &EngineConfig::default()).unwrap();

        assert!((beta_of(&spec) - 2.0).abs() < 1e-6);
        assert_eq!(spec.x_label, "^GSPC Returns");
        assert_eq!(spec.y_label, "AAA Returns");
        assert_eq!(spec.traces.len(), 2);
    }

    #[test]
    fn test_two_symbol_mode_ignores_benchmark() {
        let a = [100.0, 102.0, 101.0, 104.0];
        let b = [200.0, 202.0, 201.0, 205.0];
        let session = session_of(&[("AAA", &a), ("BBB", &b)], &["AAA", "BBB"]);
        let spec = linear_regression(&session, &EngineConfig::default()).unwrap();

        assert_eq!(spec.title, "Linear Regression: AAA on BBB");
        assert_eq!(spec.x_label, "BBB Returns");
    }

    #[test]
    fn test_fitted_line_spans_scatter() {
        let a = [100.0, 102.0, 101.0, 104.0, 103.0];
        let b = [50.0, 50.5, 50.2, 51.0, 50.8];
        let session = session_of(&[("AAA", &a), ("BBB", &b)], &["AAA", "BBB"]);
        let spec = linear_regression(&session, &EngineConfig::default()).unwrap();

        let (Trace::Scatter { x: sx, .. }, Trace::Scatter { x: lx, y: ly, .. }) =
            (&spec.traces[0], &spec.traces[1])
        else {
            panic!("expected two scatter traces");
        };
        assert_eq!(sx, lx);
        assert_eq!(ly.len(), lx.len());
        // fitted values follow the line equation
        for (x, y) in lx.iter().zip(ly) {
            let along = ly[0] + (x - lx[0]) * (ly[ly.len() - 1] - ly[0]) / (lx[lx.len() - 1] - lx[0]);
            assert!((y - along).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_no_overlapping_dates_is_no_result() {
        let mut session = AnalysisSession::new();
        let early = bars(&[100.0, 101.0, 102.0]);
        let late: Vec<DailyBar> = bars(&[10.0, 11.0, 12.0])
            .into_iter()
            .map(|b| DailyBar {
                date: b.date + chrono::Days::new(30),
                adjclose: b.adjclose,
            })
            .collect();
        session.insert_frame("AAA", SeriesFrame::from_bars(&early, 20));
        session.insert_frame("BBB", SeriesFrame::from_bars(&late, 20));
        session.select("AAA");
        session.select("BBB");

        let result = linear_regression(&session, &EngineConfig::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("No overlapping dates"));
    }

    #[test]
    fn test_missing_benchmark_frame_is_no_result() {
        let session = session_of(&[("AAA", &[100.0, 101.0, 102.0])], &["AAA"]);
        let result = linear_regression(&session, &EngineConfig::default());
        assert!(result.is_err());
    }
}
