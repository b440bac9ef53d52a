//! Date alignment and ordinary least squares

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fitted degree-1 least-squares line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Inner join of two date-indexed series.
///
/// Restricts both series to their common dates and drops any row where
/// either value is undefined. Both inputs must be sorted by strictly
/// increasing date. Returns `(x, y)` pairs in date order.
pub fn align(
    x_dates: &[NaiveDate],
    x_values: &[Option<f64>],
    y_dates: &[NaiveDate],
    y_values: &[Option<f64>],
) -> Vec<(f64, f64)> {
    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < x_dates.len() && j < y_dates.len() {
        match x_dates[i].cmp(&y_dates[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if let (Some(x), Some(y)) = (x_values[i], y_values[j]) {
                    pairs.push((x, y));
                }
                i += 1;
                j += 1;
            }
        }
    }
    pairs
}

/// Closed-form ordinary least squares over `(x, y)` pairs.
///
/// Degree-1 fit via the normal equations, no robustness handling. `None`
/// when fewer than two points remain or the x-values carry no variance.
pub fn ols(pairs: &[(f64, f64)]) -> Option<LinearFit> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n_f;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n_f;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    for &(x, y) in pairs {
        cov_xy += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
    }
    if var_x == 0.0 {
        return None;
    }

    let slope = cov_xy / var_x;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
