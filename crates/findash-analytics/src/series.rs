//! Daily return and rolling volatility derivation

/// Daily percentage returns of a price series.
///
/// `returns[i] = prices[i] / prices[i-1] - 1` for `i >= 1`; the first
/// position has no prior observation and is `None`. Empty and single-point
/// inputs yield a same-length vector of `None` rather than an error.
pub fn daily_returns(prices: &[f64]) -> Vec<Option<f64>> {
    let mut returns = vec![None; prices.len()];
    for i in 1..prices.len() {
        returns[i] = Some(prices[i] / prices[i - 1] - 1.0);
    }
    returns
}

/// Trailing rolling volatility of a return series.
///
/// Position `i` holds the sample standard deviation of the defined returns
/// inside the trailing window `[i - window + 1, i]`, and is `None` for the
/// first `window - 1` positions. The undefined first return is skipped
/// rather than poisoning every window that contains it, so a price series of
/// exactly `window` points produces its first volatility value at index
/// `window - 1`.
pub fn rolling_volatility(returns: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut volatility = vec![None; returns.len()];
    if window < 2 {
        return volatility;
    }
    for i in (window - 1)..returns.len() {
        let observed: Vec<f64> = returns[i + 1 - window..=i].iter().flatten().copied().collect();
        volatility[i] = sample_stddev(&observed);
    }
    volatility
}

/// Sample standard deviation (ddof = 1). `None` for fewer than 2 values.
fn sample_stddev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (n - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_daily_returns_basic() {
        let returns = daily_returns(&[100.0, 102.0, 51.0]);
        assert_eq!(returns[0], None);
        assert!((returns[1].unwrap() - 0.02).abs() < TOLERANCE);
        assert!((returns[2].unwrap() + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_daily_returns_degenerate_inputs() {
        assert!(daily_returns(&[]).is_empty());
        assert_eq!(daily_returns(&[100.0]), vec![None]);
    }

    #[test]
    fn test_constant_price_zero_returns_and_volatility() {
        let prices = vec![42.0; 60];
        let returns = daily_returns(&prices);
        assert!(returns[1..].iter().all(|r| r.unwrap().abs() < TOLERANCE));

        let volatility = rolling_volatility(&returns, 20);
        for (i, v) in volatility.iter().enumerate() {
            if i < 19 {
                assert_eq!(*v, None);
            } else {
                assert!(v.unwrap().abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_return_price_round_trip() {
        let prices = vec![100.0, 103.5, 99.2, 120.0, 119.9];
        let returns = daily_returns(&prices);
        for i in 1..prices.len() {
            let rebuilt = prices[i - 1] * (1.0 + returns[i].unwrap());
            assert!((rebuilt - prices[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rolling_volatility_window_boundary() {
        // 20 prices: first defined volatility lands exactly at index 19,
        // computed over the 19 defined returns in the window.
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i)).collect();
        let volatility = rolling_volatility(&daily_returns(&prices), 20);
        assert!(volatility[..19].iter().all(Option::is_none));
        let v = volatility[19].unwrap();
        assert!(v > 0.0 && v < 1e-3);
    }

    #[test]
    fn test_rolling_volatility_matches_sample_stddev() {
        let returns: Vec<Option<f64>> = [0.01, 0.03, -0.02, 0.02].iter().map(|&r| Some(r)).collect();
        let volatility = rolling_volatility(&returns, 3);
        assert_eq!(volatility[0], None);
        assert_eq!(volatility[1], None);
        // stddev([0.01, 0.03, -0.02]) with ddof 1
        let expected = (((0.01_f64 - 0.004).powi(2) + (0.03_f64 - 0.004).powi(2) + (-0.02_f64 - 0.004).powi(2)) / 2.0).sqrt();
        assert!((volatility[2].unwrap() - expected).abs() < TOLERANCE);
    }

    #[test]
    fn test_sample_stddev_needs_two_values() {
        assert_eq!(sample_stddev(&[]), None);
        assert_eq!(sample_stddev(&[0.5]), None);
        assert!(sample_stddev(&[0.5, 0.5]).unwrap().abs() < TOLERANCE);
    }
}
