//! Time-series statistics for the findash analysis engine
//!
//! Pure functions over date-indexed price and return series:
//!
//! - Daily percentage returns and trailing rolling volatility
//! - Calendar-week resampling and weekly returns
//! - Inner-join alignment of two date-indexed series
//! - Closed-form ordinary least squares (degree-1 fit)
//!
//! All derived series use `Option<f64>` for positions where the statistic is
//! undefined (the first return, the warm-up of a rolling window) instead of
//! NaN sentinels, so downstream chart builders can render gaps explicitly.

pub mod regression;
pub mod series;
pub mod weekly;

pub use regression::{LinearFit, align, ols};
pub use series::{daily_returns, rolling_volatility};
pub use weekly::{weekly_prices, weekly_returns};
