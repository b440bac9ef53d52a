//! Configuration for dashboard analysis operations

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default benchmark for single-asset regression: the S&P 500 index.
pub const DEFAULT_BENCHMARK: &str = "^GSPC";

/// Configuration for the analysis engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Benchmark symbol used as the independent series in one-asset regression
    pub benchmark_symbol: String,

    /// Trailing window (trading days) for rolling volatility
    pub volatility_window: usize,

    /// Bin count for the returns-distribution histogram
    pub histogram_bins: usize,

    /// TTL for cached name/currency lookups
    pub lookup_cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            benchmark_symbol: DEFAULT_BENCHMARK.to_string(),
            volatility_window: 20,
            histogram_bins: 50,
            lookup_cache_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.benchmark_symbol.trim().is_empty() {
            return Err(EngineError::Config(
                "benchmark_symbol must not be empty".to_string(),
            ));
        }

        if self.volatility_window < 2 {
            return Err(EngineError::Config(
                "volatility_window must be at least 2".to_string(),
            ));
        }

        if self.histogram_bins == 0 {
            return Err(EngineError::Config(
                "histogram_bins must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    benchmark_symbol: Option<String>,
    volatility_window: Option<usize>,
    histogram_bins: Option<usize>,
    lookup_cache_ttl: Option<Duration>,
}

impl EngineConfigBuilder {
    /// Set the benchmark symbol
    pub fn benchmark_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.benchmark_symbol = Some(symbol.into());
        self
    }

    /// Set the rolling volatility window
    pub fn volatility_window(mut self, window: usize) -> Self {
        self.volatility_window = Some(window);
        self
    }

    /// Set the histogram bin count
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the lookup cache TTL
    pub fn lookup_cache_ttl(mut self, ttl: Duration) -> Self {
        self.lookup_cache_ttl = Some(ttl);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            benchmark_symbol: self.benchmark_symbol.unwrap_or(defaults.benchmark_symbol),
            volatility_window: self.volatility_window.unwrap_or(defaults.volatility_window),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            lookup_cache_ttl: self.lookup_cache_ttl.unwrap_or(defaults.lookup_cache_ttl),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.benchmark_symbol, "^GSPC");
        assert_eq!(config.volatility_window, 20);
        assert_eq!(config.histogram_bins, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::builder()
            .benchmark_symbol("^STOXX50E")
            .volatility_window(30)
            .build()
            .unwrap();

        assert_eq!(config.benchmark_symbol, "^STOXX50E");
        assert_eq!(config.volatility_window, 30);
        assert_eq!(config.histogram_bins, 50);
    }

    #[test]
    fn test_validation_rejects_tiny_window() {
        let config = EngineConfig {
            volatility_window: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_benchmark() {
        let config = EngineConfig {
            benchmark_symbol: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
