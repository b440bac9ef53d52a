//! Analysis engine for the findash dashboard
//!
//! The engine turns raw daily price history for one or two instruments into
//! interactive-chart specifications:
//!
//! - Fetches adjusted-close history through a [`source::PriceSource`]
//!   (Yahoo Finance in production, a mock in tests)
//! - Derives daily returns, rolling volatility and weekly returns per symbol
//!   into a per-run series cache
//! - Builds five chart views plus a single-factor OLS regression
//!   (CAPM-style beta) against a configurable benchmark index
//! - Validates all UI inputs (`DD.MM.YYYY` date range, 1-2 tickers, analysis
//!   identifiers) before any fetch happens
//!
//! The UI layer and the rendering backend are external: this crate only
//! produces serde-serializable [`charts::ChartSpec`] values and user-visible
//! error messages, never widgets.
//!
//! # Example
//!
//! ```rust,ignore
//! use findash_engine::config::EngineConfig;
//! use findash_engine::engine::{AnalysisEngine, AnalysisRequest};
//! use findash_engine::lookup::{SymbolDirectory, SymbolResolver};
//! use findash_engine::source::YahooSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::default();
//!     let yahoo = Arc::new(YahooSource::new());
//!     let resolver = SymbolResolver::new(
//!         SymbolDirectory::from_csv_path("companies.csv")?,
//!         yahoo.clone(),
//!         config.lookup_cache_ttl,
//!     );
//!     let engine = AnalysisEngine::new(yahoo, resolver, config)?;
//!
//!     let report = engine
//!         .run(&AnalysisRequest {
//!             symbols: vec!["AAPL".into()],
//!             start: "01.01.2024".into(),
//!             end: "30.06.2024".into(),
//!             kinds: vec!["index-evolution".into(), "linear-regression".into()],
//!         })
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod session;
pub mod source;

// Re-export main types for convenience
pub use charts::{Annotation, ChartSpec, Trace};
pub use config::EngineConfig;
pub use engine::{AnalysisEngine, AnalysisKind, AnalysisOutcome, AnalysisReport, AnalysisRequest};
pub use error::{EngineError, Result};
pub use lookup::{DisplayInfo, SymbolDirectory, SymbolResolver};
pub use session::{AnalysisSession, SeriesFrame};
pub use source::{DailyBar, PriceSource, SymbolInfoSource, YahooSource};
