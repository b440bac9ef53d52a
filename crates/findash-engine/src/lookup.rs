//! Symbol directory and display-name/currency resolution
//!
//! The directory is an immutable map loaded once at startup from the
//! pre-supplied `ticker,company name` CSV; runtime additions go through the
//! explicit [`SymbolDirectory::register`] call. Remote lookups sit behind a
//! timed cache so repeated chart builds do not refetch metadata.

use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::source::SymbolInfoSource;

/// Resolved labels for a symbol, used in chart titles and trace names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// Human-readable company or index name; falls back to the raw symbol.
    pub name: String,
    /// ISO currency code, omitted when resolution failed.
    pub currency: Option<String>,
}

/// Static symbol-to-company-name table.
#[derive(Debug, Clone, Default)]
pub struct SymbolDirectory {
    names: HashMap<String, String>,
}

impl SymbolDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `ticker,company name` CSV body.
    ///
    /// A `ticker,...` header line and blank lines are tolerated; the company
    /// name may itself contain commas (only the first comma splits).
    pub fn from_csv_str(data: &str) -> Result<Self> {
        let mut names = HashMap::new();
        for (line_no, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (ticker, name) = line.split_once(',').ok_or_else(|| {
                EngineError::Config(format!("symbol table line {} has no comma", line_no + 1))
            })?;
            let (ticker, name) = (ticker.trim(), name.trim().trim_matches('"'));
            if line_no == 0 && ticker.eq_ignore_ascii_case("ticker") {
                continue;
            }
            if ticker.is_empty() || name.is_empty() {
                continue;
            }
            names.insert(ticker.to_string(), name.to_string());
        }
        Ok(Self { names })
    }

    /// Load the directory from a CSV file path
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::Config(format!(
                "cannot read symbol table {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_csv_str(&data)
    }

    /// Explicitly register an additional symbol
    pub fn register(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        self.names.insert(symbol.into(), name.into());
    }

    /// Company name for a symbol, if the directory knows it
    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LookupKey {
    symbol: String,
    field: &'static str,
}

/// Name and currency resolution over the directory plus a remote source.
pub struct SymbolResolver {
    directory: SymbolDirectory,
    remote: Arc<dyn SymbolInfoSource>,
    cache: Arc<RwLock<TimedCache<LookupKey, String>>>,
}

impl SymbolResolver {
    /// Create a resolver with the given lookup cache TTL
    pub fn new(
        directory: SymbolDirectory,
        remote: Arc<dyn SymbolInfoSource>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            directory,
            remote,
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(cache_ttl))),
        }
    }

    async fn cached_lookup(&self, key: LookupKey) -> Option<String> {
        let mut cache = self.cache.write().await;
        cache.cache_get(&key).cloned()
    }

    async fn cache_store(&self, key: LookupKey, value: String) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Display name for a symbol.
    ///
    /// Two-step resolution: the static directory first, the remote source
    /// second. The documented default on failure is the raw symbol string;
    /// this never errors.
    pub async fn display_name(&self, symbol: &str) -> String {
        if let Some(name) = self.directory.name_of(symbol) {
            return name.to_string();
        }

        let key = LookupKey {
            symbol: symbol.to_string(),
            field: "name",
        };
        if let Some(name) = self.cached_lookup(key.clone()).await {
            return name;
        }

        match self.remote.resolve_name(symbol).await {
            Ok(name) => {
                self.cache_store(key, name.clone()).await;
                name
            }
            Err(e) => {
                tracing::debug!(symbol, error = %e, "name lookup failed, using raw symbol");
                symbol.to_string()
            }
        }
    }

    /// Currency code for a symbol; `None` on any lookup failure.
    pub async fn currency(&self, symbol: &str) -> Option<String> {
        let key = LookupKey {
            symbol: symbol.to_string(),
            field: "currency",
        };
        if let Some(currency) = self.cached_lookup(key.clone()).await {
            return Some(currency);
        }

        match self.remote.resolve_currency(symbol).await {
            Ok(currency) => {
                self.cache_store(key, currency.clone()).await;
                Some(currency)
            }
            Err(e) => {
                tracing::debug!(symbol, error = %e, "currency lookup failed, omitting");
                None
            }
        }
    }

    /// Resolve both labels for a symbol
    pub async fn display_info(&self, symbol: &str) -> DisplayInfo {
        DisplayInfo {
            name: self.display_name(symbol).await,
            currency: self.currency(symbol).await,
        }
    }
}
