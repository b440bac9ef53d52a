//! Command-line runner for the findash analysis engine
//!
//! Runs one analysis over Yahoo Finance data and prints the chart
//! specifications as JSON for a rendering frontend.
//!
//! ```bash
//! findash --symbols AAPL,MSFT \
//!     --start 01.01.2024 --end 30.06.2024 \
//!     --analyses index-evolution,linear-regression \
//!     --companies companies.csv
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use findash_engine::config::EngineConfig;
use findash_engine::engine::{AnalysisEngine, AnalysisKind, AnalysisRequest};
use findash_engine::lookup::{SymbolDirectory, SymbolResolver};
use findash_engine::source::YahooSource;

#[derive(Parser, Debug)]
#[command(name = "findash")]
#[command(about = "Fetch market history and build dashboard chart specs", long_about = None)]
struct Args {
    /// One or two ticker symbols
    #[arg(long, value_delimiter = ',', required = true)]
    symbols: Vec<String>,

    /// Start date, DD.MM.YYYY
    #[arg(long)]
    start: String,

    /// End date, DD.MM.YYYY
    #[arg(long)]
    end: String,

    /// Analyses to run (default: all six)
    #[arg(long, value_delimiter = ',')]
    analyses: Vec<String>,

    /// Path to the `ticker,company name` CSV symbol table
    #[arg(long)]
    companies: Option<PathBuf>,

    /// Benchmark symbol for single-asset regression
    #[arg(long, default_value = findash_engine::config::DEFAULT_BENCHMARK)]
    benchmark: String,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = EngineConfig::builder()
        .benchmark_symbol(&args.benchmark)
        .build()?;

    let directory = match &args.companies {
        Some(path) => {
            let directory = SymbolDirectory::from_csv_path(path)?;
            info!(entries = directory.len(), "loaded symbol table");
            directory
        }
        None => SymbolDirectory::new(),
    };

    let yahoo = Arc::new(YahooSource::new());
    let resolver = SymbolResolver::new(directory, yahoo.clone(), config.lookup_cache_ttl);
    let engine = AnalysisEngine::new(yahoo, resolver, config)?;

    let kinds = if args.analyses.is_empty() {
        AnalysisKind::ALL.iter().map(|k| k.identifier().to_string()).collect()
    } else {
        args.analyses
    };

    let request = AnalysisRequest {
        symbols: args.symbols,
        start: args.start,
        end: args.end,
        kinds,
    };

    match engine.run(&request).await {
        Ok(report) => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            // Engine errors are user-visible messages, not stack traces
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
