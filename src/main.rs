// src/main.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use etfdb_extractor::listing::{ListingScraper, DEFAULT_PAGE_SIZE};
use etfdb_extractor::profile::EtfClient;
use etfdb_extractor::storage::StorageManager;
use etfdb_extractor::tickers::{SymbolCatalog, DEFAULT_CATALOG_PATH};
use etfdb_extractor::utils::error::StorageError;
use etfdb_extractor::utils::{self, AppError, EtfdbConfig};

/// Command Line Interface for the etfdb.com ETF scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file listing the known ETF symbols (refresh with `list --update-catalog`)
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Output directory for extracted data
    #[arg(short, long, global = true, default_value = "./output")]
    output_dir: PathBuf,

    /// Print JSON to stdout instead of writing files
    #[arg(long, global = true)]
    stdout: bool,

    /// Override the etfdb.com base URL (also ETFDB_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (also ETFDB_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the full profile of one ETF
    Profile {
        /// Ticker symbol, any case
        ticker: String,
    },
    /// Page through the etfdb.com screener and collect every ETF
    List {
        /// Rows requested per screener page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Also overwrite the --catalog file with the fetched listing
        #[arg(long)]
        update_catalog: bool,
    },
}

impl Args {
    /// Environment defaults, then command-line overrides.
    fn config(&self) -> EtfdbConfig {
        let mut config = EtfdbConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn print_json<S: Serialize + ?Sized>(value: &S) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

async fn run_profile(args: &Args, ticker: &str) -> Result<(), AppError> {
    let catalog = SymbolCatalog::global(&args.catalog)?;
    let client = EtfClient::new(args.config(), catalog)?;
    tracing::debug!(
        "Querying {} with a {:?} timeout",
        client.config().base_url,
        client.config().timeout
    );

    let profile = client.profile(ticker).await?;
    let symbol = profile.symbol().unwrap_or(ticker).to_uppercase();

    if args.stdout {
        return print_json(&profile);
    }

    let storage = StorageManager::new(&args.output_dir)?;
    let path = storage.save_profile(&symbol, &profile)?;
    tracing::info!("Saved profile content to: {}", path.display());

    // Metadata is a convenience; a failure here doesn't undo the profile
    match storage.save_profile_metadata(&symbol, &profile) {
        Ok(path) => tracing::info!("Saved profile metadata to: {}", path.display()),
        Err(e) => tracing::error!("Failed to save profile metadata: {}", e),
    }
    Ok(())
}

async fn run_list(args: &Args, page_size: u32, update_catalog: bool) -> Result<(), AppError> {
    if page_size == 0 {
        return Err(AppError::Config("--page-size must be at least 1".to_string()));
    }

    let scraper = ListingScraper::new(args.config())?;
    let records = scraper.all_etfs(page_size).await?;

    if update_catalog {
        StorageManager::save_catalog(&args.catalog, &records)?;
    }

    if args.stdout {
        return print_json(&records);
    }

    let storage = StorageManager::new(&args.output_dir)?;
    storage.save_listing(&records)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Run the requested command
    let result = match &args.command {
        Command::Profile { ticker } => run_profile(&args, ticker).await,
        Command::List {
            page_size,
            update_catalog,
        } => run_list(&args, *page_size, *update_catalog).await,
    };

    if let Err(e) = &result {
        tracing::error!("Processing failed: {}", e);
    } else {
        tracing::info!("Processing finished.");
    }
    result
}
