//! Tweetline main entry point
//!
//! This is the command-line interface for the Tweetline tweet crawler.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};
use tweetline::config::{load_config_with_hash, load_roster, RosterEntry};
use tweetline::crawler::{crawl, CrawlOptions};
use tracing_subscriber::EnvFilter;

/// Tweetline: a roster-driven tweet archive crawler
///
/// Tweetline reads a CSV roster of tagged accounts, pulls each account's
/// timeline through the full-archive search API, reconciles retweeted and
/// quoted references, and writes the enriched records as chunked CSV files.
#[derive(Parser, Debug)]
#[command(name = "tweetline")]
#[command(version = "1.0.0")]
#[command(about = "A roster-driven tweet archive crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Split each output group into rows-per-file chunks
    #[arg(short, long)]
    split: bool,

    /// Crawl tweets created on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", default_value = "2006-03-21", value_parser = parse_date)]
    start_time: NaiveDate,

    /// Crawl tweets created before this date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    end_time: Option<NaiveDate>,

    /// Accounts per output group (default: the whole roster in one group)
    #[arg(short = 'n', long, value_name = "COUNT")]
    batch_size: Option<usize>,

    /// Validate config and roster and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

/// Parses a `YYYY-MM-DD` CLI date; a bad value makes clap exit non-zero
fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid YYYY-MM-DD date", text))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Load the roster; an unreadable roster aborts the run
    let roster = match load_roster(Path::new(&config.roster.path), &config.roster) {
        Ok(roster) => {
            tracing::info!("Roster loaded: {} accounts", roster.len());
            roster
        }
        Err(e) => {
            tracing::error!("Failed to load roster: {}", e);
            return Err(e.into());
        }
    };

    let end_time = cli
        .end_time
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let options = CrawlOptions {
        split: cli.split,
        start_date: cli.start_time,
        end_date: end_time,
        batch_size: cli.batch_size,
    };

    if cli.dry_run {
        handle_dry_run(&config, &roster, &options);
        return Ok(());
    }

    let bearer_token = std::env::var("BEARER_TOKEN")
        .context("BEARER_TOKEN environment variable is not set")?;

    handle_crawl(config, bearer_token, options, &roster).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tweetline=info,warn"),
            1 => EnvFilter::new("tweetline=debug,info"),
            2 => EnvFilter::new("tweetline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates inputs and shows what would be crawled
fn handle_dry_run(config: &tweetline::Config, roster: &[RosterEntry], options: &CrawlOptions) {
    println!("=== Tweetline Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Results per call: {}", config.api.results_per_call);
    println!("  Max tweets per user: {}", config.api.max_tweets_per_user);

    println!("\nOutput:");
    println!("  Folder: {}", config.output.folder);
    println!("  Rows per file: {}", config.output.rows_per_file);
    println!("  Split into chunks: {}", options.split);

    println!("\nDate range:");
    println!("  Start: {}", options.start_date);
    println!("  End: {}", options.end_date);

    let batch_size = options.batch_size.unwrap_or(roster.len()).max(1);
    let groups = roster.chunks(batch_size).count();

    println!("\nRoster ({} accounts, {} output groups):", roster.len(), groups);
    for entry in roster {
        if entry.tags.is_empty() {
            println!("  - {}", entry.handle);
        } else {
            println!("  - {} [{}]", entry.handle, entry.tags);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} accounts", roster.len());
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: tweetline::Config,
    bearer_token: String,
    options: CrawlOptions,
    roster: &[RosterEntry],
) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} accounts, {} to {}",
        roster.len(),
        options.start_date,
        options.end_date
    );

    match crawl(config, bearer_token, options, roster).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
