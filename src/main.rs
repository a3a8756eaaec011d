//! Audiobook bestsellers main entry point
//!
//! This is the command-line interface for the bestseller crawler and duration
//! report.

use audiobook_bestsellers::catalog::load_catalog;
use audiobook_bestsellers::config::{load_config_with_hash, Config};
use audiobook_bestsellers::crawler::{crawl, Coordinator};
use audiobook_bestsellers::output::{build_report, print_failures, print_report};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Audiobook bestsellers: duration statistics per catalog category
///
/// Reads the category-listing snapshot, crawls each category's bestseller
/// carousel (reusing cached pages), and prints the average, longest and
/// shortest audiobook length per category.
#[derive(Parser, Debug)]
#[command(name = "audiobook-bestsellers")]
#[command(version)]
#[command(about = "Bestseller duration statistics per audiobook category", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load the catalog and show what would be crawled without fetching
    #[arg(long, conflicts_with = "report_only")]
    dry_run: bool,

    /// Build the report from cached categories only, without fetching
    #[arg(long, conflicts_with = "dry_run")]
    report_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.report_only {
        handle_report_only(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("audiobook_bestsellers=info,warn"),
            1 => EnvFilter::new("audiobook_bestsellers=debug,info"),
            2 => EnvFilter::new("audiobook_bestsellers=trace,debug"),
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

/// Handles the --dry-run mode: loads the catalog and lists the crawl targets
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::from_config(config)?;
    let catalog = load_catalog(
        coordinator.cache(),
        &config.paths.catalog,
        &config.paths.listing_snapshot,
    )?;
    let targets = catalog.crawl_targets(config.crawler.include_sub_categories);

    println!("=== Bestseller Crawl Dry Run ===\n");

    println!("Site:");
    println!("  Origin: {}", config.site.origin);
    println!("  Bestseller container: {}", config.site.bestseller_selector);

    println!("\nPaths:");
    println!("  Listing snapshot: {}", config.paths.listing_snapshot.display());
    println!("  Catalog: {}", config.paths.catalog.display());
    println!("  Cache directory: {}", config.paths.cache_dir.display());

    println!("\nCrawler:");
    println!("  On category failure: {:?}", config.crawler.on_category_failure);
    println!("  Include sub-categories: {}", config.crawler.include_sub_categories);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    let mut cached = 0;
    println!("\nCategories ({}):", targets.len());
    for category in &targets {
        let is_cached = coordinator.is_cached(category)?;
        if is_cached {
            cached += 1;
        }
        println!(
            "  {} {} ({})",
            if is_cached { "✓" } else { "-" },
            category.title,
            category.href
        );
    }

    println!(
        "\n✓ Would fetch {} of {} categories ({} cached)",
        targets.len() - cached,
        targets.len(),
        cached
    );

    Ok(())
}

/// Handles the --report-only mode: reports on cached categories without fetching
fn handle_report_only(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::from_config(config)?;
    let catalog = load_catalog(
        coordinator.cache(),
        &config.paths.catalog,
        &config.paths.listing_snapshot,
    )?;

    let mut results = Vec::new();
    let mut missing = Vec::new();
    for category in catalog.crawl_targets(config.crawler.include_sub_categories) {
        match coordinator.cached_result(&category)? {
            Some(result) => results.push(result),
            None => missing.push(category),
        }
    }

    print_report(&build_report(&results));

    if !missing.is_empty() {
        println!();
        println!("Not cached yet ({}):", missing.len());
        for category in &missing {
            println!("  - {} ({})", category.title, category.href);
        }
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of {} (cache: {})",
        config.site.origin,
        config.paths.cache_dir.display()
    );

    match crawl(config).await {
        Ok(outcome) => {
            tracing::info!(
                "Crawl completed: {} categories, {} skipped",
                outcome.results.len(),
                outcome.failures.len()
            );
            print_report(&build_report(&outcome.results));
            print_failures(&outcome.failures);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
