//! Crawler module for category page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind a swappable [`PageFetcher`]
//! - Bestseller container lookup and product card extraction
//! - Read-through caching of every category result
//! - Overall crawl coordination and failure policy

mod coordinator;
mod fetcher;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};

use crate::catalog::{load_catalog, CategoryDescriptor};
use crate::config::Config;
use crate::extract::AudiobookRecord;
use crate::BestsellerError;
use serde::{Deserialize, Serialize};

/// Bestsellers of one category, exactly as persisted in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPageResult {
    pub category: CategoryDescriptor,
    pub bestsellers: Vec<AudiobookRecord>,
}

/// A category that could not be crawled under the skip policy
#[derive(Debug, Clone)]
pub struct CategoryFailure {
    pub category: CategoryDescriptor,
    pub error: String,
}

/// Everything a crawl produced, in crawl order
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub results: Vec<CategoryPageResult>,
    pub failures: Vec<CategoryFailure>,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the category catalog (building it from the snapshot once)
/// 2. Build the HTTP client
/// 3. Crawl every target category, reusing cached results
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished (possibly with skipped categories)
/// * `Err(BestsellerError)` - Crawl aborted
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, BestsellerError> {
    let coordinator = Coordinator::from_config(config)?;
    let catalog = load_catalog(
        coordinator.cache(),
        &config.paths.catalog,
        &config.paths.listing_snapshot,
    )?;

    let targets = catalog.crawl_targets(config.crawler.include_sub_categories);
    tracing::info!(
        "Crawling {} categories ({} in catalog, {} sub-categories)",
        targets.len(),
        catalog.categories.len(),
        catalog.sub_categories.len()
    );

    coordinator.crawl_all(&targets).await
}
