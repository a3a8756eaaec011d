//! Crawler coordinator - per-category crawl orchestration
//!
//! Categories are crawled one at a time:
//! - Resolve the category path against the site origin
//! - Serve the page result from the cache, or fetch the page
//! - Locate the bestseller container and extract every product card
//! - Persist the result before moving to the next category

use crate::cache::{CacheKey, CacheStore};
use crate::catalog::CategoryDescriptor;
use crate::config::{Config, FailurePolicy};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::{CategoryFailure, CategoryPageResult, CrawlOutcome};
use crate::extract::selectors::PRODUCT_CARD;
use crate::extract::RecordExtractor;
use crate::url::{absolute_url, parse_origin};
use crate::{BestsellerError, ConfigError};
use scraper::{Html, Selector};
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Box<dyn PageFetcher>,
    cache: CacheStore,
    origin: Url,
    container: Selector,
    extractor: RecordExtractor,
    policy: FailurePolicy,
}

impl Coordinator {
    /// Creates a coordinator that fetches through `fetcher`
    ///
    /// # Arguments
    ///
    /// * `config` - Site, cache location and failure policy
    /// * `fetcher` - Source of category page markup
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(BestsellerError)` - Invalid origin or container selector
    pub fn new(config: &Config, fetcher: Box<dyn PageFetcher>) -> Result<Self, BestsellerError> {
        let origin = parse_origin(&config.site.origin)?;
        let container = Selector::parse(&config.site.bestseller_selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("'{}': {:?}", config.site.bestseller_selector, e))
        })?;

        Ok(Self {
            fetcher,
            cache: CacheStore::new(&config.paths.cache_dir),
            extractor: RecordExtractor::new(origin.clone()),
            origin,
            container,
            policy: config.crawler.on_category_failure,
        })
    }

    /// Creates a coordinator that fetches over HTTP
    pub fn from_config(config: &Config) -> Result<Self, BestsellerError> {
        let fetcher = HttpFetcher::from_config(&config.crawler)?;
        Self::new(config, Box::new(fetcher))
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Absolute URL of a category page
    pub fn category_url(&self, category: &CategoryDescriptor) -> Result<Url, BestsellerError> {
        Ok(absolute_url(&self.origin, &category.href)?)
    }

    /// Returns true if the category's page result is already cached
    pub fn is_cached(&self, category: &CategoryDescriptor) -> Result<bool, BestsellerError> {
        let url = self.category_url(category)?;
        Ok(self.cache.contains(&CacheKey::url(url.as_str())))
    }

    /// Crawls one category, reading through the cache
    ///
    /// A cached category is returned without touching the network. A page
    /// without a bestseller container is an error and is not cached.
    pub async fn crawl_category(
        &self,
        category: &CategoryDescriptor,
    ) -> Result<CategoryPageResult, BestsellerError> {
        let url = self.category_url(category)?;
        let key = CacheKey::url(url.as_str());

        if self.cache.contains(&key) {
            tracing::debug!("Using cached result for {}", url);
        }

        self.cache
            .get_or_compute_async(&key, || async {
                let html = self.fetcher.fetch_page(&url).await?;
                self.parse_category_page(category, &html, &url)
            })
            .await
    }

    /// Extracts the bestseller records from a fetched category page
    pub fn parse_category_page(
        &self,
        category: &CategoryDescriptor,
        html: &str,
        url: &Url,
    ) -> Result<CategoryPageResult, BestsellerError> {
        let document = Html::parse_document(html);

        let container = document
            .select(&self.container)
            .next()
            .ok_or_else(|| BestsellerError::MissingContainer {
                url: url.to_string(),
            })?;

        let bestsellers = container
            .select(&PRODUCT_CARD)
            .map(|card| self.extractor.extract(card))
            .collect();

        Ok(CategoryPageResult {
            category: category.clone(),
            bestsellers,
        })
    }

    /// Crawls every category in order
    ///
    /// Under [`FailurePolicy::Abort`] the first failing category ends the run
    /// with its error; categories finished before it stay cached. Under
    /// [`FailurePolicy::Skip`] failures are collected in the outcome.
    pub async fn crawl_all(
        &self,
        categories: &[CategoryDescriptor],
    ) -> Result<CrawlOutcome, BestsellerError> {
        let total = categories.len();
        let mut outcome = CrawlOutcome::default();

        for (index, category) in categories.iter().enumerate() {
            tracing::info!("[{}/{}] {} ({})", index + 1, total, category.title, category.href);

            match self.crawl_category(category).await {
                Ok(result) => {
                    tracing::info!(
                        "{}: {} bestsellers",
                        category.title,
                        result.bestsellers.len()
                    );
                    outcome.results.push(result);
                }
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        tracing::error!("Failed to crawl {}: {}", category.title, e);
                        return Err(e);
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!("Skipping {}: {}", category.title, e);
                        outcome.failures.push(CategoryFailure {
                            category: category.clone(),
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }

    /// Reads a category result from the cache without fetching
    pub fn cached_result(
        &self,
        category: &CategoryDescriptor,
    ) -> Result<Option<CategoryPageResult>, BestsellerError> {
        let url = self.category_url(category)?;
        Ok(self.cache.load(&CacheKey::url(url.as_str()))?)
    }
}
