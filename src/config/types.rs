use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,
    pub crawler: CrawlerConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host that category paths and product paths are joined onto
    pub origin: String,

    /// CSS selector identifying the bestseller carousel on a category page
    #[serde(rename = "bestseller-selector")]
    pub bestseller_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.audible.com".to_string(),
            bestseller_selector: "#bestsellers-carousel".to_string(),
        }
    }
}

/// Local file layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Pre-downloaded snapshot of the category listing page
    #[serde(rename = "listing-snapshot")]
    pub listing_snapshot: PathBuf,

    /// Where the parsed category catalog is cached
    pub catalog: PathBuf,

    /// Directory holding one cached JSON document per category page
    #[serde(rename = "cache-dir")]
    pub cache_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            listing_snapshot: PathBuf::from("cache/genres.html"),
            catalog: PathBuf::from("data/cats.json"),
            cache_dir: PathBuf::from("data/categories"),
        }
    }
}

/// What to do when a single category cannot be crawled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing category
    #[default]
    Abort,
    /// Record the failure and continue with the next category
    Skip,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    #[serde(rename = "on-category-failure")]
    pub on_category_failure: FailurePolicy,

    /// Crawl sub-category links after the top-level categories
    #[serde(rename = "include-sub-categories")]
    pub include_sub_categories: bool,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            on_category_failure: FailurePolicy::Abort,
            include_sub_categories: false,
            request_timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
