//! Audiobook bestsellers: per-category bestseller metadata and duration statistics
//!
//! This crate reads a snapshot of a catalog's category listing, crawls the
//! bestseller carousel of every category, extracts typed audiobook records from
//! the product cards, and summarizes audiobook lengths per category. Every
//! fetched category is persisted in a content-addressed JSON cache, so an
//! interrupted run resumes where it stopped.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawl and report operations
#[derive(Debug, Error)]
pub enum BestsellerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Bestseller container not found on {url}")]
    MissingContainer { url: String },

    #[error("Category listing snapshot not found: {path}")]
    MissingSnapshot { path: String },

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for crawl and report operations
pub type Result<T> = std::result::Result<T, BestsellerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use cache::{CacheKey, CacheStore};
pub use catalog::{CategoryCatalog, CategoryDescriptor};
pub use config::Config;
pub use crawler::{CategoryPageResult, Coordinator, CrawlOutcome};
pub use extract::{AudiobookRecord, RatingAspect};
