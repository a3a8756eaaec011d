//! Configuration module for the bestseller crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a configuration file uses the
//! conventional local layout (`cache/genres.html`, `data/cats.json`,
//! `data/categories/`).
//!
//! # Example
//!
//! ```no_run
//! use audiobook_bestsellers::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bestsellers.toml")).unwrap();
//! println!("Crawling categories from: {}", config.site.origin);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FailurePolicy, PathsConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
