//! Content-addressed JSON cache
//!
//! This module persists computed documents on disk so that a crawl never
//! repeats work it already finished:
//! - Singleton documents (the category catalog) live at a fixed path
//! - URL-keyed documents (category pages) live under a digest of the
//!   normalized URL inside the cache directory
//!
//! Entries are never refreshed or expired. Delete the file to force a
//! recomputation.

mod key;
mod store;

pub use key::{url_digest, CacheKey};
pub use store::CacheStore;

use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed cache entry {path}: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
