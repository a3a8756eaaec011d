//! URL handling module
//!
//! This module provides the URL helpers shared by the catalog, the crawler and
//! the cache: resolving catalog-relative paths against the site origin,
//! dropping query strings from listing links, and normalizing cache keys.

mod normalize;

pub use normalize::{absolute_url, join_origin, normalize_key, parse_origin, strip_query};
