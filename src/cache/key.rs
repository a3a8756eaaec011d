use crate::url::normalize_key;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Number of digest bytes kept in cache file names (128 bits)
const DIGEST_BYTES: usize = 16;

/// Logical address of a cached document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    /// A singleton document stored at a well-known path
    Fixed(PathBuf),

    /// A document derived from a URL, stored under the digest of the normalized URL
    Url(String),
}

impl CacheKey {
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        Self::Fixed(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

/// Hex digest used as the file stem for a URL-keyed entry
///
/// The URL is normalized first (trimmed, lower-cased), so keys differing only
/// in padding or case map to the same entry.
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::cache::url_digest;
///
/// let a = url_digest("https://www.audible.com/cat/Mystery");
/// let b = url_digest("  HTTPS://WWW.AUDIBLE.COM/CAT/MYSTERY ");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 32);
/// ```
pub fn url_digest(url: &str) -> String {
    let digest = Sha256::digest(normalize_key(url).as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable() {
        let url = "https://www.audible.com/cat/Science-Fiction";
        assert_eq!(url_digest(url), url_digest(url));
    }

    #[test]
    fn test_digest_differs_per_url() {
        assert_ne!(
            url_digest("https://www.audible.com/cat/a"),
            url_digest("https://www.audible.com/cat/b")
        );
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = url_digest("https://www.audible.com/");
        assert_eq!(digest.len(), DIGEST_BYTES * 2);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
