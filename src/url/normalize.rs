use crate::UrlError;
use url::Url;

/// Normalizes a cache key: surrounding whitespace removed, letters lower-cased
///
/// Two keys that differ only in case or padding address the same cache entry.
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::url::normalize_key;
///
/// assert_eq!(
///     normalize_key("  HTTPS://Example.com/Cat/Mystery "),
///     "https://example.com/cat/mystery"
/// );
/// ```
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Removes the query string (everything from the first `?`) from a link target
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::url::strip_query;
///
/// assert_eq!(strip_query("/cat/Mystery-Audiobooks/18580?ref=nav"), "/cat/Mystery-Audiobooks/18580");
/// assert_eq!(strip_query("/cat/Sci-Fi"), "/cat/Sci-Fi");
/// ```
pub fn strip_query(href: &str) -> &str {
    match href.split_once('?') {
        Some((path, _)) => path,
        None => href,
    }
}

/// Parses and checks a site origin
///
/// # Returns
///
/// * `Ok(Url)` - An HTTP(S) URL with a host
/// * `Err(UrlError)` - Malformed URL, unsupported scheme, or missing host
pub fn parse_origin(origin: &str) -> Result<Url, UrlError> {
    let url = Url::parse(origin.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves a catalog-relative path against the site origin
///
/// Absolute link targets are returned as they are.
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::url::{absolute_url, parse_origin};
///
/// let origin = parse_origin("https://www.audible.com").unwrap();
/// let url = absolute_url(&origin, "/cat/Mystery-Audiobooks/18580").unwrap();
/// assert_eq!(url.as_str(), "https://www.audible.com/cat/Mystery-Audiobooks/18580");
/// ```
pub fn absolute_url(origin: &Url, path: &str) -> Result<Url, UrlError> {
    origin
        .join(path.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", path, e)))
}

/// Joins the site origin and a path as text, without URL resolution
///
/// The path is appended verbatim: no percent-encoding, no dot-segment
/// removal, and a protocol-relative path stays on the origin's host. A `/` is
/// inserted only when the path lacks one.
///
/// # Examples
///
/// ```
/// use audiobook_bestsellers::url::{join_origin, parse_origin};
///
/// let origin = parse_origin("https://www.audible.com").unwrap();
/// assert_eq!(join_origin(&origin, "/pd/Some-Book/B0123"), "https://www.audible.com/pd/Some-Book/B0123");
/// assert_eq!(join_origin(&origin, "pd/B0123"), "https://www.audible.com/pd/B0123");
/// ```
pub fn join_origin(origin: &Url, path: &str) -> String {
    let base = origin.as_str().trim_end_matches('/');
    let path = path.trim();
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        parse_origin("https://www.audible.com").unwrap()
    }

    #[test]
    fn test_normalize_key_trims_and_lowercases() {
        assert_eq!(normalize_key("https://a.com/X"), "https://a.com/x");
        assert_eq!(normalize_key("\thttps://a.com/x\n"), "https://a.com/x");
        assert_eq!(normalize_key("HTTPS://A.COM/X"), normalize_key(" https://a.com/x "));
    }

    #[test]
    fn test_normalize_key_keeps_inner_whitespace() {
        assert_eq!(normalize_key(" a b "), "a b");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/cat/a?x=1&y=2"), "/cat/a");
        assert_eq!(strip_query("/cat/a"), "/cat/a");
        assert_eq!(strip_query("?only=query"), "");
        assert_eq!(strip_query(""), "");
    }

    #[test]
    fn test_parse_origin_rejects_bad_input() {
        assert!(matches!(parse_origin("nope"), Err(UrlError::Parse(_))));
        assert!(matches!(
            parse_origin("ftp://example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_parse_origin_accepts_local_servers() {
        let url = parse_origin("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_absolute_url_from_root_relative_path() {
        let url = absolute_url(&origin(), "/pd/Some-Book/B0123").unwrap();
        assert_eq!(url.as_str(), "https://www.audible.com/pd/Some-Book/B0123");
    }

    #[test]
    fn test_absolute_url_keeps_absolute_target() {
        let url = absolute_url(&origin(), "https://other.example.com/x").unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/x");
    }

    #[test]
    fn test_join_origin_appends_path_verbatim() {
        assert_eq!(
            join_origin(&origin(), "//other.example/pd/B1"),
            "https://www.audible.com//other.example/pd/B1"
        );
        assert_eq!(
            join_origin(&origin(), "/pd/Café-Audiobook/B1"),
            "https://www.audible.com/pd/Café-Audiobook/B1"
        );
    }

    #[test]
    fn test_join_origin_keeps_origin_path_prefix() {
        let origin = parse_origin("https://example.com/store/").unwrap();
        assert_eq!(join_origin(&origin, "/pd/B1"), "https://example.com/store/pd/B1");
        assert_eq!(join_origin(&origin, "pd/B1"), "https://example.com/store/pd/B1");
    }
}
