use crate::config::types::{Config, CrawlerConfig, PathsConfig, SiteConfig};
use crate::ConfigError;
use crate::url::parse_origin;
use scraper::Selector;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_paths_config(&config.paths)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Validates the target site: origin URL and carousel selector
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    parse_origin(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if config.bestseller_selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "bestseller_selector cannot be empty".to_string(),
        ));
    }

    Selector::parse(&config.bestseller_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", config.bestseller_selector, e))
    })?;

    Ok(())
}

/// Validates the local file layout
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    if config.listing_snapshot.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "listing_snapshot cannot be empty".to_string(),
        ));
    }

    if config.catalog.as_os_str().is_empty() {
        return Err(ConfigError::Validation("catalog cannot be empty".to_string()));
    }

    if config.cache_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "cache_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_origin() {
        let mut site = SiteConfig::default();
        site.origin = "ftp://example.com".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        site.origin = "not a url".to_string();
        assert!(validate_site_config(&site).is_err());

        site.origin = "http://localhost:8080".to_string();
        assert!(validate_site_config(&site).is_ok());
    }

    #[test]
    fn test_origin_errors_match_crawler_parsing() {
        let mut site = SiteConfig::default();
        site.origin = "ftp://example.com".to_string();
        match validate_site_config(&site) {
            Err(ConfigError::InvalidUrl(msg)) => {
                assert!(msg.contains("ftp://example.com"));
                assert!(msg.contains("Only HTTP and HTTPS schemes are supported"));
            }
            other => panic!("expected InvalidUrl, got {:?}", other),
        }

        site.origin = "mailto:someone@example.com".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_selector() {
        let mut site = SiteConfig::default();
        site.bestseller_selector = "div[".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidSelector(_))
        ));

        site.bestseller_selector = "   ".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_paths() {
        let mut paths = PathsConfig::default();
        paths.cache_dir = "".into();
        assert!(validate_paths_config(&paths).is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut crawler = CrawlerConfig::default();
        crawler.request_timeout_secs = 301;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.request_timeout_secs = 300;
        assert!(validate_crawler_config(&crawler).is_ok());
    }
}
