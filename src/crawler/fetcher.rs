//! HTTP fetcher implementation
//!
//! The crawler only needs "URL in, markup out". That contract is the
//! [`PageFetcher`] trait, so tests can hand the crawler canned pages while the
//! binary uses a `reqwest` client.

use crate::config::CrawlerConfig;
use crate::BestsellerError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`, or an error for network failures and
    /// non-success statuses
    async fn fetch_page(&self, url: &Url) -> Result<String, BestsellerError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use audiobook_bestsellers::config::CrawlerConfig;
/// use audiobook_bestsellers::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] over a shared `reqwest` client
///
/// One GET per page. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self, BestsellerError> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, BestsellerError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BestsellerError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

/// Maps a transport error onto the crate error, keeping timeouts distinct
fn classify_error(url: &Url, error: reqwest::Error) -> BestsellerError {
    if error.is_timeout() {
        BestsellerError::Timeout {
            url: url.to_string(),
        }
    } else {
        BestsellerError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_config() {
        let mut config = CrawlerConfig::default();
        config.request_timeout_secs = 2;
        config.user_agent = "TestCrawler/1.0".to_string();
        assert!(HttpFetcher::from_config(&config).is_ok());
    }

    // Fetching against a live server is covered by the wiremock tests in tests/
}
