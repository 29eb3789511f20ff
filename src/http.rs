//! HTTP fetching.
//!
//! The crawler only needs "give me the text behind this URL", so that is all
//! the [`Fetcher`] trait asks for. [`HttpFetcher`] is the real implementation
//! on top of `reqwest`; tests substitute an in-memory one.

use crate::error::{CrawlError, Result};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// User agent sent with every request. The site rejects reqwest's default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the body of a page as text.
pub trait Fetcher {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Transport failures, timeouts and non-2xx statuses are all errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `reqwest`-backed [`Fetcher`] with a fixed `User-Agent` header.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success status");
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
