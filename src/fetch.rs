//! Document fetching.
//!
//! The scraper only needs the decoded document text for a URL, expressed by
//! the [`Fetch`] trait. [`HttpFetcher`] is the `reqwest` implementation used by the
//! binary; tests plug in in-memory fetchers instead.
//!
//! No retries happen here. A failed fetch fails the scrape that asked for it.

use crate::error::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default `User-Agent` header sent by [`HttpFetcher`].
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of documents.
pub trait Fetch {
    /// Fetch the document at `url` as text.
    ///
    /// Implementations decode the body themselves; [`HttpFetcher`] uses the
    /// charset of the response's `Content-Type` and falls back to UTF-8.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Fetch`] on transport failure or an unusable response.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP(S) fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?
            .error_for_status()
            .map_err(|e| ScrapeError::fetch(url, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;
        debug!(bytes = body.len(), "Fetched document");
        Ok(body)
    }
}
