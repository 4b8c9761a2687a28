// src/fetch/http.rs
// =============================================================================
// The real page fetcher: download a page over HTTP and extract its links.
//
// How it works:
// 1. Validate the URL (must be absolute)
// 2. GET it with a shared reqwest Client (timeout + user agent configured once)
// 3. Treat any non-2xx status as a failure
// 4. Parse the body as HTML and resolve every <a href> against the final URL
//    (after redirects), which is what the browser would use as the base
//
// Every failure mode becomes a FetchError; the crawl engine decides what to do
// with it (log it, record it, keep going).
// =============================================================================

use super::html::extract_links;
use super::{FetchedPage, PageFetcher};
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fetches pages over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    // Creates a fetcher with a reusable HTTP client
    //
    // The client keeps a connection pool, so one fetcher should be shared by
    // the whole crawl rather than created per page.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, timeout })
    }

    // reqwest reports its own deadline as an ordinary error; give it the same
    // Timeout variant the crawl engine uses
    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Http(error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await.map_err(|e| self.classify(e))?;
        debug!(url = %url, bytes = html.len(), "fetched page");

        // scraper's Html is not Send, so parsing happens after the last await
        let links = extract_links(&html, &final_url)?;

        Ok(FetchedPage {
            url: url.to_string(),
            links,
        })
    }
}
