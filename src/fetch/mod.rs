// src/fetch/mod.rs
// =============================================================================
// The fetch/parse step: turn a URL into the list of links on that page.
//
// The crawl engine only depends on the PageFetcher trait defined here. The
// real implementation (HttpFetcher) downloads pages with reqwest and pulls
// anchors out with scraper; tests swap in an in-memory MockFetcher.
//
// Submodules:
// - http: HttpFetcher, the reqwest-backed fetcher
// - html: extracts absolute anchor targets from an HTML document
// =============================================================================

mod html;
mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpFetcher;

use crate::error::FetchError;
use async_trait::async_trait;

/// A fetched and parsed page, reduced to what the crawler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// Absolute targets of every anchor on the page, in document order
    pub links: Vec<String>,
}

// Anything that can fetch a page and report its outgoing links
//
// Send + Sync because the worker pool shares one fetcher across tasks.
// async_trait keeps the trait object-safe so the engine can hold
// Arc<dyn PageFetcher>.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
