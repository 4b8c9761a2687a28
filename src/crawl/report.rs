// src/crawl/report.rs
// =============================================================================
// What a finished crawl hands back to its caller.
//
// A run never fails as a whole. Instead the report lists every page that was
// attempted, plus a separate list of the fetches that failed with their error
// message, so the caller gets a clear record of which URLs could not be
// crawled.
//
// Serialize is derived so the CLI can print the report as JSON.
// =============================================================================

use serde::Serialize;

/// One page the crawler attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitedPage {
    /// Normalized URL of the page
    pub url: String,
    /// Link hops from the seed (seed = 0)
    pub depth: usize,
    /// Number of links found on the page (0 if the fetch failed)
    pub links_found: usize,
}

/// A page whose fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub depth: usize,
    /// Why the fetch failed
    pub error: String,
}

/// Outcome of a crawl run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// The normalized seed URL
    pub seed: String,
    /// Every attempted page, in the order the crawl finished them
    pub pages: Vec<VisitedPage>,
    /// The attempted pages that could not be fetched
    pub failures: Vec<FailedFetch>,
}

impl CrawlReport {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            ..Self::default()
        }
    }

    // Adds one attempted page; a failed page goes in both lists
    pub(crate) fn record(&mut self, page: VisitedPage, failure: Option<FailedFetch>) {
        self.pages.push(page);
        if let Some(failure) = failure {
            self.failures.push(failure);
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// True if every attempted fetch succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn error_for(&self, url: &str) -> Option<&str> {
        self.failures
            .iter()
            .find(|failure| failure.url == url)
            .map(|failure| failure.error.as_str())
    }
}
