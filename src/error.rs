// src/error.rs
// =============================================================================
// Typed errors for the crawler.
//
// Two families:
// - FetchError: one page could not be fetched or parsed. Always caught at the
//   node that attempted it, logged, and recorded in the crawl report.
// - CrawlError: a crawl task could not be set up (bad scope pattern,
//   unopenable visit log). These surface before any page is fetched.
//
// Filter rejections (out of scope, excluded extension) are not errors at all:
// the link is simply dropped.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to fetch or parse a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The per-fetch deadline elapsed
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The URL handed to the fetcher is not an absolute URL
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The body could not be parsed into a document
    #[error("parse error: {0}")]
    Parse(String),

    /// The fetcher panicked while handling this URL
    #[error("fetch panicked")]
    Panicked,
}

/// Failure to set up a crawl task.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid scope pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot open visit log {}: {source}", .path.display())]
    VisitLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
