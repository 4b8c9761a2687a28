// src/lib.rs
// =============================================================================
// spiderling: a recursive web crawler.
//
// Start from a seed URL, follow every link whose text contains the scope
// pattern (skipping .py/.zip/.xls/.pdf files), and visit each page exactly
// once. The binary in main.rs is a thin CLI over this library.
//
// Modules:
// - crawl: the traversal engine (filtering, visited set, sequential and
//   concurrent walks, CrawlTask)
// - fetch: the PageFetcher trait and the reqwest/scraper implementation
// - error: FetchError and CrawlError
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;

pub use crawl::{CrawlConfig, CrawlReport, CrawlTask};
pub use error::{CrawlError, FetchError};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
