// src/crawl/mod.rs
// =============================================================================
// This module is the crawler itself.
//
// Given a seed URL and a scope pattern, it fetches the seed, extracts its
// links, and follows every link that is in scope, crawlable and not yet
// visited, until nothing new is reachable.
//
// Submodules:
// - filter: scope pattern, excluded extensions, URL normalization
// - visited: the at-most-once VisitedSet
// - engine: visiting one page and the sequential depth-first walk
// - queue: the shared work queue with quiescence detection
// - pool: the concurrent worker-pool walk
// - task: CrawlTask, the public entry point tying it together
// - config / report / log: run settings, run results, optional URL log
// =============================================================================

mod config;
mod engine;
mod filter;
mod log;
mod pool;
mod queue;
mod report;
mod task;
mod visited;

// Re-export the public API so callers can write `crawl::CrawlTask`
pub use config::CrawlConfig;
pub use filter::{is_crawlable, is_in_scope, normalize_url, ScopeMode, ScopePattern};
pub use report::{CrawlReport, FailedFetch, VisitedPage};
pub use task::CrawlTask;
pub use visited::VisitedSet;
