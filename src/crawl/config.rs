// src/crawl/config.rs
// =============================================================================
// Knobs for a crawl run.
//
// The defaults reproduce the classic behaviour: one worker walking the link
// graph depth-first, no depth limit, raw regex scope pattern, no visit log.
// Everything else is opt-in through the with_* setters (or the CLI flags that
// map onto them).
// =============================================================================

use super::filter::ScopeMode;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a single crawl task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of concurrent workers. 1 = sequential depth-first traversal
    pub workers: usize,

    /// Deadline for each individual fetch
    pub fetch_timeout: Duration,

    /// Deepest discovery depth to crawl (seed = 0). None = unlimited
    pub max_depth: Option<usize>,

    /// How the scope fragment is interpreted
    pub scope_mode: ScopeMode,

    /// Optional append-only file receiving every crawled URL
    pub visit_log: Option<PathBuf>,

    /// User agent sent by the HTTP fetcher
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            fetch_timeout: Duration::from_secs(10),
            max_depth: None,
            scope_mode: ScopeMode::Regex,
            visit_log: None,
            user_agent: format!("spiderling/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    /// Set the worker count; zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_scope_mode(mut self, mode: ScopeMode) -> Self {
        self.scope_mode = mode;
        self
    }

    pub fn with_visit_log(mut self, path: Option<PathBuf>) -> Self {
        self.visit_log = path;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
