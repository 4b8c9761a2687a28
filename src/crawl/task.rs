// src/crawl/task.rs
// =============================================================================
// CrawlTask: one crawl run, from a seed URL, limited to a scope pattern.
//
// A task owns its VisitedSet. The set lives as long as the task, so it can be
// inspected while a run is going (through visited_handle()) or after it
// finished (through visited()). A task is meant to be run once; running it
// again starts from the seed but skips every page the first run claimed.
//
// run() never fails. Fetch failures are recorded in the returned CrawlReport
// and logged; the only errors a task can produce come from setting it up.
// =============================================================================

use super::config::CrawlConfig;
use super::engine::{crawl_depth_first, Crawler};
use super::filter::{normalize_url, ScopePattern};
use super::log::VisitLog;
use super::pool::crawl_with_workers;
use super::report::CrawlReport;
use super::visited::VisitedSet;
use crate::error::CrawlError;
use crate::fetch::PageFetcher;
use std::sync::Arc;
use tracing::info;

pub struct CrawlTask {
    base_url: String,
    scope: ScopePattern,
    config: CrawlConfig,
    fetcher: Arc<dyn PageFetcher>,
    visit_log: Option<Arc<VisitLog>>,
    visited: Arc<VisitedSet>,
}

impl CrawlTask {
    /// A task with the default configuration.
    pub fn new(
        base_url: &str,
        crawlable_url_pattern: &str,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, CrawlError> {
        Self::with_config(base_url, crawlable_url_pattern, fetcher, CrawlConfig::default())
    }

    // Creates a task, compiling the scope pattern and opening the visit log
    //
    // Errors:
    //   CrawlError::InvalidPattern if the pattern does not compile
    //   CrawlError::VisitLog if the configured log file cannot be opened
    pub fn with_config(
        base_url: &str,
        crawlable_url_pattern: &str,
        fetcher: Arc<dyn PageFetcher>,
        config: CrawlConfig,
    ) -> Result<Self, CrawlError> {
        let scope = ScopePattern::new(crawlable_url_pattern, config.scope_mode)?;
        let visit_log = match &config.visit_log {
            Some(path) => Some(Arc::new(VisitLog::open(path)?)),
            None => None,
        };

        Ok(Self {
            base_url: base_url.to_string(),
            scope,
            config,
            fetcher,
            visit_log,
            visited: Arc::new(VisitedSet::new()),
        })
    }

    /// The seed URL as given (normalized when the run starts).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.to_string();
    }

    pub fn crawlable_url_pattern(&self) -> &str {
        self.scope.fragment()
    }

    /// Replaces the scope pattern; the old one stays if the new one is invalid.
    pub fn set_crawlable_url_pattern(&mut self, pattern: &str) -> Result<(), CrawlError> {
        self.scope = ScopePattern::new(pattern, self.config.scope_mode)?;
        Ok(())
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Shared handle to the visited set, for watching a run from elsewhere.
    pub fn visited_handle(&self) -> Arc<VisitedSet> {
        Arc::clone(&self.visited)
    }

    // Runs the crawl to completion
    //
    // The seed is normalized, then the link graph is walked either depth-first
    // (one worker) or by a worker pool. Returns when nothing is left to crawl.
    pub async fn run(&self) -> CrawlReport {
        let seed = normalize_url(&self.base_url);
        info!(
            seed = %seed,
            pattern = %self.scope.fragment(),
            workers = self.config.workers,
            "Started crawl"
        );

        let crawler = Crawler {
            scope: self.scope.clone(),
            visited: Arc::clone(&self.visited),
            fetcher: Arc::clone(&self.fetcher),
            visit_log: self.visit_log.clone(),
            max_depth: self.config.max_depth,
            fetch_timeout: self.config.fetch_timeout,
        };

        let report = if self.config.workers <= 1 {
            crawl_depth_first(&crawler, &seed).await
        } else {
            crawl_with_workers(Arc::new(crawler), seed, self.config.workers).await
        };

        info!(
            pages = report.pages.len(),
            failed = report.failed_count(),
            "Finished crawl"
        );
        report
    }
}
