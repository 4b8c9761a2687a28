// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the Cli struct below IS the argument definition.
// Doc comments on fields become the --help text.
// =============================================================================

use clap::Parser;
use spiderling::crawl::{CrawlConfig, ScopeMode};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "spiderling",
    version,
    about = "Recursively crawl a website, visiting every in-scope link exactly once",
    long_about = "spiderling starts at BASE_URL, extracts every link on each page it fetches, \
                  and follows the links whose URL contains PATTERN. Each page is fetched at most once."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    pub base_url: String,

    /// Fragment a link must contain to be crawled (e.g., example.com/blog)
    ///
    /// Interpreted as a regular expression fragment unless --literal is given,
    /// so "." matches any character.
    pub pattern: String,

    /// Treat PATTERN as a plain substring instead of a regex fragment
    #[arg(long)]
    pub literal: bool,

    /// Number of concurrent workers (1 = sequential depth-first crawl)
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Per-page fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum link depth to crawl (seed = 0). Unlimited if omitted
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Append every crawled URL to this file
    #[arg(long, value_name = "PATH")]
    pub visited_log: Option<PathBuf>,

    /// Output the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    // Maps the flags onto a CrawlConfig
    pub fn crawl_config(&self) -> CrawlConfig {
        let scope_mode = if self.literal {
            ScopeMode::Literal
        } else {
            ScopeMode::Regex
        };

        CrawlConfig::default()
            .with_workers(self.workers)
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_depth(self.max_depth)
            .with_scope_mode(scope_mode)
            .with_visit_log(self.visited_log.clone())
    }
}
