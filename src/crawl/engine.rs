// src/crawl/engine.rs
// =============================================================================
// The traversal engine: visiting one page, deciding which links to follow,
// and the sequential depth-first walk.
//
// How a single page is visited:
// 1. The URL is claimed in the VisitedSet (before fetching, so a self-link or
//    a cycle back to it is already "visited")
// 2. The URL is appended to the visit log, if one is configured
// 3. The page is fetched with an independent timeout
// 4. On success its links are normalized and returned; on failure the error
//    is logged and the page counts as having no links
//
// A link is followed iff it is in scope, crawlable, and not yet visited.
//
// The sequential walk keeps an explicit stack of "remaining links" frames
// instead of recursing. Each frame is one page's link list; the top frame is
// the page currently being expanded. This visits pages in exactly the order a
// recursive depth-first crawl would, without being bound by the call stack.
// =============================================================================

use super::filter::{is_crawlable, is_in_scope, normalize_url, ScopePattern};
use super::log::VisitLog;
use super::report::{CrawlReport, FailedFetch, VisitedPage};
use super::visited::VisitedSet;
use crate::error::FetchError;
use crate::fetch::PageFetcher;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, trace, warn};

/// Everything needed to visit pages, shared by both traversal strategies.
pub(crate) struct Crawler {
    pub(crate) scope: ScopePattern,
    pub(crate) visited: Arc<VisitedSet>,
    pub(crate) fetcher: Arc<dyn PageFetcher>,
    pub(crate) visit_log: Option<Arc<VisitLog>>,
    pub(crate) max_depth: Option<usize>,
    pub(crate) fetch_timeout: Duration,
}

impl Crawler {
    // Decides whether a discovered link should be crawled, and claims it
    //
    // The scope and extension checks run first because they are pure; the
    // VisitedSet insert is last so that a rejected link is never marked.
    //
    // Returns: true if the caller now owns the visit of `link`
    pub(crate) fn should_follow(&self, link: &str) -> bool {
        if !is_in_scope(link, &self.scope) {
            trace!(url = %link, "out of scope");
            return false;
        }
        if !is_crawlable(link) {
            trace!(url = %link, "excluded extension");
            return false;
        }
        self.visited.insert(link)
    }

    /// True if links found at `depth` may still be followed.
    pub(crate) fn expands(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    // Fetches an already-claimed URL
    //
    // Fetch failures stop here: they are logged with the URL and recorded on
    // the returned visit, and the page yields no links. A fetcher that panics
    // is treated the same way, so the worker (or the sequential walk) keeps
    // going.
    pub(crate) async fn visit(&self, url: &str, depth: usize) -> Visit {
        info!(url = %url, depth, "Crawling");

        if let Some(log) = &self.visit_log {
            log.record(url);
        }

        let fetch = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url));
        let fetched = match AssertUnwindSafe(fetch).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(FetchError::Timeout(self.fetch_timeout)),
            Err(_) => Err(FetchError::Panicked),
        };

        match fetched {
            Ok(page) => {
                let links: Vec<String> = page.links.iter().map(|l| normalize_url(l)).collect();
                Visit {
                    page: VisitedPage {
                        url: url.to_string(),
                        depth,
                        links_found: links.len(),
                    },
                    failure: None,
                    links,
                }
            }
            Err(e) => {
                warn!(url = %url, depth, error = %e, "fetch failed");
                Visit {
                    page: VisitedPage {
                        url: url.to_string(),
                        depth,
                        links_found: 0,
                    },
                    failure: Some(FailedFetch {
                        url: url.to_string(),
                        depth,
                        error: e.to_string(),
                    }),
                    links: Vec::new(),
                }
            }
        }
    }
}

// Result of visiting one page
pub(crate) struct Visit {
    pub(crate) page: VisitedPage,
    pub(crate) failure: Option<FailedFetch>,
    // normalized outgoing links, empty on failure
    pub(crate) links: Vec<String>,
}

// One page's links that have not been looked at yet
struct Frame {
    // depth the links in this frame would be crawled at
    depth: usize,
    links: std::vec::IntoIter<String>,
}

// Walks the link graph depth-first from `seed`, one fetch at a time
//
// Parameters:
//   crawler: shared visit machinery
//   seed: normalized starting URL
//
// Returns: the crawl report, pages in visit order
pub(crate) async fn crawl_depth_first(crawler: &Crawler, seed: &str) -> CrawlReport {
    let mut report = CrawlReport::new(seed);
    let mut stack: Vec<Frame> = Vec::new();

    crawler.visited.mark_visited(seed);
    let visit = crawler.visit(seed, 0).await;
    report.record(visit.page, visit.failure);
    if crawler.expands(0) {
        stack.push(Frame {
            depth: 1,
            links: visit.links.into_iter(),
        });
    }

    while let Some(frame) = stack.last_mut() {
        let depth = frame.depth;
        let next = frame.links.next();

        let Some(link) = next else {
            // every link on this page handled: back to the parent
            stack.pop();
            continue;
        };

        // Checked only now, after earlier siblings' subtrees were crawled
        if !crawler.should_follow(&link) {
            continue;
        }

        let visit = crawler.visit(&link, depth).await;
        report.record(visit.page, visit.failure);
        if crawler.expands(depth) {
            stack.push(Frame {
                depth: depth + 1,
                links: visit.links.into_iter(),
            });
        }
    }

    report
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an explicit stack instead of recursion?
//    - An async fn cannot call itself without boxing the future
//    - A deep link chain would grow the call stack without bound
//    - Vec<Frame> lives on the heap and can grow as large as needed
//
// 2. What is std::vec::IntoIter?
//    - The iterator you get from vec.into_iter()
//    - It owns the remaining items, so a frame can hand out one link at a
//      time and remember where it stopped
//
// 3. Why check should_follow() so late?
//    - A sibling may be reached through an earlier sibling's subtree
//    - Checking at the moment we get to it means it is fetched only once
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::filter::ScopeMode;
    use crate::fetch::mock::MockFetcher;

    fn crawler(fetcher: Arc<MockFetcher>, scope: &str) -> Crawler {
        Crawler {
            scope: ScopePattern::new(scope, ScopeMode::Regex).unwrap(),
            visited: Arc::new(VisitedSet::new()),
            fetcher,
            visit_log: None,
            max_depth: None,
            fetch_timeout: Duration::from_secs(5),
        }
    }

    fn urls(pages: &[VisitedPage]) -> Vec<&str> {
        pages.iter().map(|p| p.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_visits_in_recursive_preorder() {
        // a -> [b, c], b -> [d], c -> [d]
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/a", &["http://s.com/b", "http://s.com/c"])
                .page("http://s.com/b", &["http://s.com/d"])
                .page("http://s.com/c", &["http://s.com/d"])
                .page("http://s.com/d", &[]),
        );
        let crawler = crawler(fetcher.clone(), "s.com");

        let pages = crawl_depth_first(&crawler, "http://s.com/a").await.pages;

        assert_eq!(
            urls(&pages),
            vec!["http://s.com/a", "http://s.com/b", "http://s.com/d", "http://s.com/c"]
        );
        assert_eq!(pages[2].depth, 2);
        assert_eq!(pages[3].depth, 1);
        assert_eq!(fetcher.call_count("http://s.com/d"), 1);
    }

    #[tokio::test]
    async fn test_cycle_terminates_with_each_page_once() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/a", &["http://s.com/b"])
                .page("http://s.com/b", &["http://s.com/a"]),
        );
        let crawler = crawler(fetcher.clone(), "s.com");

        let pages = crawl_depth_first(&crawler, "http://s.com/a").await.pages;

        assert_eq!(urls(&pages), vec!["http://s.com/a", "http://s.com/b"]);
        assert_eq!(crawler.visited.len(), 2);
        assert_eq!(fetcher.call_count("http://s.com/a"), 1);
        assert_eq!(fetcher.call_count("http://s.com/b"), 1);
    }

    #[tokio::test]
    async fn test_self_link_is_not_refetched() {
        let fetcher = Arc::new(MockFetcher::new().page("http://s.com/", &["http://s.com/"]));
        let crawler = crawler(fetcher.clone(), "s.com");

        let pages = crawl_depth_first(&crawler, "http://s.com/").await.pages;

        assert_eq!(pages.len(), 1);
        assert_eq!(fetcher.call_count("http://s.com/"), 1);
    }

    #[tokio::test]
    async fn test_failed_child_does_not_stop_siblings() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/a", &["http://s.com/b", "http://s.com/c"])
                .failing("http://s.com/b")
                .page("http://s.com/c", &[]),
        );
        let crawler = crawler(fetcher.clone(), "s.com");

        let report = crawl_depth_first(&crawler, "http://s.com/a").await;

        assert_eq!(
            urls(&report.pages),
            vec!["http://s.com/a", "http://s.com/b", "http://s.com/c"]
        );
        assert_eq!(report.failed_count(), 1);
        assert!(report.error_for("http://s.com/b").is_some());
        assert!(report.error_for("http://s.com/c").is_none());
    }

    #[tokio::test]
    async fn test_panicking_fetch_is_recorded_and_siblings_still_crawled() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/", &["http://s.com/p1", "http://s.com/c", "http://s.com/p2"])
                .panicking("http://s.com/p1")
                .panicking("http://s.com/p2")
                .page("http://s.com/c", &["http://s.com/d"])
                .page("http://s.com/d", &[]),
        );
        let crawler = crawler(fetcher.clone(), "s.com");

        let report = crawl_depth_first(&crawler, "http://s.com/").await;

        assert_eq!(
            urls(&report.pages),
            vec![
                "http://s.com/",
                "http://s.com/p1",
                "http://s.com/c",
                "http://s.com/d",
                "http://s.com/p2",
            ]
        );
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.error_for("http://s.com/p1"), Some("fetch panicked"));
        assert_eq!(report.error_for("http://s.com/p2"), Some("fetch panicked"));
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_filtered_links_are_neither_fetched_nor_marked() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page(
                    "http://s.com/",
                    &["http://other.com/x", "http://s.com/doc.pdf", "http://s.com/ok"],
                )
                .page("http://s.com/ok", &[]),
        );
        let crawler = crawler(fetcher.clone(), "s.com");

        crawl_depth_first(&crawler, "http://s.com/").await;

        assert_eq!(fetcher.calls(), vec!["http://s.com/", "http://s.com/ok"]);
        assert!(!crawler.visited.has_visited("http://other.com/x"));
        assert!(!crawler.visited.has_visited("http://s.com/doc.pdf"));
    }

    #[tokio::test]
    async fn test_discovered_links_are_normalized() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://example.com/", &["http://EXAMPLE.com", "HTTP://Example.COM/Page"])
                .page("http://example.com/page", &[]),
        );
        let crawler = crawler(fetcher.clone(), "example.com");

        let pages = crawl_depth_first(&crawler, "http://example.com/").await.pages;

        assert_eq!(urls(&pages), vec!["http://example.com/", "http://example.com/page"]);
        assert_eq!(fetcher.call_count("http://example.com/"), 1);
    }

    #[tokio::test]
    async fn test_max_depth_limits_expansion() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/0", &["http://s.com/1"])
                .page("http://s.com/1", &["http://s.com/2"])
                .page("http://s.com/2", &["http://s.com/3"]),
        );
        let mut crawler = crawler(fetcher.clone(), "s.com");
        crawler.max_depth = Some(1);

        let pages = crawl_depth_first(&crawler, "http://s.com/0").await.pages;

        assert_eq!(urls(&pages), vec!["http://s.com/0", "http://s.com/1"]);
        assert!(!crawler.visited.has_visited("http://s.com/2"));
    }

    #[tokio::test]
    async fn test_slow_fetch_times_out_and_counts_as_failure() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page("http://s.com/", &["http://s.com/slow", "http://s.com/fast"])
                .page("http://s.com/slow", &["http://s.com/hidden"])
                .slow("http://s.com/slow", Duration::from_secs(30))
                .page("http://s.com/fast", &[]),
        );
        let mut crawler = crawler(fetcher.clone(), "s.com");
        crawler.fetch_timeout = Duration::from_millis(50);

        let report = crawl_depth_first(&crawler, "http://s.com/").await;

        assert_eq!(
            urls(&report.pages),
            vec!["http://s.com/", "http://s.com/slow", "http://s.com/fast"]
        );
        assert!(report.error_for("http://s.com/slow").unwrap().starts_with("timed out"));
        assert!(!crawler.visited.has_visited("http://s.com/hidden"));
    }
}
