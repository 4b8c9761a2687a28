// src/crawl/pool.rs
// =============================================================================
// Concurrent crawl: a fixed number of workers draining a shared Frontier.
//
// Each worker loops: take a job, fetch it (with its own timeout), claim and
// push the eligible links it found, mark the job complete. The VisitedSet
// insert is atomic, so two workers discovering the same link cannot both
// queue it. A failed or panicking fetch only affects its own job: it is
// recorded as a failure and the worker moves on. Should a worker task still
// die, it is reported and the remaining workers finish the crawl.
//
// Visit order is not depth-first here; the set of visited pages is the same
// as the sequential crawl's when no depth limit is set.
// =============================================================================

use super::engine::Crawler;
use super::queue::{Frontier, InFlight, Job};
use super::report::CrawlReport;
use futures::future::join_all;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error};

// Crawls from `seed` with `workers` concurrent tasks
//
// Returns once the frontier is quiescent, with every attempted page in
// completion order.
pub(crate) async fn crawl_with_workers(
    crawler: Arc<Crawler>,
    seed: String,
    workers: usize,
) -> CrawlReport {
    let frontier = Arc::new(Frontier::new());
    let report = Arc::new(Mutex::new(CrawlReport::new(&seed)));

    crawler.visited.mark_visited(&seed);
    frontier.push(Job {
        url: seed,
        depth: 0,
    });

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            tokio::spawn(worker(
                id,
                Arc::clone(&crawler),
                Arc::clone(&frontier),
                Arc::clone(&report),
            ))
        })
        .collect();

    for (id, result) in join_all(handles).await.into_iter().enumerate() {
        if let Err(e) = result {
            error!(worker = id, error = %e, "crawl worker stopped abnormally");
        }
    }

    let finished = std::mem::take(&mut *report.lock().unwrap_or_else(PoisonError::into_inner));
    finished
}

async fn worker(
    id: usize,
    crawler: Arc<Crawler>,
    frontier: Arc<Frontier>,
    report: Arc<Mutex<CrawlReport>>,
) {
    while let Some(job) = frontier.next().await {
        let _in_flight = InFlight(&frontier);

        let visit = crawler.visit(&job.url, job.depth).await;

        if crawler.expands(job.depth) {
            for link in visit.links {
                if crawler.should_follow(&link) {
                    frontier.push(Job {
                        url: link,
                        depth: job.depth + 1,
                    });
                }
            }
        }

        report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(visit.page, visit.failure);
    }

    debug!(worker = id, "worker idle, crawl quiescent");
}
