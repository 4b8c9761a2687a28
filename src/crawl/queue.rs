// src/crawl/queue.rs
// =============================================================================
// The shared work queue used by the concurrent crawl.
//
// How it works:
// 1. push() adds a URL (already claimed in the VisitedSet) and bumps the
//    outstanding-work counter
// 2. Workers call next() to take a job; they wait if the queue is empty but
//    other workers still hold jobs (those jobs may discover more links)
// 3. When a worker is done with a job (children already pushed), it calls
//    complete(), which decrements the counter
// 4. When the counter reaches zero the crawl is quiescent: nothing queued,
//    nothing in flight. Every waiting worker is woken and next() returns None
//
// "Queue empty" alone is not enough to stop: a worker that is still fetching
// may be about to push ten new links.
//
// Rust concepts:
// - tokio::sync::Notify: wake sleeping tasks without holding a lock
// - AtomicUsize: lock-free counter shared by all workers
// - Drop guard: InFlight calls complete() even if the worker panics
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

// A URL waiting to be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Job {
    pub(crate) url: String,
    pub(crate) depth: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    jobs: Mutex<VecDeque<Job>>,
    // queued + in flight
    outstanding: AtomicUsize,
    notify: Notify,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn jobs(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn push(&self, job: Job) {
        // Counted before it becomes visible, so a worker can never see the
        // job while the counter still reads zero
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.jobs().push_back(job);
        self.notify.notify_one();
    }

    // Takes the next job, waiting for one if other workers are still busy
    //
    // Returns: None once the frontier is quiescent
    pub(crate) async fn next(&self) -> Option<Job> {
        loop {
            // Registered before checking, so a push or a final complete()
            // between the check and the await still wakes us
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let job = self.jobs().pop_front();
            if job.is_some() {
                return job;
            }
            if self.is_quiescent() {
                return None;
            }

            notified.await;
        }
    }

    /// Marks one job as finished.
    pub(crate) fn complete(&self) {
        if self.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }

    pub(crate) fn is_quiescent(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) == 0
    }
}

/// Calls [`Frontier::complete`] when dropped.
pub(crate) struct InFlight<'a>(pub(crate) &'a Frontier);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn job(url: &str) -> Job {
        Job {
            url: url.to_string(),
            depth: 0,
        }
    }

    #[tokio::test]
    async fn test_jobs_come_out_in_fifo_order() {
        let frontier = Frontier::new();
        frontier.push(job("a"));
        frontier.push(job("b"));

        assert_eq!(frontier.next().await, Some(job("a")));
        assert_eq!(frontier.next().await, Some(job("b")));
    }

    #[tokio::test]
    async fn test_empty_frontier_is_quiescent() {
        let frontier = Frontier::new();
        assert!(frontier.is_quiescent());
        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_quiescent_only_after_last_job_completes() {
        let frontier = Frontier::new();
        frontier.push(job("a"));

        let taken = frontier.next().await;
        assert!(taken.is_some());
        // Queue is empty but the job is still in flight
        assert!(!frontier.is_quiescent());

        frontier.complete();
        assert!(frontier.is_quiescent());
        assert_eq!(frontier.next().await, None);
    }

    #[tokio::test]
    async fn test_waiting_worker_receives_job_pushed_by_busy_worker() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(job("parent"));
        let parent = frontier.next().await;
        assert!(parent.is_some());

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.next().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.push(job("child"));
        frontier.complete();

        assert_eq!(waiter.await.unwrap(), Some(job("child")));
    }

    #[tokio::test]
    async fn test_waiting_workers_released_on_quiescence() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(job("only"));
        let _only = frontier.next().await;

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                tokio::spawn(async move { frontier.next().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(InFlight(&frontier));

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), None);
        }
    }
}
