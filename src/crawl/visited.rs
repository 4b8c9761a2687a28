// src/crawl/visited.rs
// =============================================================================
// The set of URLs a crawl has already claimed.
//
// Invariants:
// - A URL is never removed once added; the set only grows.
// - "Check, then mark" happens under one lock, so two workers racing on the
//   same link cannot both see it as new. insert() is the primitive the
//   engine uses; has_visited()/mark_visited() are kept for inspection and for
//   callers that are strictly sequential.
//
// Rust concepts:
// - Mutex<HashSet>: interior mutability, so a shared &VisitedSet (or an
//   Arc<VisitedSet> across tasks) can still be written to
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe set of normalized URLs.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds a valid set: HashSet::insert cannot leave
    // it half-written, so we keep using it.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically adds `url`, returning true if it was not there before.
    pub fn insert(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    pub fn has_visited(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Marks `url` as visited. Re-marking is a silent no-op.
    pub fn mark_visited(&self, url: &str) {
        self.insert(url);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of every visited URL.
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }
}
