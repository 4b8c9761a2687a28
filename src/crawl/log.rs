// src/crawl/log.rs
// =============================================================================
// Optional debug log of crawled URLs.
//
// Each URL is appended on its own line just before it is fetched. The file is
// a side channel for humans: nothing reads it back, and a failed write only
// produces a warning.
// =============================================================================

use crate::error::CrawlError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

#[derive(Debug)]
pub struct VisitLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl VisitLog {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, CrawlError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CrawlError::VisitLog {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn record(&self, url: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(file, "{}", url) {
            warn!(path = %self.path.display(), error = %e, "failed to write visit log");
        }
    }
}
