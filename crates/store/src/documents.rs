//! Filesystem [`DocumentSink`]: daily logs and the README.

use std::path::{Path, PathBuf};

use activity::{ContributionDate, DocumentSink, StoreError};
use tracing::debug;

use crate::atomic::write_atomically;

/// Directory holding one markdown file per day, relative to the root.
pub const DAILY_LOG_DIR: &str = "contributions/daily_logs";

/// The summary document, relative to the root.
pub const SUMMARY_FILE: &str = "README.md";

/// Writes rendered documents under a repository root.
#[derive(Debug, Clone)]
pub struct FsDocumentSink {
    root: PathBuf,
}

impl FsDocumentSink {
    /// Sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the daily log for `date`.
    pub fn daily_log_path(&self, date: ContributionDate) -> PathBuf {
        self.root.join(DAILY_LOG_DIR).join(format!("{date}.md"))
    }

    /// Path of the summary document.
    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    /// The root all paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSink for FsDocumentSink {
    fn write_daily_log(
        &self,
        date: ContributionDate,
        document: &str,
    ) -> Result<PathBuf, StoreError> {
        let path = self.daily_log_path(date);
        write_atomically(&path, document.as_bytes())?;
        debug!(path = %path.display(), "Wrote daily log");
        Ok(path)
    }

    fn write_summary(&self, document: &str) -> Result<PathBuf, StoreError> {
        let path = self.summary_path();
        write_atomically(&path, document.as_bytes())?;
        debug!(path = %path.display(), "Wrote summary");
        Ok(path)
    }
}
