//! Port traits implemented by the infrastructure crates.
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`TextGenerator`] | `llm::GeminiProvider` |
//! | [`IssueTracker`] | `github::GithubClient` |
//! | [`ContributionStore`] | `store::JsonContributionStore` |
//! | [`DocumentSink`] | `store::FsDocumentSink` |
//! | [`Clock`] | [`SystemClock`], [`FixedClock`] |
//!
//! The remote ports are async and object-safe (via `async-trait`) so the
//! composition root can hold them as `Arc<dyn _>`. The filesystem ports are
//! synchronous: they touch a handful of small files once per run.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    ContributionDate, ContributionLog, ContributionRecord, GenerationError, Issue, IssueNumber,
    StoreError, Timestamp, TrackerError,
};

/// One-shot prompt-in, text-out generation. No conversation state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` once and returns the generated text.
    ///
    /// Implementations must not retry. An empty reply is reported as
    /// [`GenerationError::EmptyResponse`].
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Read open issues and post comments on one repository.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Lists open issues in the order the remote API returns them.
    ///
    /// Pull requests are included and flagged with `is_pull_request`.
    async fn list_open_issues(&self) -> Result<Vec<Issue>, TrackerError>;

    /// Posts `body` as a new comment on `issue`.
    async fn comment(&self, issue: IssueNumber, body: &str) -> Result<(), TrackerError>;
}

/// The persisted contribution log.
pub trait ContributionStore {
    /// Reads the whole log. A missing backing file is an empty log.
    fn load(&self) -> Result<ContributionLog, StoreError>;

    /// Number of records currently persisted.
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    /// Appends one daily record and rewrites the backing file.
    fn append(
        &self,
        date: ContributionDate,
        at: Timestamp,
    ) -> Result<ContributionRecord, StoreError>;
}

/// Destination for rendered markdown documents.
pub trait DocumentSink {
    /// Writes the log for `date`, replacing any earlier log for the same day.
    /// Returns the path written.
    fn write_daily_log(&self, date: ContributionDate, document: &str)
        -> Result<PathBuf, StoreError>;

    /// Replaces the repository summary. Returns the path written.
    fn write_summary(&self, document: &str) -> Result<PathBuf, StoreError>;
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current time. Swapped for [`FixedClock`] in tests so
/// rendered documents are reproducible.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: Timestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
