//! The daily contribution run.

use std::path::PathBuf;
use std::sync::Arc;

use activity::{
    render, Clock, ContentSource, ContributionDate, ContributionStore, DocumentSink, StoreError,
};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors that abort a daily run.
///
/// Remote generation failures never appear here; they degrade to canned
/// content inside [`ContentSource::daily_tip`].
#[derive(Debug, Error)]
pub enum JobError {
    /// Reading or writing local files failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What one daily run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    /// The day the run was for.
    pub date: ContributionDate,
    /// Where the daily log was written.
    pub log_path: PathBuf,
    /// Where the summary was written.
    pub summary_path: PathBuf,
    /// The contribution number shown in the daily log.
    pub sequence: usize,
    /// Records persisted after this run.
    pub total: usize,
}

/// Writes one daily log and updates the record file and summary.
pub struct DailyJob<S, D> {
    content: ContentSource,
    store: S,
    sink: D,
    clock: Arc<dyn Clock>,
}

impl<S, D> DailyJob<S, D>
where
    S: ContributionStore,
    D: DocumentSink,
{
    /// Wires a job from its collaborators.
    pub fn new(content: ContentSource, store: S, sink: D, clock: Arc<dyn Clock>) -> Self {
        Self {
            content,
            store,
            sink,
            clock,
        }
    }

    /// Runs once.
    ///
    /// Order: content, prior count, daily log, record append, summary. A
    /// store failure stops the run at that step; files already written stay.
    #[instrument(skip_all, fields(remote = self.content.is_remote()))]
    pub async fn run(&self) -> Result<DailyReport, JobError> {
        let now = self.clock.now();
        let date = now.date();

        let content = self.content.daily_tip(date).await;
        let prior = self.store.count()?;
        let sequence = prior + 1;

        let document = render::daily_log(date, &content, prior, now);
        let log_path = self.sink.write_daily_log(date, &document)?;
        info!(path = %log_path.display(), sequence, "Created daily contribution");

        self.store.append(date, now)?;
        let total = self.store.count()?;

        let summary_path = self.sink.write_summary(&render::summary(total, date, now))?;
        info!(path = %summary_path.display(), total, "Updated summary");

        Ok(DailyReport {
            date,
            log_path,
            summary_path,
            sequence,
            total,
        })
    }
}
