//! contribot composition root.
//!
//! Shared by the two binaries. Responsibilities:
//!
//! 1. **Read configuration** — [`config`] turns environment variables into
//!    explicit config values once, at startup.
//! 2. **Wire observability** — [`telemetry`] installs the `tracing`
//!    subscriber (text or JSON on stderr, optional OTLP span export).
//! 3. **Construct infrastructure** — create the concrete adapters
//!    (`GeminiProvider`, `GithubClient`, `JsonContributionStore`,
//!    `FsDocumentSink`) and inject them into the jobs.
//! 4. **Select the content source** — [`ContentSource::Remote`] when a
//!    generator is configured, [`ContentSource::Canned`] otherwise.

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use activity::{ContentSource, RunId, SystemClock, TextGenerator};
use anyhow::Context;
use github::GithubClient;
use jobs::{DailyJob, DailyReport, IssueJob, IssueRunReport};
use llm::{GeminiConfig, GeminiProvider};
use store::{FsDocumentSink, JsonContributionStore};
use tracing::{info, info_span, Instrument};

use crate::config::{DailyConfig, IssueConfig};

fn content_source(generator: Option<GeminiConfig>) -> anyhow::Result<ContentSource> {
    let Some(config) = generator else {
        info!("No generator configured; using canned content");
        return Ok(ContentSource::Canned);
    };
    info!(model = %config.model, "Using remote generator");
    let provider: Arc<dyn TextGenerator> =
        Arc::new(GeminiProvider::new(config).context("failed to construct generator")?);
    Ok(ContentSource::Remote(provider))
}

/// Runs the daily job once against `config.root`.
pub async fn run_daily(config: DailyConfig) -> anyhow::Result<DailyReport> {
    let span = info_span!("daily_contributor", run_id = %RunId::new_random());
    async move {
        let content = content_source(config.generator)?;
        let job = DailyJob::new(
            content,
            JsonContributionStore::in_root(&config.root),
            FsDocumentSink::new(&config.root),
            Arc::new(SystemClock),
        );
        job.run().await.context("daily contribution failed")
    }
    .instrument(span)
    .await
}

/// Runs the issue job once. Without GitHub settings nothing is processed.
pub async fn run_issues(config: IssueConfig) -> anyhow::Result<IssueRunReport> {
    let span = info_span!("issue_solver", run_id = %RunId::new_random());
    async move {
        let Some(github) = config.github else {
            info!("GitHub token or repository not configured; nothing to do");
            return Ok(IssueRunReport::default());
        };
        let content = content_source(config.generator)?;
        let tracker = GithubClient::new(github).context("failed to construct GitHub client")?;

        let job = IssueJob::new(tracker, content, Arc::new(SystemClock));
        Ok(job.run().await)
    }
    .instrument(span)
    .await
}
