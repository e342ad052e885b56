//! The issue analysis run.
//!
//! One pass of `fetch -> filter -> (analyze -> comment)* -> done`. Nothing is
//! remembered between runs, so an issue that stays open is analysed again the
//! next time the job runs.

use std::sync::Arc;

use activity::content::issue_prompt;
use activity::{render, triage, Clock, ContentSource, IssueTracker};
use tracing::{info, info_span, warn, Instrument};

/// What one issue run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueRunReport {
    /// Issues left after dropping pull requests and capping.
    pub considered: usize,
    /// Issues for which the generator produced an analysis.
    pub analysed: usize,
    /// Issues that received a comment.
    pub processed: usize,
}

/// Drafts and posts analyses for open issues.
pub struct IssueJob<T> {
    tracker: T,
    content: ContentSource,
    clock: Arc<dyn Clock>,
}

impl<T: IssueTracker> IssueJob<T> {
    /// Wires a job from its collaborators.
    pub fn new(tracker: T, content: ContentSource, clock: Arc<dyn Clock>) -> Self {
        Self {
            tracker,
            content,
            clock,
        }
    }

    /// Runs once. Remote failures are logged and never abort the run.
    pub async fn run(&self) -> IssueRunReport {
        let mut report = IssueRunReport::default();

        let listed = match self.tracker.list_open_issues().await {
            Ok(issues) => issues,
            Err(err) => {
                warn!(error = %err, "Failed to fetch open issues");
                Vec::new()
            }
        };

        let selected = triage::select_issues(listed);
        report.considered = selected.len();
        info!(considered = report.considered, "Selected issues");

        for issue in selected {
            let span = info_span!("issue", number = %issue.number);
            let posted = async {
                info!(title = %issue.title, "Processing issue");

                let Some(analysis) = self.content.complete(&issue_prompt(&issue)).await else {
                    info!("No analysis generated; skipping");
                    return (false, false);
                };

                let body = render::issue_comment(&analysis, self.clock.now());
                match self.tracker.comment(issue.number, &body).await {
                    Ok(()) => {
                        info!("Added analysis comment");
                        (true, true)
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to comment on issue");
                        (true, false)
                    }
                }
            }
            .instrument(span)
            .await;

            let (analysed, commented) = posted;
            report.analysed += usize::from(analysed);
            report.processed += usize::from(commented);
        }

        info!(processed = report.processed, "Issue run finished");
        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use activity::{
        FixedClock, GenerationError, Issue, IssueNumber, TextGenerator, Timestamp, TrackerError,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;

    struct FakeTracker {
        listing: Mutex<Option<Result<Vec<Issue>, TrackerError>>>,
        failing: HashSet<u64>,
        attempts: Mutex<Vec<u64>>,
        posted: Mutex<Vec<(u64, String)>>,
    }

    impl FakeTracker {
        fn listing(issues: Vec<Issue>) -> Self {
            Self::with_result(Ok(issues))
        }

        fn with_result(result: Result<Vec<Issue>, TrackerError>) -> Self {
            Self {
                listing: Mutex::new(Some(result)),
                failing: HashSet::new(),
                attempts: Mutex::new(Vec::new()),
                posted: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, numbers: &[u64]) -> Self {
            self.failing = numbers.iter().copied().collect();
            self
        }

        fn attempts(&self) -> Vec<u64> {
            self.attempts.lock().unwrap().clone()
        }

        fn posted_numbers(&self) -> Vec<u64> {
            self.posted.lock().unwrap().iter().map(|(n, _)| *n).collect()
        }
    }

    #[async_trait]
    impl IssueTracker for FakeTracker {
        async fn list_open_issues(&self) -> Result<Vec<Issue>, TrackerError> {
            self.listing
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn comment(&self, issue: IssueNumber, body: &str) -> Result<(), TrackerError> {
            let number = issue.as_u64();
            self.attempts.lock().unwrap().push(number);
            if self.failing.contains(&number) {
                return Err(TrackerError::Status {
                    status: 500,
                    message: "server error".into(),
                });
            }
            self.posted.lock().unwrap().push((number, body.to_owned()));
            Ok(())
        }
    }

    /// Answers every prompt unless it mentions one of the `silent` titles.
    struct FakeGenerator {
        silent: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn answering() -> Arc<Self> {
            Self::silent_on(Vec::new())
        }

        fn silent_on(silent: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                silent,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.silent.iter().any(|title| prompt.contains(title)) {
                return Err(GenerationError::EmptyResponse);
            }
            Ok("Check the config loader.".to_owned())
        }
    }

    fn issue(number: u64, is_pull_request: bool) -> Issue {
        Issue {
            number: IssueNumber::new(number),
            title: format!("Issue title {number}"),
            body: Some("details".into()),
            labels: Vec::new(),
            is_pull_request,
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(Timestamp::from_utc(
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        )))
    }

    #[tokio::test]
    async fn skips_pull_requests_and_caps_at_five() {
        let listed: Vec<_> = (1..=7).map(|n| issue(n, n == 2 || n == 5)).collect();
        let job = IssueJob::new(
            FakeTracker::listing(listed),
            ContentSource::Remote(FakeGenerator::answering()),
            clock(),
        );

        let report = job.run().await;

        assert_eq!(
            report,
            IssueRunReport {
                considered: 5,
                analysed: 5,
                processed: 5
            }
        );
        assert_eq!(job.tracker.posted_numbers(), vec![1, 3, 4, 6, 7]);
    }

    #[tokio::test]
    async fn comment_wraps_analysis_with_timestamp() {
        let job = IssueJob::new(
            FakeTracker::listing(vec![issue(9, false)]),
            ContentSource::Remote(FakeGenerator::answering()),
            clock(),
        );

        job.run().await;

        let posted = job.tracker.posted.lock().unwrap();
        let (_, body) = &posted[0];
        assert!(body.starts_with("## AI Analysis & Suggestions\n\nCheck the config loader.\n"));
        assert!(body.ends_with("*Generated on: 2024-05-06 07:08:09 UTC*\n"));
    }

    #[tokio::test]
    async fn comment_failure_does_not_stop_the_loop() {
        let listed: Vec<_> = (1..=4).map(|n| issue(n, false)).collect();
        let job = IssueJob::new(
            FakeTracker::listing(listed).failing_on(&[2]),
            ContentSource::Remote(FakeGenerator::answering()),
            clock(),
        );

        let report = job.run().await;

        assert_eq!(report.processed, 3);
        assert_eq!(report.analysed, 4);
        assert_eq!(job.tracker.attempts(), vec![1, 2, 3, 4]);
        assert_eq!(job.tracker.posted_numbers(), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn issues_without_analysis_are_skipped() {
        let listed: Vec<_> = (1..=3).map(|n| issue(n, false)).collect();
        let generator = FakeGenerator::silent_on(vec!["Issue title 2"]);
        let job = IssueJob::new(
            FakeTracker::listing(listed),
            ContentSource::Remote(generator.clone()),
            clock(),
        );

        let report = job.run().await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
        assert_eq!(report.analysed, 2);
        assert_eq!(report.processed, 2);
        assert_eq!(job.tracker.attempts(), vec![1, 3]);
    }

    #[tokio::test]
    async fn canned_source_never_comments() {
        let listed: Vec<_> = (1..=3).map(|n| issue(n, false)).collect();
        let job = IssueJob::new(FakeTracker::listing(listed), ContentSource::Canned, clock());

        let report = job.run().await;

        assert_eq!(report.considered, 3);
        assert_eq!(report.processed, 0);
        assert!(job.tracker.attempts().is_empty());
    }

    #[tokio::test]
    async fn listing_failure_processes_nothing() {
        let tracker = FakeTracker::with_result(Err(TrackerError::Transport {
            message: "connection reset".into(),
        }));
        let generator = FakeGenerator::answering();
        let job = IssueJob::new(tracker, ContentSource::Remote(generator.clone()), clock());

        let report = job.run().await;

        assert_eq!(report, IssueRunReport::default());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
