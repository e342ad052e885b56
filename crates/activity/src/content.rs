//! Content source: remote generation with a canned fallback.
//!
//! [`ContentSource`] is chosen once at startup. With a generator configured it
//! is [`ContentSource::Remote`]; otherwise [`ContentSource::Canned`]. Callers
//! never check for credentials themselves.
//!
//! The two operations differ in what happens when generation is unavailable:
//!
//! - [`ContentSource::daily_tip`] always returns text, drawing from
//!   [`FALLBACK_TIPS`] if needed.
//! - [`ContentSource::complete`] returns `None`, letting the issue job skip
//!   the issue rather than post canned text.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::{ContributionDate, Issue, TextGenerator};

/// Tips used when no generated text is available.
pub const FALLBACK_TIPS: [&str; 5] = [
    "Python tip: Use list comprehensions for cleaner, more readable code.",
    "Git tip: Use 'git stash' to temporarily save uncommitted changes.",
    "JavaScript tip: Use const for variables that won't be reassigned.",
    "SQL tip: Use EXPLAIN to analyze query performance.",
    "Linux tip: Use 'grep -r' to search recursively through directories.",
];

/// Where generated text comes from for this run.
#[derive(Clone)]
pub enum ContentSource {
    /// Ask the remote generator, once per call.
    Remote(Arc<dyn TextGenerator>),
    /// No generator configured.
    Canned,
}

impl std::fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(_) => f.write_str("ContentSource::Remote"),
            Self::Canned => f.write_str("ContentSource::Canned"),
        }
    }
}

impl ContentSource {
    /// Builds a source from an optional generator.
    pub fn from_generator(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        generator.map_or(Self::Canned, Self::Remote)
    }

    /// Returns `true` if a remote generator is configured.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Content for the daily log of `date`. Never empty.
    pub async fn daily_tip(&self, date: ContributionDate) -> String {
        match self.complete(&daily_prompt(date)).await {
            Some(text) => text,
            None => canned_tip().to_owned(),
        }
    }

    /// Sends `prompt` to the remote generator.
    ///
    /// Returns `None` for [`ContentSource::Canned`], on any generator error,
    /// and on a blank reply. Errors are logged and not retried.
    pub async fn complete(&self, prompt: &str) -> Option<String> {
        let Self::Remote(generator) = self else {
            debug!("No generator configured; skipping remote generation");
            return None;
        };

        match generator.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!("Generator returned blank text");
                None
            }
            Err(err) => {
                warn!(error = %err, "Generator call failed");
                None
            }
        }
    }
}

/// One of [`FALLBACK_TIPS`], chosen uniformly at random.
pub fn canned_tip() -> &'static str {
    FALLBACK_TIPS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_TIPS[0])
}

/// Prompt for the daily log content.
pub fn daily_prompt(date: ContributionDate) -> String {
    format!(
        "Generate a useful programming tip, code snippet, or interesting tech fact for date {date}.\n\
         Make it educational and practical. Include a brief explanation."
    )
}

/// Prompt asking for an analysis of `issue`.
pub fn issue_prompt(issue: &Issue) -> String {
    let body = issue
        .body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("(no description provided)");
    let labels = if issue.labels.is_empty() {
        "(none)".to_owned()
    } else {
        issue
            .labels
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Analyze this GitHub issue and provide a helpful solution or response:\n\
         \n\
         Title: {title}\n\
         Body: {body}\n\
         Labels: {labels}\n\
         \n\
         Provide:\n\
         1. A brief analysis of the problem\n\
         2. Suggested solution or approach\n\
         3. If it's a bug, provide debugging steps\n\
         4. If it's a feature request, provide implementation guidance\n\
         5. Any relevant code examples if applicable\n\
         \n\
         Keep the response helpful and professional.\n",
        title = issue.title,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{GenerationError, IssueNumber, LabelName};

    /// Generator that replays a fixed outcome and counts calls.
    struct ScriptedGenerator {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(reply: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(text.to_owned()),
                None => Err(GenerationError::Status {
                    status: 429,
                    message: "quota exceeded".into(),
                }),
            }
        }
    }

    fn date() -> ContributionDate {
        ContributionDate::from_ymd(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn canned_source_returns_a_fallback_tip() {
        let tip = ContentSource::Canned.daily_tip(date()).await;
        assert!(FALLBACK_TIPS.contains(&tip.as_str()));
    }

    #[tokio::test]
    async fn remote_source_returns_generated_text() {
        let generator = ScriptedGenerator::new(Some("Rust tip: prefer iterators."));
        let source = ContentSource::Remote(generator.clone());

        assert_eq!(source.daily_tip(date()).await, "Rust tip: prefer iterators.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_failure_falls_back_after_one_attempt() {
        let generator = ScriptedGenerator::new(None);
        let source = ContentSource::Remote(generator.clone());

        let tip = source.daily_tip(date()).await;
        assert!(FALLBACK_TIPS.contains(&tip.as_str()));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_reply_counts_as_no_text() {
        let source = ContentSource::Remote(ScriptedGenerator::new(Some("  \n")));

        assert_eq!(source.complete("anything").await, None);
        let tip = source.daily_tip(date()).await;
        assert!(FALLBACK_TIPS.contains(&tip.as_str()));
    }

    #[tokio::test]
    async fn complete_without_generator_is_none() {
        assert_eq!(ContentSource::Canned.complete("anything").await, None);
    }

    #[test]
    fn from_generator_selects_variant() {
        assert!(!ContentSource::from_generator(None).is_remote());
        let generator: Arc<dyn TextGenerator> = ScriptedGenerator::new(Some("x"));
        assert!(ContentSource::from_generator(Some(generator)).is_remote());
    }

    #[test]
    fn daily_prompt_embeds_the_date() {
        assert!(daily_prompt(date()).contains("for date 2024-01-01."));
    }

    #[test]
    fn issue_prompt_embeds_title_body_and_labels() {
        let issue = Issue {
            number: IssueNumber::new(7),
            title: "Crash on startup".into(),
            body: Some("Segfault when config is empty".into()),
            labels: vec![LabelName::new("bug").unwrap(), LabelName::new("p1").unwrap()],
            is_pull_request: false,
        };

        let prompt = issue_prompt(&issue);
        assert!(prompt.contains("Title: Crash on startup\n"));
        assert!(prompt.contains("Body: Segfault when config is empty\n"));
        assert!(prompt.contains("Labels: bug, p1\n"));
    }

    #[test]
    fn issue_prompt_handles_missing_body_and_labels() {
        let issue = Issue {
            number: IssueNumber::new(8),
            title: "Question".into(),
            body: None,
            labels: Vec::new(),
            is_pull_request: false,
        };

        let prompt = issue_prompt(&issue);
        assert!(prompt.contains("Body: (no description provided)\n"));
        assert!(prompt.contains("Labels: (none)\n"));
    }
}
