//! contribot job orchestration.
//!
//! This crate provides the two runs the binaries execute:
//!
//! - [`DailyJob`] — generate content, render the daily log, append a record,
//!   and refresh the README summary.
//! - [`IssueJob`] — list open issues, draft an analysis for up to
//!   [`activity::MAX_ISSUES_PER_RUN`] of them, and post each as a comment.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Jobs sequence calls between business logic in the
//! [`activity`] crate and the port traits. They contain no domain rules of
//! their own, and they hold no state between runs.

pub mod daily;
pub mod issues;

pub use daily::{DailyJob, DailyReport, JobError};
pub use issues::{IssueJob, IssueRunReport};
