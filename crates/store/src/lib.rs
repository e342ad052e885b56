//! contribot filesystem adapter.
//!
//! Implements the [`activity::ContributionStore`] and [`activity::DocumentSink`]
//! ports over plain files under the repository root:
//!
//! ```text
//! <root>/
//!   data/contributions.json               # JsonContributionStore
//!   contributions/daily_logs/<date>.md    # FsDocumentSink::write_daily_log
//!   README.md                             # FsDocumentSink::write_summary
//! ```
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Paths, JSON encoding, and replace-on-write live here.
//! The [`activity`] crate sees only the port traits.

mod atomic;
pub mod documents;
pub mod records;

pub use documents::{FsDocumentSink, DAILY_LOG_DIR, SUMMARY_FILE};
pub use records::{JsonContributionStore, RECORD_FILE};
