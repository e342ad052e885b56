//! Core domain for contribot.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! port trait, and error type shared by the two jobs. Infrastructure crates
//! implement the traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `RepositoryId`, `RunId`, etc.) |
//! | [`types`] | Value types (`ContributionRecord`, `ContributionLog`, `Issue`, `Timestamp`) |
//! | [`errors`] | Per-port error types |
//! | [`ports`] | Traits implemented by the adapters, plus the `Clock` port |
//! | [`content`] | Remote-or-canned content source and prompt templates |
//! | [`render`] | Markdown templates for the daily log, README, and issue comments |
//! | [`triage`] | Issue selection for one run |

pub mod content;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod render;
pub mod triage;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use content::{ContentSource, FALLBACK_TIPS};
pub use errors::{error_body_excerpt, GenerationError, StoreError, TrackerError, MAX_ERROR_BODY};
pub use identifiers::{IssueNumber, LabelName, ModelName, RepositoryId, RunId};
pub use ports::{
    Clock, ContributionStore, DocumentSink, FixedClock, IssueTracker, SystemClock, TextGenerator,
};
pub use triage::MAX_ISSUES_PER_RUN;
pub use types::{
    ContributionDate, ContributionLog, ContributionRecord, Issue, RecordKind, Timestamp,
};
