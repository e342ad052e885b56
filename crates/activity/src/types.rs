//! Shared value types for the contribot domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the data the two jobs actually move around: dated contribution records, the
//! log that holds them, and the read-only view of a GitHub issue.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{IssueNumber, LabelName};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly. Serialises as an RFC 3339 string. Deserialisation also accepts
/// an ISO 8601 date-time without an offset, which is read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// The calendar date of this instant in UTC.
    pub fn date(self) -> ContributionDate {
        ContributionDate(self.0.date_naive())
    }

    /// Time of day as `HH:MM:SS`.
    pub fn clock_time(self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self(naive.and_utc()))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------

/// A calendar day, serialised as `YYYY-MM-DD`.
///
/// One daily log file exists per [`ContributionDate`]; the date also keys the
/// file name under `contributions/daily_logs/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionDate(NaiveDate);

impl ContributionDate {
    /// Creates a date from year, month and day, returning `None` if the
    /// combination is not a real calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the underlying [`NaiveDate`].
    pub fn as_naive_date(self) -> NaiveDate {
        self.0
    }

    /// Long form such as `January 01, 2024`.
    pub fn long_form(self) -> String {
        self.0.format("%B %d, %Y").to_string()
    }

    /// Full weekday name such as `Monday`.
    pub fn weekday_name(self) -> String {
        self.0.format("%A").to_string()
    }
}

impl std::fmt::Display for ContributionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ---------------------------------------------------------------------------
// Contribution records
// ---------------------------------------------------------------------------

/// Tag stored in the `type` field of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Written once per daily job run.
    DailyContribution,
}

/// One logged daily contribution. Never mutated once appended.
///
/// Fields other than `date`, `timestamp` and `type` are kept in `extra` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// The day the contribution was made for.
    pub date: ContributionDate,

    /// The instant the record was appended.
    pub timestamp: Timestamp,

    /// Always [`RecordKind::DailyContribution`] for records this crate writes.
    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Unrecognised fields found on read.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContributionRecord {
    /// Creates a daily contribution record.
    pub fn daily(date: ContributionDate, timestamp: Timestamp) -> Self {
        Self {
            date,
            timestamp,
            kind: RecordKind::DailyContribution,
            extra: serde_json::Map::new(),
        }
    }
}

/// One element of the `contributions` array.
///
/// Entries that do not parse as a [`ContributionRecord`] (another `type`, a
/// missing field) still count as contributions and are written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum LogEntry {
    Record(ContributionRecord),
    Foreign(serde_json::Value),
}

// ---------------------------------------------------------------------------

/// The full persisted history: `{"contributions": [...]}`.
///
/// Records keep append order. Dates are not deduplicated; rerunning the daily
/// job on the same day adds a second record for that day. Top-level keys other
/// than `contributions` are carried through unchanged so a rewrite never drops
/// data this crate does not understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionLog {
    #[serde(default)]
    contributions: Vec<LogEntry>,

    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ContributionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the log, including ones this crate cannot parse.
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// Returns `true` if no record has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Parsed records in append order, skipping foreign entries.
    pub fn records(&self) -> impl Iterator<Item = &ContributionRecord> {
        self.contributions.iter().filter_map(|entry| match entry {
            LogEntry::Record(record) => Some(record),
            LogEntry::Foreign(_) => None,
        })
    }

    /// Appends a record to the end of the log.
    pub fn push(&mut self, record: ContributionRecord) {
        self.contributions.push(LogEntry::Record(record));
    }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// A GitHub issue as seen by the issue job. Never persisted locally.
///
/// GitHub's issue listing also returns pull requests; those arrive with
/// `is_pull_request` set and are dropped by [`crate::triage::select_issues`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The issue number within its repository.
    pub number: IssueNumber,

    /// Issue title.
    pub title: String,

    /// Issue body in markdown. `None` when the author left it blank.
    pub body: Option<String>,

    /// Names of the labels attached to the issue.
    pub labels: Vec<LabelName>,

    /// `true` if the entry is actually a pull request.
    pub is_pull_request: bool,
}
