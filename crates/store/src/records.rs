//! JSON-file backed [`ContributionStore`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use activity::{
    ContributionDate, ContributionLog, ContributionRecord, ContributionStore, StoreError,
    Timestamp,
};
use tracing::debug;

use crate::atomic::write_atomically;

/// Default location of the record file relative to the workspace root.
pub const RECORD_FILE: &str = "data/contributions.json";

/// The contribution log persisted as one pretty-printed JSON document.
///
/// Every [`append`](ContributionStore::append) reads the whole file, adds one
/// record, and replaces the file. There is a single writer per run and no
/// locking between runs.
#[derive(Debug, Clone)]
pub struct JsonContributionStore {
    path: PathBuf,
}

impl JsonContributionStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`RECORD_FILE`] under `root`.
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(RECORD_FILE))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContributionStore for JsonContributionStore {
    fn load(&self) -> Result<ContributionLog, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No record file yet; starting empty");
                return Ok(ContributionLog::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn append(
        &self,
        date: ContributionDate,
        at: Timestamp,
    ) -> Result<ContributionRecord, StoreError> {
        let mut log = self.load()?;
        let record = ContributionRecord::daily(date, at);
        log.push(record.clone());

        let json = serde_json::to_string_pretty(&log).map_err(StoreError::Encode)?;
        write_atomically(&self.path, json.as_bytes())?;

        debug!(
            path = %self.path.display(),
            records = log.len(),
            %date,
            "Appended contribution record"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn ts(h: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap())
    }

    fn new_year() -> ContributionDate {
        ContributionDate::from_ymd(2024, 1, 1).unwrap()
    }

    #[test]
    fn missing_file_counts_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());

        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn first_append_creates_file_with_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());

        store.append(new_year(), ts(9)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let records = written["contributions"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["date"], "2024-01-01");
        assert_eq!(records[0]["type"], "daily_contribution");
        assert_eq!(records[0]["timestamp"], "2024-01-01T09:00:00Z");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn each_append_adds_exactly_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());

        for n in 0..4 {
            assert_eq!(store.count().unwrap(), n);
            store.append(new_year(), ts(n as u32)).unwrap();
            assert_eq!(store.count().unwrap(), n + 1);
        }
    }

    #[test]
    fn same_day_reruns_are_not_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());

        store.append(new_year(), ts(8)).unwrap();
        store.append(new_year(), ts(20)).unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.len(), 2);
        let records: Vec<_> = log.records().collect();
        assert!(records.iter().all(|r| r.date == new_year()));
        assert!(records[0].timestamp < records[1].timestamp);
    }

    #[test]
    fn malformed_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.count(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(
            store.append(new_year(), ts(1)),
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn reads_logs_with_offsetless_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"contributions": [{"date": "2023-12-31", "timestamp": "2023-12-31T10:11:12.345678", "type": "daily_contribution"}]}"#,
        )
        .unwrap();

        store.append(new_year(), ts(9)).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn append_keeps_unknown_record_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"streak": 4, "contributions": [{"date": "2023-12-31", "timestamp": "2023-12-31T10:00:00Z", "type": "daily_contribution", "note": "keep me"}]}"#,
        )
        .unwrap();

        store.append(new_year(), ts(9)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(written["streak"], 4);
        assert_eq!(written["contributions"][0]["note"], "keep me");
        assert_eq!(written["contributions"][1]["date"], "2024-01-01");
    }

    #[test]
    fn entries_of_other_kinds_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonContributionStore::in_root(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"contributions": [{"date": "2023-12-30", "timestamp": "2023-12-30T10:00:00Z", "type": "manual"}, {"date": "2023-12-31"}]}"#,
        )
        .unwrap();

        assert_eq!(store.count().unwrap(), 2);
        store.append(new_year(), ts(9)).unwrap();
        assert_eq!(store.count().unwrap(), 3);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(written["contributions"][0]["type"], "manual");
        assert_eq!(
            written["contributions"][1],
            serde_json::json!({"date": "2023-12-31"})
        );
    }
}
