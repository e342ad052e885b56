//! Error types for the contribot ports.
//!
//! Each port trait in [`crate::ports`] has its own error enum here so that
//! adapters can report failures without the domain depending on their
//! transport crates. None of these are retried: callers either fall back,
//! skip the item, or halt the run.

use std::path::PathBuf;

use thiserror::Error;

/// Longest response body kept in a `Status` error message, in bytes.
pub const MAX_ERROR_BODY: usize = 512;

/// Decodes an error response body for a `Status` message, cut to at most
/// [`MAX_ERROR_BODY`] bytes on a character boundary.
pub fn error_body_excerpt(body: &[u8]) -> String {
    let mut message = String::from_utf8_lossy(body).into_owned();
    if message.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    message
}

// ---------------------------------------------------------------------------
// Text generation
// ---------------------------------------------------------------------------

/// A failed call to the remote generative-text service.
///
/// Every variant is recoverable from the caller's point of view: the daily
/// job falls back to canned content and the issue job skips the issue.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never produced an HTTP response (DNS, TLS, timeout).
    #[error("Generator request failed: {message}")]
    Transport {
        /// Description from the HTTP client.
        message: String,
    },

    /// The service answered with a non-success status (quota, bad key, outage).
    #[error("Generator returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase, for diagnostics.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Generator response could not be decoded: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },

    /// The service answered but produced no text (e.g. a blocked prompt).
    #[error("Generator returned no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Issue tracking
// ---------------------------------------------------------------------------

/// A failed call to the issue-tracking REST API.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request never produced an HTTP response.
    #[error("Issue tracker request failed: {message}")]
    Transport {
        /// Description from the HTTP client.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("Issue tracker returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase, for diagnostics.
        message: String,
    },

    /// The response body could not be decoded into issues.
    #[error("Issue tracker response could not be decoded: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Local persistence
// ---------------------------------------------------------------------------

/// A failure reading or writing the local record file or rendered documents.
///
/// Unlike the remote errors above these halt the run: the daily job cannot
/// claim a contribution it failed to record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or renaming a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The record file exists but is not a valid contribution log.
    ///
    /// There is no automatic recovery; an operator must repair or remove the
    /// file before the next run.
    #[error("Record file {} is malformed: {source}", .path.display())]
    Corrupt {
        /// The record file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory log could not be encoded.
    #[error("Failed to encode contribution log: {0}")]
    Encode(#[source] serde_json::Error),
}
