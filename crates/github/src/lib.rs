//! contribot GitHub infrastructure adapter.
//!
//! Implements the [`activity::IssueTracker`] trait over the GitHub REST API
//! (v3) with `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Endpoint
//! paths, authentication headers, and the JSON shape of issues are handled
//! here; the [`activity`] crate never sees them. Selecting which issues to
//! work on is [`activity::triage`]'s job, not this crate's.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`IssueTracker::list_open_issues`] | `GET /repos/{owner}/{name}/issues?state=open&per_page=30` |
//! | [`IssueTracker::comment`] | `POST /repos/{owner}/{name}/issues/{number}/comments` |
//!
//! Only the first page of the listing is read; the issue job never looks past
//! its first few issues. Nothing is retried.

use std::time::Duration;

use activity::{
    error_body_excerpt, Issue, IssueNumber, IssueTracker, LabelName, RepositoryId, TrackerError,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from the listing endpoint.
pub const ISSUES_PER_PAGE: u32 = 30;

/// Per-request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Errors raised while constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubError {
    /// The token contains bytes that are not valid in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for [`GithubClient`].
#[derive(Clone)]
pub struct GithubConfig {
    /// Personal access or installation token.
    pub token: String,
    /// Repository whose issues are read and commented on.
    pub repository: RepositoryId,
    /// REST base URL (`https://api.github.com` or a GHES `/api/v3` root).
    pub api_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GithubConfig {
    /// Settings for the public API.
    pub fn new(token: impl Into<String>, repository: RepositoryId) -> Self {
        Self {
            token: token.into(),
            repository,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the REST base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WireIssue {
    number: u64,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<WireLabel>,
    /// Present (and non-null) only on pull requests.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct WireLabel {
    name: String,
}

impl From<WireIssue> for Issue {
    fn from(wire: WireIssue) -> Self {
        Issue {
            number: IssueNumber::new(wire.number),
            title: wire.title,
            body: wire.body,
            labels: wire
                .labels
                .into_iter()
                .filter_map(|l| LabelName::new(l.name))
                .collect(),
            is_pull_request: wire.pull_request.is_some(),
        }
    }
}

#[derive(Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`IssueTracker`] for one GitHub repository.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    repository: RepositoryId,
}

impl GithubClient {
    /// Creates a client whose every request carries the token, the v3
    /// `Accept` header, and a `User-Agent` (GitHub rejects requests without one).
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("contribot/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            repository: config.repository,
        })
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/issues", self.api_url, self.repository)
    }

    fn comments_url(&self, issue: IssueNumber) -> String {
        format!("{}/repos/{}/issues/{issue}/comments", self.api_url, self.repository)
    }
}

fn transport(err: reqwest::Error) -> TrackerError {
    TrackerError::Transport {
        message: err.to_string(),
    }
}

/// Turns a non-2xx response into [`TrackerError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.map_err(transport)?;
    Err(TrackerError::Status {
        status: status.as_u16(),
        message: error_body_excerpt(&body),
    })
}

#[async_trait]
impl IssueTracker for GithubClient {
    #[instrument(skip_all, fields(repository = %self.repository))]
    async fn list_open_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        let response = self
            .http
            .get(self.issues_url())
            .query(&[("state", "open")])
            .query(&[("per_page", ISSUES_PER_PAGE)])
            .send()
            .await
            .map_err(transport)?;
        let body = check_status(response).await?.bytes().await.map_err(transport)?;

        let wire: Vec<WireIssue> =
            serde_json::from_slice(&body).map_err(|e| TrackerError::Decode {
                message: e.to_string(),
            })?;

        debug!(count = wire.len(), "Listed open issues");
        Ok(wire.into_iter().map(Issue::from).collect())
    }

    #[instrument(skip_all, fields(repository = %self.repository, issue = %issue))]
    async fn comment(&self, issue: IssueNumber, body: &str) -> Result<(), TrackerError> {
        let response = self
            .http
            .post(self.comments_url(issue))
            .json(&NewComment { body })
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        debug!("Posted comment");
        Ok(())
    }
}
