//! Configuration read from environment variables.
//!
//! Every variable is read exactly once, here, into plain config values that
//! are handed to the adapters at construction. Nothing below this module
//! looks at the environment.
//!
//! Empty values are treated as unset: CI systems commonly expand a missing
//! secret to an empty string.

use std::path::PathBuf;

use activity::{ModelName, RepositoryId};
use github::GithubConfig;
use llm::GeminiConfig;
use thiserror::Error;

/// Generator credential. Unset means canned content only.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Generator model override.
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Generator base URL override.
pub const GEMINI_API_URL: &str = "GEMINI_API_URL";
/// GitHub token.
pub const GH_TOKEN: &str = "GH_TOKEN";
/// Fallback GitHub token, as exported by GitHub Actions.
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Repository in `owner/name` form.
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
/// GitHub REST base URL override.
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
/// Directory the daily job writes into.
pub const CONTRIBOT_ROOT: &str = "CONTRIBOT_ROOT";
/// `json` selects JSON log lines.
pub const CONTRIBOT_LOG_FORMAT: &str = "CONTRIBOT_LOG_FORMAT";
/// Enables span export when set.
pub const OTEL_EXPORTER_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// A variable is set but its value cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The value does not have the expected shape.
    #[error("{var} is invalid: expected {expected}, got '{value}'")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// Human description of a valid value.
        expected: &'static str,
    },
}

/// Reads one variable. Tests pass a closure over a map instead of the
/// process environment.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// The process environment as a [`Lookup`].
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Generator settings, or `None` when no API key is configured.
pub fn generator_config(lookup: Lookup<'_>) -> Result<Option<GeminiConfig>, ConfigError> {
    let Some(api_key) = non_empty(lookup, GEMINI_API_KEY) else {
        return Ok(None);
    };

    let raw_model =
        non_empty(lookup, GEMINI_MODEL).unwrap_or_else(|| llm::DEFAULT_MODEL.to_owned());
    let model = ModelName::new(raw_model.trim()).ok_or_else(|| ConfigError::Invalid {
        var: GEMINI_MODEL,
        value: raw_model.clone(),
        expected: "a model name",
    })?;

    let mut config = GeminiConfig::new(api_key, model);
    if let Some(url) = non_empty(lookup, GEMINI_API_URL) {
        config = config.with_base_url(url);
    }
    Ok(Some(config))
}

/// GitHub settings, or `None` when the token or repository is missing.
///
/// A repository value that is present but not `owner/name` is an error
/// rather than a silent no-op.
pub fn github_config(lookup: Lookup<'_>) -> Result<Option<GithubConfig>, ConfigError> {
    let repository = match non_empty(lookup, GITHUB_REPOSITORY) {
        Some(raw) => Some(RepositoryId::new(raw.trim()).ok_or(ConfigError::Invalid {
            var: GITHUB_REPOSITORY,
            value: raw,
            expected: "owner/name",
        })?),
        None => None,
    };
    let token = non_empty(lookup, GH_TOKEN).or_else(|| non_empty(lookup, GITHUB_TOKEN));

    let (Some(token), Some(repository)) = (token, repository) else {
        return Ok(None);
    };

    let mut config = GithubConfig::new(token, repository);
    if let Some(url) = non_empty(lookup, GITHUB_API_URL) {
        config = config.with_api_url(url);
    }
    Ok(Some(config))
}

// ---------------------------------------------------------------------------
// Per-binary configuration
// ---------------------------------------------------------------------------

/// Everything the daily job needs.
#[derive(Debug, Clone)]
pub struct DailyConfig {
    /// Root the record file and documents are resolved against.
    pub root: PathBuf,
    /// Remote generator, if configured.
    pub generator: Option<GeminiConfig>,
}

impl DailyConfig {
    /// Reads from `lookup`. The root defaults to the working directory.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            root: non_empty(lookup, CONTRIBOT_ROOT)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            generator: generator_config(lookup)?,
        })
    }

    /// Reads from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }
}

/// Everything the issue job needs.
#[derive(Debug, Clone)]
pub struct IssueConfig {
    /// Remote generator, if configured.
    pub generator: Option<GeminiConfig>,
    /// GitHub access, if configured.
    pub github: Option<GithubConfig>,
}

impl IssueConfig {
    /// Reads from `lookup`.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            generator: generator_config(lookup)?,
            github: github_config(lookup)?,
        })
    }

    /// Reads from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Observability settings shared by both binaries.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Encoding of log lines on stderr.
    pub format: LogFormat,
    /// OTLP gRPC endpoint; span export is off when `None`.
    pub otlp_endpoint: Option<String>,
}

impl TelemetryConfig {
    /// Reads from `lookup`. Unknown formats fall back to text.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let format = match non_empty(lookup, CONTRIBOT_LOG_FORMAT) {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            format,
            otlp_endpoint: non_empty(lookup, OTEL_EXPORTER_OTLP_ENDPOINT),
        }
    }

    /// Reads from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }
}
