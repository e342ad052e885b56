//! Posts drafted analyses on up to five open issues.
//!
//! Takes no arguments; see [`cli::config`] for the environment it reads.

use cli::config::{IssueConfig, TelemetryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let telemetry = cli::telemetry::init(&TelemetryConfig::from_env(), "issue-solver")?;

    let result = match IssueConfig::from_env() {
        Ok(config) => cli::run_issues(config).await,
        Err(err) => Err(err.into()),
    };
    telemetry.shutdown().await;

    let report = result?;
    println!("Processed {} issues", report.processed);
    Ok(())
}
