//! Writes today's contribution log, records it, and refreshes the README.
//!
//! Takes no arguments; see [`cli::config`] for the environment it reads.

use cli::config::{DailyConfig, TelemetryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let telemetry = cli::telemetry::init(&TelemetryConfig::from_env(), "daily-contributor")?;

    let result = match DailyConfig::from_env() {
        Ok(config) => cli::run_daily(config).await,
        Err(err) => Err(err.into()),
    };
    telemetry.shutdown().await;

    let report = result?;
    println!("Created daily contribution: {}", report.log_path.display());
    println!("Daily contribution completed!");
    Ok(())
}
