use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use triage_runtime::{RunReport, TriageRuntime};

use crate::Cli;

pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn run_cli(cli: Cli) -> Result<RunReport> {
    let config = cli.into_run_config()?;
    tracing::info!(
        repo = %config.repo,
        lookback_hours = config.lookback_hours,
        model = %config.model,
        dry_run = config.dry_run,
        "starting issue triage run"
    );
    let runtime = TriageRuntime::from_config(&config)?;
    let report = runtime.run(Utc::now()).await?;
    tracing::info!(
        fetched = report.fetched,
        analyzed = report.analyzed,
        fallback_count = report.fallback_count,
        notifiers = report.notifications.len(),
        "issue triage run complete"
    );
    Ok(report)
}
