use std::process::ExitCode;

use clap::Parser;
use triage_cli::{init_tracing, run_cli, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run_cli(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "issue triage run failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
