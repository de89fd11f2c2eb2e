//! Command-line surface for the `issue-triage` binary.
//!
//! Exposes the clap-backed `Cli`, its conversion into a `TriageRunConfig`,
//! and tracing initialization.

pub mod bootstrap_helpers;
pub mod cli_args;

pub use bootstrap_helpers::{init_tracing, run_cli};
pub use cli_args::Cli;
