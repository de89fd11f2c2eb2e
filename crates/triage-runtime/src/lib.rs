//! Orchestration of one triage run: fetch recent issues, analyze them in
//! order, then fan the digest out to every configured notifier.

pub mod run_config;
pub mod triage_runtime;

pub use run_config::TriageRunConfig;
pub use triage_runtime::{NotifierReport, RunReport, TriageRuntime};
