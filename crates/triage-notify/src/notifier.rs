use anyhow::Result;
use async_trait::async_trait;
use triage_analysis::AnalyzedIssue;
use triage_github::RepoRef;

#[derive(Debug, Clone, PartialEq)]
/// Everything a sink needs to render one run's report.
pub struct IssueDigest {
    pub repo: RepoRef,
    pub lookback_hours: u32,
    pub issues: Vec<AnalyzedIssue>,
}

impl IssueDigest {
    pub fn count(&self) -> usize {
        self.issues.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Delivered,
    /// The sink is not configured; nothing was sent.
    Skipped { reason: &'static str },
    /// Payload was rendered and logged but not sent.
    DryRun,
}

impl NotifyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Skipped { .. } => "skipped",
            Self::DryRun => "dry_run",
        }
    }
}

#[async_trait]
/// Trait contract for digest delivery sinks.
pub trait IssueNotifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, digest: &IssueDigest) -> Result<NotifyOutcome>;
}
