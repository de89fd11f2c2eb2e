use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::GithubIssue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Trailing creation-time window ending at `until`.
pub struct IssueWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl IssueWindow {
    pub fn trailing_hours(now: DateTime<Utc>, hours: u32) -> Result<Self> {
        let since = now
            .checked_sub_signed(Duration::hours(i64::from(hours)))
            .ok_or_else(|| anyhow!("lookback of {hours} hours is out of range for {now}"))?;
        Ok(Self { since, until: now })
    }

    /// Inclusive on both ends. Timestamps after `until` (clock skew) are rejected.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.since && timestamp <= self.until
    }

    /// RFC 3339 value for the GitHub `since` query parameter.
    pub fn since_query_value(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Keep issues created inside `window`, dropping pull requests, in input order.
///
/// The list endpoint's `since` parameter filters by update time, so rows that
/// were merely edited inside the window still arrive and must be removed here.
pub fn filter_recent_issues(issues: Vec<GithubIssue>, window: &IssueWindow) -> Vec<GithubIssue> {
    issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request())
        .filter(|issue| window.contains(issue.created_at))
        .collect()
}
