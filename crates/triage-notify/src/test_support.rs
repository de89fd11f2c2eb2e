use chrono::Utc;
use triage_analysis::{Analysis, AnalyzedIssue, Category, Effort, Priority};
use triage_github::{GithubIssue, GithubUser, RepoRef};

use crate::IssueDigest;

pub(crate) fn analyzed(number: u64, title: &str, priority: Priority) -> AnalyzedIssue {
    AnalyzedIssue {
        issue: GithubIssue {
            number,
            title: title.to_string(),
            body: None,
            html_url: format!("https://github.com/owner/repo/issues/{number}"),
            created_at: Utc::now(),
            user: GithubUser {
                login: "alice".to_string(),
            },
            labels: Vec::new(),
            pull_request: None,
        },
        analysis: Analysis {
            priority,
            category: Category::Bug,
            summary: format!("Summary for #{number}"),
            suggested_action: format!("Action for #{number}"),
            estimated_effort: Effort::Small,
        },
    }
}

pub(crate) fn digest(issues: Vec<AnalyzedIssue>) -> IssueDigest {
    IssueDigest {
        repo: RepoRef::parse("owner/repo").expect("repo"),
        lookback_hours: 24,
        issues,
    }
}
