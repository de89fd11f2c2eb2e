//! GitHub issue ingestion for the triage pipeline.
//! This crate provides the REST client, issue wire types, repository slug
//! parsing, and the trailing creation-window filter.

pub mod github_api_client;
pub mod github_issue;
pub mod issue_window;
pub mod repo_ref;
pub mod transport_helpers;

pub use github_api_client::GithubApiClient;
pub use github_issue::{GithubIssue, GithubIssueLabel, GithubUser};
pub use issue_window::{filter_recent_issues, IssueWindow};
pub use repo_ref::RepoRef;
