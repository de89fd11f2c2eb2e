use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use crate::issue_window::{filter_recent_issues, IssueWindow};
use crate::transport_helpers::{non_empty_trimmed, truncate_for_error};
use crate::{GithubIssue, RepoRef};

/// Upper bound on rows requested from the list endpoint; a single page is fetched.
pub const ISSUE_PAGE_SIZE: usize = 100;

#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: Option<&str>,
        repo: RepoRef,
        request_timeout_ms: u64,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issue-triage"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = non_empty_trimmed(token) {
            let auth_header = format!("Bearer {token}");
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&auth_header)
                    .context("invalid github authorization header")?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// List open issues created inside `window`, excluding pull requests.
    ///
    /// The API is asked for issues updated since the window start; the exact
    /// creation-time filter runs locally.
    pub async fn list_recent_issues(&self, window: &IssueWindow) -> Result<Vec<GithubIssue>> {
        let since = window.since_query_value();
        let per_page = ISSUE_PAGE_SIZE.to_string();
        let rows: Vec<GithubIssue> = self
            .request_json(
                "list issues",
                self.http
                    .get(format!(
                        "{}/repos/{}/{}/issues",
                        self.api_base, self.repo.owner, self.repo.name
                    ))
                    .query(&[
                        ("state", "open"),
                        ("since", since.as_str()),
                        ("per_page", per_page.as_str()),
                    ]),
            )
            .await?;
        let fetched = rows.len();
        let recent = filter_recent_issues(rows, window);
        tracing::debug!(
            repo = %self.repo,
            fetched,
            kept = recent.len(),
            "filtered issues by creation window"
        );
        Ok(recent)
    }

    async fn request_json<T>(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .with_context(|| format!("github api {operation} request failed"))?;
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .with_context(|| format!("failed to decode github {operation}"));
        }

        let body = response.text().await.unwrap_or_default();
        bail!(
            "github api {operation} failed with status {}: {}",
            status.as_u16(),
            truncate_for_error(&body, 800)
        );
    }
}
