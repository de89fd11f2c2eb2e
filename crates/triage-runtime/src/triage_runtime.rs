//! Linear fetch → analyze pipeline with a concurrent notifier fan-out.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use triage_ai::{OpenAiClient, OpenAiConfig};
use triage_analysis::{AnalyzedIssue, AnalyzerSettings, IssueAnalyzer};
use triage_github::{GithubApiClient, IssueWindow};
use triage_notify::{
    EmailNotifier, EmailNotifierConfig, IssueDigest, IssueNotifier, NotifyOutcome,
    SlackWebhookNotifier,
};

use crate::TriageRunConfig;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierReport {
    pub name: &'static str,
    pub outcome: NotifyOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Summary of a completed run.
pub struct RunReport {
    pub fetched: usize,
    pub analyzed: usize,
    pub fallback_count: usize,
    pub notifications: Vec<NotifierReport>,
}

pub struct TriageRuntime {
    github: GithubApiClient,
    analyzer: IssueAnalyzer,
    notifiers: Vec<Arc<dyn IssueNotifier>>,
    lookback_hours: u32,
}

impl TriageRuntime {
    pub fn new(
        github: GithubApiClient,
        analyzer: IssueAnalyzer,
        notifiers: Vec<Arc<dyn IssueNotifier>>,
        lookback_hours: u32,
    ) -> Self {
        Self {
            github,
            analyzer,
            notifiers,
            lookback_hours: lookback_hours.max(1),
        }
    }

    /// Wire the production GitHub, OpenAI, Slack and email clients.
    pub fn from_config(config: &TriageRunConfig) -> Result<Self> {
        let github = GithubApiClient::new(
            config.github_api_base.clone(),
            config.github_token.as_deref(),
            config.repo.clone(),
            config.request_timeout_ms,
        )?;
        let llm = OpenAiClient::new(OpenAiConfig {
            api_base: config.openai_api_base.clone(),
            api_key: config.openai_api_key.clone(),
            request_timeout_ms: config.request_timeout_ms,
        })
        .context("failed to create openai client")?;
        let analyzer = IssueAnalyzer::new(
            Arc::new(llm),
            AnalyzerSettings {
                model: config.model.clone(),
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        );
        let slack = SlackWebhookNotifier::new(
            config.slack_webhook_url.as_deref(),
            config.request_timeout_ms,
            config.dry_run,
        )?;
        let email = EmailNotifier::new(EmailNotifierConfig {
            api_base: config.email_api_base.clone(),
            api_key: config.email_api_key.clone(),
            recipient: config.notification_email.clone(),
            sender: config.from_email.clone(),
            request_timeout_ms: config.request_timeout_ms,
            dry_run: config.dry_run,
        })?;
        let notifiers: Vec<Arc<dyn IssueNotifier>> = vec![Arc::new(slack), Arc::new(email)];

        Ok(Self::new(github, analyzer, notifiers, config.lookback_hours))
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunReport> {
        let repo = self.github.repo().clone();
        let window = IssueWindow::trailing_hours(now, self.lookback_hours)?;
        let issues = self.github.list_recent_issues(&window).await?;
        tracing::info!(repo = %repo, count = issues.len(), "fetched new issues");

        let mut report = RunReport {
            fetched: issues.len(),
            ..RunReport::default()
        };
        if issues.is_empty() {
            tracing::info!(repo = %repo, "no new issues in window; nothing to notify");
            return Ok(report);
        }

        let mut analyzed = Vec::with_capacity(issues.len());
        for issue in issues {
            tracing::info!(
                issue_number = issue.number,
                title = %issue.title,
                "analyzing issue"
            );
            let outcome = self.analyzer.analyze(&issue).await?;
            if outcome.is_fallback() {
                report.fallback_count += 1;
            }
            analyzed.push(AnalyzedIssue {
                issue,
                analysis: outcome.into_analysis(),
            });
        }

        report.analyzed = analyzed.len();
        let digest = IssueDigest {
            repo,
            lookback_hours: self.lookback_hours,
            issues: analyzed,
        };
        report.notifications = self.dispatch(&digest).await?;
        Ok(report)
    }

    /// Run every notifier to completion concurrently. Successful deliveries are
    /// kept even when a sibling fails; the run still fails in that case.
    async fn dispatch(&self, digest: &IssueDigest) -> Result<Vec<NotifierReport>> {
        let results = join_all(self.notifiers.iter().map(|notifier| async move {
            (notifier.name(), notifier.notify(digest).await)
        }))
        .await;

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(outcome) => {
                    tracing::info!(
                        notifier = name,
                        outcome = outcome.as_str(),
                        "notifier finished"
                    );
                    reports.push(NotifierReport { name, outcome });
                }
                Err(error) => {
                    tracing::error!(
                        notifier = name,
                        error = %format!("{error:#}"),
                        "notifier failed"
                    );
                    failures.push(format!("{name}: {error:#}"));
                }
            }
        }

        if !failures.is_empty() {
            let delivered = reports
                .iter()
                .filter(|report| report.outcome == NotifyOutcome::Delivered)
                .map(|report| report.name)
                .collect::<Vec<_>>();
            if !delivered.is_empty() {
                tracing::warn!(
                    delivered = ?delivered,
                    "partial delivery; successful notifications are not rolled back"
                );
            }
            bail!("notification failed: {}", failures.join("; "));
        }
        Ok(reports)
    }
}
