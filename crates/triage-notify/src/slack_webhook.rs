//! Slack incoming-webhook delivery.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use triage_github::transport_helpers::{non_empty_trimmed, truncate_for_error};

use crate::slack_blocks::render_slack_payload;
use crate::{IssueDigest, IssueNotifier, NotifyOutcome};

#[derive(Clone)]
pub struct SlackWebhookNotifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
    dry_run: bool,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: Option<&str>, request_timeout_ms: u64, dry_run: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create slack webhook client")?;
        Ok(Self {
            http,
            webhook_url: non_empty_trimmed(webhook_url).map(ToOwned::to_owned),
            dry_run,
        })
    }
}

#[async_trait]
impl IssueNotifier for SlackWebhookNotifier {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn notify(&self, digest: &IssueDigest) -> Result<NotifyOutcome> {
        let Some(webhook_url) = self.webhook_url.as_deref() else {
            tracing::info!("slack webhook url not configured; skipping slack notification");
            return Ok(NotifyOutcome::Skipped {
                reason: "webhook_url_unset",
            });
        };

        let payload = render_slack_payload(digest);
        if self.dry_run {
            tracing::info!(payload = %payload, "dry run: slack payload not sent");
            return Ok(NotifyOutcome::DryRun);
        }

        let response = self
            .http
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .context("slack webhook request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "slack webhook failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 400)
            );
        }

        tracing::info!(count = digest.count(), "slack notification delivered");
        Ok(NotifyOutcome::Delivered)
    }
}
