//! Transactional email delivery through the Resend HTTP API.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use triage_github::transport_helpers::{non_empty_trimmed, truncate_for_error};

use crate::email_render::{render_email_html, render_email_subject};
use crate::{IssueDigest, IssueNotifier, NotifyOutcome};

pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";
pub const DEFAULT_EMAIL_API_BASE: &str = "https://api.resend.com";

#[derive(Debug, Clone, Default)]
pub struct EmailNotifierConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub request_timeout_ms: u64,
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct EmailSendResponse {
    id: Option<String>,
}

#[derive(Clone)]
pub struct EmailNotifier {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    recipient: Option<String>,
    sender: String,
    dry_run: bool,
}

impl EmailNotifier {
    pub fn new(config: EmailNotifierConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issue-triage"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .context("failed to create email api client")?;
        let api_base = non_empty_trimmed(Some(config.api_base.as_str()))
            .unwrap_or(DEFAULT_EMAIL_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            api_base,
            api_key: non_empty_trimmed(config.api_key.as_deref()).map(ToOwned::to_owned),
            recipient: non_empty_trimmed(config.recipient.as_deref()).map(ToOwned::to_owned),
            sender: non_empty_trimmed(config.sender.as_deref())
                .unwrap_or(DEFAULT_FROM_EMAIL)
                .to_string(),
            dry_run: config.dry_run,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

#[async_trait]
impl IssueNotifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, digest: &IssueDigest) -> Result<NotifyOutcome> {
        let (Some(api_key), Some(recipient)) = (self.api_key.as_deref(), self.recipient.as_deref())
        else {
            tracing::info!("email api key or recipient not configured; skipping email notification");
            return Ok(NotifyOutcome::Skipped {
                reason: "email_not_configured",
            });
        };

        let subject = render_email_subject(digest);
        if self.dry_run {
            tracing::info!(
                to = recipient,
                from = %self.sender,
                subject = %subject,
                "dry run: email not sent"
            );
            return Ok(NotifyOutcome::DryRun);
        }

        let payload = json!({
            "from": self.sender,
            "to": [recipient],
            "subject": subject,
            "html": render_email_html(digest),
        });
        let response = self
            .http
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .context("email api send request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "email api send failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 400)
            );
        }

        // A 2xx means the email was accepted; the id is informational.
        let email_id = match response.json::<EmailSendResponse>().await {
            Ok(sent) => sent.id,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "failed to decode email api send response"
                );
                None
            }
        };
        tracing::info!(
            to = recipient,
            email_id = email_id.as_deref().unwrap_or("unknown"),
            "email notification delivered"
        );
        Ok(NotifyOutcome::Delivered)
    }
}
