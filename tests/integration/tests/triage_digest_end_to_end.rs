use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use httpmock::prelude::*;
use serde_json::{json, Value};
use triage_ai::{ChatRequest, ChatResponse, ChatUsage, LlmClient, Message, TriageAiError};
use triage_analysis::{AnalyzerSettings, IssueAnalyzer};
use triage_github::{GithubApiClient, RepoRef};
use triage_notify::email_render::{render_email_html, render_email_subject};
use triage_notify::slack_blocks::render_slack_payload;
use triage_notify::{
    EmailNotifier, EmailNotifierConfig, IssueDigest, IssueNotifier, NotifyOutcome,
    SlackWebhookNotifier,
};
use triage_runtime::TriageRuntime;

struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TriageAiError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(request.messages[0].text_content().to_string());
        let text = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| TriageAiError::InvalidResponse("scripted queue exhausted".into()))?;
        Ok(ChatResponse {
            message: Message::assistant_text(text),
            finish_reason: Some("stop".to_string()),
            usage: ChatUsage::default(),
        })
    }
}

#[derive(Default)]
struct CapturingNotifier {
    digests: Mutex<Vec<IssueDigest>>,
}

#[async_trait]
impl IssueNotifier for CapturingNotifier {
    fn name(&self) -> &'static str {
        "capture"
    }

    async fn notify(&self, digest: &IssueDigest) -> Result<NotifyOutcome> {
        self.digests.lock().expect("digests lock").push(digest.clone());
        Ok(NotifyOutcome::Delivered)
    }
}

fn analysis_reply(priority: &str, summary: &str) -> String {
    json!({
        "priority": priority,
        "category": "Bug",
        "summary": summary,
        "suggestedAction": "Assign an owner today",
        "estimatedEffort": "Medium"
    })
    .to_string()
}

fn issue_rows() -> Value {
    let now = Utc::now();
    json!([
        {
            "number": 101,
            "title": "Payments fail at checkout",
            "body": "Every card is declined since the last deploy",
            "html_url": "https://github.com/owner/repo/issues/101",
            "created_at": (now - Duration::hours(5)).to_rfc3339(),
            "user": {"login": "alice"},
            "labels": [{"name": "bug"}, {"name": "payments"}]
        },
        {
            "number": 102,
            "title": "Login page <slow> & flaky",
            "body": null,
            "html_url": "https://github.com/owner/repo/issues/102",
            "created_at": (now - Duration::hours(2)).to_rfc3339(),
            "user": {"login": "bob"},
            "labels": []
        },
        {
            "number": 103,
            "title": "Bump dependency",
            "body": "automated",
            "html_url": "https://github.com/owner/repo/pull/103",
            "created_at": (now - Duration::hours(1)).to_rfc3339(),
            "user": {"login": "bot"},
            "labels": [],
            "pull_request": {"url": "https://api.github.com/repos/owner/repo/pulls/103"}
        }
    ])
}

#[tokio::test]
async fn integration_two_new_issues_reach_slack_and_email_in_priority_order() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/owner/repo/issues")
            .query_param("state", "open")
            .query_param("per_page", "100");
        then.status(200).json_body(issue_rows());
    });
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .body_includes("2 new issue(s) opened in the last 24 hours")
            .body_includes("Checkout is down")
            .body_includes("&lt;slow&gt; &amp; flaky");
        then.status(200).body("ok");
    });
    let email = server.mock(|when, then| {
        when.method(POST)
            .path("/emails")
            .header("authorization", "Bearer re_test")
            .json_body_includes(
                json!({
                    "to": ["team@example.com"],
                    "subject": "[owner/repo] 2 New Issue(s) - AI Analysis"
                })
                .to_string(),
            );
        then.status(200).json_body(json!({"id": "email-1"}));
    });

    let llm = Arc::new(ScriptedClient::new(vec![
        analysis_reply("Critical", "Checkout is down"),
        format!("```json\n{}\n```", analysis_reply("High", "Login is slow")),
    ]));
    let github = GithubApiClient::new(
        server.base_url(),
        Some("gh-token"),
        RepoRef::parse("owner/repo").expect("repo"),
        5_000,
    )
    .expect("github client");
    let analyzer = IssueAnalyzer::new(llm.clone(), AnalyzerSettings::default());
    let slack_url = server.url("/hook");
    let slack = SlackWebhookNotifier::new(Some(slack_url.as_str()), 5_000, false)
        .expect("slack notifier");
    let mailer = EmailNotifier::new(EmailNotifierConfig {
        api_base: server.base_url(),
        api_key: Some("re_test".to_string()),
        recipient: Some("team@example.com".to_string()),
        sender: None,
        request_timeout_ms: 5_000,
        dry_run: false,
    })
    .expect("email notifier");
    let capture = Arc::new(CapturingNotifier::default());
    let notifiers: Vec<Arc<dyn IssueNotifier>> =
        vec![Arc::new(slack), Arc::new(mailer), capture.clone()];

    let report = TriageRuntime::new(github, analyzer, notifiers, 24)
        .run(Utc::now())
        .await
        .expect("triage run");

    list.assert_calls(1);
    hook.assert_calls(1);
    email.assert_calls(1);
    assert_eq!(report.fetched, 2);
    assert_eq!(report.fallback_count, 0);
    assert!(report
        .notifications
        .iter()
        .all(|entry| entry.outcome == NotifyOutcome::Delivered));

    let prompts = llm.prompts.lock().expect("prompts lock");
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Labels: bug, payments"));
    assert!(prompts[1].contains("No description provided"));
    assert!(prompts[1].contains("Labels: None"));

    let digests = capture.digests.lock().expect("digests lock");
    let digest = &digests[0];

    let slack_text = render_slack_payload(digest).to_string();
    let red = slack_text.find('🔴').expect("critical glyph");
    let orange = slack_text.find('🟠').expect("high glyph");
    assert!(red < orange, "critical issue should render first");
    assert!(!slack_text.contains("#103"));

    let html = render_email_html(digest);
    let critical = html.find("#dc3545").expect("critical color");
    let high = html.find("#fd7e14").expect("high color");
    assert!(critical < high);
    assert!(html.contains("Login page &lt;slow&gt; &amp; flaky"));
    assert_eq!(
        render_email_subject(digest),
        "[owner/repo] 2 New Issue(s) - AI Analysis"
    );
}

#[tokio::test]
async fn integration_unparseable_reply_still_notifies_with_fallback_analysis() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/issues");
        then.status(200).json_body(json!([issue_rows()[0].clone()]));
    });
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .body_includes("Review the issue manually")
            .body_includes("Payments fail at checkout");
        then.status(200).body("ok");
    });

    let llm = Arc::new(ScriptedClient::new(vec![
        "I think this is probably important.".to_string(),
    ]));
    let github = GithubApiClient::new(
        server.base_url(),
        None,
        RepoRef::parse("owner/repo").expect("repo"),
        5_000,
    )
    .expect("github client");
    let analyzer = IssueAnalyzer::new(llm, AnalyzerSettings::default());
    let slack_url = server.url("/hook");
    let slack = SlackWebhookNotifier::new(Some(slack_url.as_str()), 5_000, false)
        .expect("slack notifier");
    let mailer = EmailNotifier::new(EmailNotifierConfig {
        api_base: server.base_url(),
        ..EmailNotifierConfig::default()
    })
    .expect("email notifier");
    let notifiers: Vec<Arc<dyn IssueNotifier>> = vec![Arc::new(slack), Arc::new(mailer)];

    let report = TriageRuntime::new(github, analyzer, notifiers, 24)
        .run(Utc::now())
        .await
        .expect("triage run");

    hook.assert_calls(1);
    assert_eq!(report.fallback_count, 1);
    assert_eq!(
        report.notifications[1].outcome,
        NotifyOutcome::Skipped {
            reason: "email_not_configured"
        }
    );
}
