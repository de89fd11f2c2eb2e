use triage_github::RepoRef;

pub const DEFAULT_LOOKBACK_HOURS: u32 = 24;
/// One year.
pub const MAX_LOOKBACK_HOURS: u32 = 8_760;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
/// Resolved process configuration for one run. Built once by the binary and
/// handed to the runtime; nothing below this reads the environment.
pub struct TriageRunConfig {
    pub repo: RepoRef,
    pub lookback_hours: u32,
    pub github_api_base: String,
    pub github_token: Option<String>,
    pub openai_api_base: String,
    pub openai_api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub slack_webhook_url: Option<String>,
    pub email_api_base: String,
    pub email_api_key: Option<String>,
    pub notification_email: Option<String>,
    pub from_email: Option<String>,
    pub request_timeout_ms: u64,
    pub dry_run: bool,
}
