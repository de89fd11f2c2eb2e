use anyhow::{anyhow, bail, Result};
use clap::{ArgAction, Parser};
use triage_github::transport_helpers::non_empty_trimmed;
use triage_github::RepoRef;
use triage_notify::DEFAULT_EMAIL_API_BASE;
use triage_runtime::run_config::{
    DEFAULT_LOOKBACK_HOURS, DEFAULT_REQUEST_TIMEOUT_MS, MAX_LOOKBACK_HOURS,
};
use triage_runtime::TriageRunConfig;

fn parse_positive_u32(value: &str) -> Result<u32, String> {
    let parsed = value
        .parse::<u32>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_lookback_hours(value: &str) -> Result<u32, String> {
    let parsed = parse_positive_u32(value)?;
    if parsed > MAX_LOOKBACK_HOURS {
        return Err(format!("value must be at most {MAX_LOOKBACK_HOURS}"));
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let parsed = value
        .parse::<f32>()
        .map_err(|error| format!("failed to parse float: {error}"))?;
    if !parsed.is_finite() || !(0.0..=2.0).contains(&parsed) {
        return Err("value must be a finite number in range 0.0..=2.0".to_string());
    }
    Ok(parsed)
}

fn owned_non_empty(value: &Option<String>) -> Option<String> {
    non_empty_trimmed(value.as_deref()).map(ToOwned::to_owned)
}

#[derive(Debug, Parser)]
#[command(
    name = "issue-triage",
    about = "Classify newly opened GitHub issues with an LLM and send a digest to Slack and email",
    version
)]
pub struct Cli {
    #[arg(
        long = "repo-owner",
        env = "REPO_OWNER",
        help = "Owner of the monitored repository. Takes precedence over --repo together with --repo-name."
    )]
    pub repo_owner: Option<String>,

    #[arg(
        long = "repo-name",
        env = "REPO_NAME",
        help = "Name of the monitored repository"
    )]
    pub repo_name: Option<String>,

    #[arg(
        long = "repo",
        env = "GITHUB_REPOSITORY",
        help = "Monitored repository in owner/name form, used when --repo-owner/--repo-name are unset"
    )]
    pub repo: Option<String>,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub token with read access to issues. Optional for public repositories."
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "Base URL for the GitHub REST API"
    )]
    pub github_api_base: String,

    #[arg(
        long = "openai-api-key",
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        help = "API key for the chat-completions endpoint"
    )]
    pub openai_api_key: Option<String>,

    #[arg(
        long = "api-base",
        env = "OPENAI_API_BASE",
        default_value = "https://api.openai.com/v1",
        help = "Base URL for OpenAI-compatible chat-completions APIs"
    )]
    pub api_base: String,

    #[arg(
        long,
        env = "TRIAGE_MODEL",
        default_value = "gpt-4o-mini",
        help = "Model identifier sent with every analysis request"
    )]
    pub model: String,

    #[arg(
        long = "max-tokens",
        env = "TRIAGE_MAX_TOKENS",
        default_value_t = 500,
        value_parser = parse_positive_u32,
        help = "Output token cap for each analysis request"
    )]
    pub max_tokens: u32,

    #[arg(
        long,
        env = "TRIAGE_TEMPERATURE",
        default_value_t = 0.3,
        value_parser = parse_temperature,
        help = "Sampling temperature for analysis requests"
    )]
    pub temperature: f32,

    #[arg(
        long = "slack-webhook-url",
        env = "SLACK_WEBHOOK_URL",
        hide_env_values = true,
        help = "Slack incoming-webhook URL. Slack delivery is skipped when unset."
    )]
    pub slack_webhook_url: Option<String>,

    #[arg(
        long = "resend-api-key",
        env = "RESEND_API_KEY",
        hide_env_values = true,
        help = "Resend API key. Email delivery is skipped when unset."
    )]
    pub resend_api_key: Option<String>,

    #[arg(
        long = "email-api-base",
        env = "RESEND_API_BASE",
        default_value = DEFAULT_EMAIL_API_BASE,
        help = "Base URL for the email API"
    )]
    pub email_api_base: String,

    #[arg(
        long = "notification-email",
        env = "NOTIFICATION_EMAIL",
        help = "Recipient address for the digest email. Email delivery is skipped when unset."
    )]
    pub notification_email: Option<String>,

    #[arg(
        long = "from-email",
        env = "FROM_EMAIL",
        help = "Sender address for the digest email (defaults to onboarding@resend.dev)"
    )]
    pub from_email: Option<String>,

    #[arg(
        long = "lookback-hours",
        env = "TRIAGE_LOOKBACK_HOURS",
        default_value_t = DEFAULT_LOOKBACK_HOURS,
        value_parser = parse_lookback_hours,
        help = "Report issues created within this many trailing hours (1..=8760)"
    )]
    pub lookback_hours: u32,

    #[arg(
        long = "request-timeout-ms",
        env = "TRIAGE_REQUEST_TIMEOUT_MS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        help = "Timeout applied to every outbound HTTP request"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "dry-run",
        env = "TRIAGE_DRY_RUN",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Fetch and analyze, then log the rendered notifications instead of sending them"
    )]
    pub dry_run: bool,
}

impl Cli {
    /// Explicit owner and name win; the `owner/name` slug is the fallback.
    pub fn resolve_repo(&self) -> Result<RepoRef> {
        match (owned_non_empty(&self.repo_owner), owned_non_empty(&self.repo_name)) {
            (Some(owner), Some(name)) => RepoRef::new(&owner, &name),
            (Some(_), None) | (None, Some(_)) => {
                bail!("--repo-owner and --repo-name must be set together")
            }
            (None, None) => {
                let slug = owned_non_empty(&self.repo).ok_or_else(|| {
                    anyhow!(
                        "missing repository: set --repo-owner/--repo-name (REPO_OWNER/REPO_NAME) or --repo (GITHUB_REPOSITORY)"
                    )
                })?;
                RepoRef::parse(&slug)
            }
        }
    }

    pub fn into_run_config(self) -> Result<TriageRunConfig> {
        let repo = self.resolve_repo()?;
        let openai_api_key = owned_non_empty(&self.openai_api_key).ok_or_else(|| {
            anyhow!("missing OpenAI API key: set --openai-api-key or OPENAI_API_KEY")
        })?;

        Ok(TriageRunConfig {
            repo,
            lookback_hours: self.lookback_hours,
            github_api_base: self.github_api_base,
            github_token: owned_non_empty(&self.github_token),
            openai_api_base: self.api_base,
            openai_api_key,
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            slack_webhook_url: owned_non_empty(&self.slack_webhook_url),
            email_api_base: self.email_api_base,
            email_api_key: owned_non_empty(&self.resend_api_key),
            notification_email: owned_non_empty(&self.notification_email),
            from_email: owned_non_empty(&self.from_email),
            request_timeout_ms: self.request_timeout_ms,
            dry_run: self.dry_run,
        })
    }
}
