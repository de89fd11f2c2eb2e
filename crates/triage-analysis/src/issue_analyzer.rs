use std::sync::Arc;

use anyhow::{Context, Result};
use triage_ai::{ChatRequest, LlmClient, Message};
use triage_github::GithubIssue;

use crate::analysis_parse::parse_analysis;
use crate::analysis_prompt::render_analysis_prompt;
use crate::Analysis;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Parsed model output, or the fallback substituted for unparseable output.
pub enum AnalysisOutcome {
    Parsed(Analysis),
    Fallback(Analysis),
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn into_analysis(self) -> Analysis {
        match self {
            Self::Parsed(analysis) | Self::Fallback(analysis) => analysis,
        }
    }
}

#[derive(Clone)]
pub struct IssueAnalyzer {
    client: Arc<dyn LlmClient>,
    settings: AnalyzerSettings,
}

impl IssueAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>, settings: AnalyzerSettings) -> Self {
        Self { client, settings }
    }

    /// One inference attempt per issue. Transport and status failures are
    /// returned; unparseable output becomes `AnalysisOutcome::Fallback`.
    pub async fn analyze(&self, issue: &GithubIssue) -> Result<AnalysisOutcome> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user(render_analysis_prompt(issue))],
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
        };
        let response = self
            .client
            .complete(request)
            .await
            .with_context(|| format!("analysis request for issue #{} failed", issue.number))?;

        let text = response.message.text_content();
        match parse_analysis(text) {
            Some(analysis) => Ok(AnalysisOutcome::Parsed(analysis)),
            None => {
                tracing::warn!(
                    issue_number = issue.number,
                    "model output did not match the analysis schema; using fallback"
                );
                Ok(AnalysisOutcome::Fallback(Analysis::fallback_for(&issue.title)))
            }
        }
    }
}
