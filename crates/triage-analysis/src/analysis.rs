use serde::{Deserialize, Serialize};
use triage_github::GithubIssue;

pub const FALLBACK_SUGGESTED_ACTION: &str = "Review the issue manually";

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Model-assigned urgency. Labels outside the known scale are kept verbatim.
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Bug,
    FeatureRequest,
    Question,
    Documentation,
    Enhancement,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::FeatureRequest => "Feature Request",
            Self::Question => "Question",
            Self::Documentation => "Documentation",
            Self::Enhancement => "Enhancement",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match normalize_label(&raw).as_str() {
            "bug" => Ok(Self::Bug),
            "feature request" => Ok(Self::FeatureRequest),
            "question" => Ok(Self::Question),
            "documentation" => Ok(Self::Documentation),
            "enhancement" => Ok(Self::Enhancement),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown category '{raw}'")),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Effort {
    Small,
    Medium,
    Large,
}

impl Effort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl TryFrom<String> for Effort {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match normalize_label(&raw).as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(format!("unknown effort '{raw}'")),
        }
    }
}

impl From<Effort> for String {
    fn from(effort: Effort) -> Self {
        effort.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Five-field classification of one issue. Every field is always populated.
pub struct Analysis {
    pub priority: Priority,
    pub category: Category,
    pub summary: String,
    pub suggested_action: String,
    pub estimated_effort: Effort,
}

impl Analysis {
    /// Substitute used wholesale when the model output cannot be parsed.
    pub fn fallback_for(issue_title: &str) -> Self {
        Self {
            priority: Priority::Medium,
            category: Category::Other,
            summary: issue_title.to_string(),
            suggested_action: FALLBACK_SUGGESTED_ACTION.to_string(),
            estimated_effort: Effort::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One fetched issue paired with its classification.
pub struct AnalyzedIssue {
    pub issue: GithubIssue,
    pub analysis: Analysis,
}
