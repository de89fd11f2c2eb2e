//! Per-issue classification: the `Analysis` value type, prompt rendering,
//! tolerant response parsing, and the `IssueAnalyzer` that ties them to an
//! `LlmClient`.

pub mod analysis;
pub mod analysis_parse;
pub mod analysis_prompt;
pub mod issue_analyzer;

pub use analysis::{Analysis, AnalyzedIssue, Category, Effort, Priority};
pub use analysis_parse::{extract_json_payload, parse_analysis};
pub use analysis_prompt::render_analysis_prompt;
pub use issue_analyzer::{AnalysisOutcome, AnalyzerSettings, IssueAnalyzer};
