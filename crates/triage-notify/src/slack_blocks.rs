//! Block Kit rendering for the Slack incoming-webhook digest.

use serde_json::{json, Value};
use triage_analysis::{AnalyzedIssue, Priority};

use crate::IssueDigest;

const SLACK_SECTION_MAX_CHARS: usize = 2_900;
const SLACK_HEADER_MAX_CHARS: usize = 150;
/// Block Kit rejects messages carrying more blocks than this.
pub const SLACK_MAX_BLOCKS: usize = 50;
/// Header, context and leading divider.
const SLACK_PREAMBLE_BLOCKS: usize = 3;

pub fn priority_glyph(priority: &Priority) -> &'static str {
    match priority {
        Priority::Critical => "🔴",
        Priority::High => "🟠",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
        Priority::Unrecognized(_) => "⚪",
    }
}

/// Escape the three characters Slack mrkdwn treats as control sequences.
pub fn escape_slack_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn truncate_for_slack(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn render_count_line(digest: &IssueDigest) -> String {
    format!(
        "{} new issue(s) opened in the last {} hours",
        digest.count(),
        digest.lookback_hours
    )
}

fn render_issue_section(entry: &AnalyzedIssue) -> Value {
    let issue = &entry.issue;
    let analysis = &entry.analysis;
    let text = format!(
        "{glyph} *<{url}|#{number}: {title}>*\n\
         *Priority:* {priority} | *Category:* {category} | *Effort:* {effort}\n\
         *Summary:* {summary}\n\
         *Suggested Action:* {action}",
        glyph = priority_glyph(&analysis.priority),
        url = issue.html_url,
        number = issue.number,
        title = escape_slack_text(&issue.title),
        priority = escape_slack_text(analysis.priority.as_str()),
        category = analysis.category.as_str(),
        effort = analysis.estimated_effort.as_str(),
        summary = escape_slack_text(&analysis.summary),
        action = escape_slack_text(&analysis.suggested_action),
    );
    json!({
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": truncate_for_slack(&text, SLACK_SECTION_MAX_CHARS),
        }
    })
}

/// Build the webhook body: header, count context, divider, then one section
/// and one divider per issue in digest order. `text` is the notification fallback.
///
/// Issues that would push the message past `SLACK_MAX_BLOCKS` are replaced by
/// a single context block naming how many were left out.
pub fn render_slack_payload(digest: &IssueDigest) -> Value {
    let count_line = render_count_line(digest);
    let header = truncate_for_slack(
        &format!("🔔 New Issues in {}", digest.repo),
        SLACK_HEADER_MAX_CHARS - 3,
    );
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": header,
                "emoji": true,
            }
        }),
        json!({
            "type": "context",
            "elements": [{"type": "mrkdwn", "text": count_line}],
        }),
        json!({"type": "divider"}),
    ];
    let fits_all = SLACK_PREAMBLE_BLOCKS + 2 * digest.count() <= SLACK_MAX_BLOCKS;
    let shown = if fits_all {
        digest.count()
    } else {
        (SLACK_MAX_BLOCKS - SLACK_PREAMBLE_BLOCKS - 1) / 2
    };
    for entry in digest.issues.iter().take(shown) {
        blocks.push(render_issue_section(entry));
        blocks.push(json!({"type": "divider"}));
    }
    let omitted = digest.count() - shown;
    if omitted > 0 {
        blocks.push(json!({
            "type": "context",
            "elements": [{
                "type": "mrkdwn",
                "text": format!("...and {omitted} more issue(s) not shown"),
            }],
        }));
    }

    json!({
        "text": format!("{}: {}", digest.repo, count_line),
        "blocks": blocks,
    })
}
