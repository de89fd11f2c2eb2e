//! HTML document and subject line for the email digest.

use triage_analysis::{AnalyzedIssue, Priority};

use crate::IssueDigest;

pub fn priority_color(priority: &Priority) -> &'static str {
    match priority {
        Priority::Critical => "#dc3545",
        Priority::High => "#fd7e14",
        Priority::Medium => "#ffc107",
        Priority::Low => "#28a745",
        Priority::Unrecognized(_) => "#6c757d",
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_email_subject(digest: &IssueDigest) -> String {
    format!(
        "[{}] {} New Issue(s) - AI Analysis",
        digest.repo,
        digest.count()
    )
}

fn render_issue_rows(entry: &AnalyzedIssue) -> String {
    let issue = &entry.issue;
    let analysis = &entry.analysis;
    format!(
        concat!(
            "<tr>",
            "<td style=\"width:24px;padding:12px 8px 4px 8px;vertical-align:top;\">",
            "<span style=\"display:inline-block;width:12px;height:12px;border-radius:50%;background-color:{color};\"></span>",
            "</td>",
            "<td style=\"padding:12px 8px 4px 0;\">",
            "<a href=\"{url}\" style=\"color:#0366d6;font-weight:bold;text-decoration:none;\">#{number}: {title}</a>",
            "</td>",
            "</tr>\n",
            "<tr>",
            "<td style=\"border-bottom:1px solid #e1e4e8;\"></td>",
            "<td style=\"padding:0 8px 12px 0;border-bottom:1px solid #e1e4e8;font-size:14px;color:#24292e;\">",
            "<div style=\"color:#586069;\"><strong>Priority:</strong> {priority} | <strong>Category:</strong> {category} | <strong>Effort:</strong> {effort}</div>",
            "<div><strong>Summary:</strong> {summary}</div>",
            "<div><strong>Suggested Action:</strong> {action}</div>",
            "</td>",
            "</tr>\n"
        ),
        color = priority_color(&analysis.priority),
        url = escape_html(&issue.html_url),
        number = issue.number,
        title = escape_html(&issue.title),
        priority = escape_html(analysis.priority.as_str()),
        category = analysis.category.as_str(),
        effort = analysis.estimated_effort.as_str(),
        summary = escape_html(&analysis.summary),
        action = escape_html(&analysis.suggested_action),
    )
}

/// Full HTML body: header, count line, two table rows per issue, footer.
pub fn render_email_html(digest: &IssueDigest) -> String {
    let repo = escape_html(&digest.repo.to_string());
    let rows = digest
        .issues
        .iter()
        .map(render_issue_rows)
        .collect::<String>();

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n<head><meta charset=\"utf-8\"><title>New Issues in {repo}</title></head>\n",
            "<body style=\"font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;margin:0;padding:24px;background-color:#f6f8fa;\">\n",
            "<div style=\"max-width:680px;margin:0 auto;background-color:#ffffff;border:1px solid #e1e4e8;border-radius:6px;padding:24px;\">\n",
            "<h2 style=\"margin-top:0;color:#24292e;\">New Issues in {repo}</h2>\n",
            "<p style=\"color:#586069;\">{count} new issue(s) opened in the last {hours} hours, analyzed by AI.</p>\n",
            "<table style=\"width:100%;border-collapse:collapse;\">\n",
            "{rows}",
            "</table>\n",
            "<p style=\"margin-top:24px;font-size:12px;color:#959da5;\">This email was generated automatically by issue-triage.</p>\n",
            "</div>\n</body>\n</html>\n"
        ),
        repo = repo,
        count = digest.count(),
        hours = digest.lookback_hours,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use triage_analysis::Priority;

    use super::{escape_html, priority_color, render_email_html, render_email_subject};
    use crate::test_support::{analyzed, digest};

    #[test]
    fn unit_priority_color_maps_scale_and_unknown_labels() {
        assert_eq!(priority_color(&Priority::Critical), "#dc3545");
        assert_eq!(priority_color(&Priority::High), "#fd7e14");
        assert_eq!(priority_color(&Priority::Medium), "#ffc107");
        assert_eq!(priority_color(&Priority::Low), "#28a745");
        assert_eq!(
            priority_color(&Priority::Unrecognized("P1".to_string())),
            "#6c757d"
        );
    }

    #[test]
    fn unit_escape_html_escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn unit_render_email_subject_embeds_repo_and_count() {
        let digest = digest(vec![
            analyzed(1, "One", Priority::Low),
            analyzed(2, "Two", Priority::Low),
        ]);
        assert_eq!(
            render_email_subject(&digest),
            "[owner/repo] 2 New Issue(s) - AI Analysis"
        );
    }

    #[test]
    fn functional_render_email_html_emits_two_rows_per_issue_in_order() {
        let digest = digest(vec![
            analyzed(12, "Crash on save", Priority::Critical),
            analyzed(15, "Slow search", Priority::High),
        ]);
        let html = render_email_html(&digest);

        assert!(html.contains("New Issues in owner/repo"));
        assert!(html.contains("2 new issue(s)"));
        assert_eq!(html.matches("<tr>").count(), 4);

        let critical = html.find("background-color:#dc3545").expect("critical dot");
        let high = html.find("background-color:#fd7e14").expect("high dot");
        assert!(critical < high);
        let first_link = html.find("#12: Crash on save").expect("first link");
        let second_link = html.find("#15: Slow search").expect("second link");
        assert!(first_link < second_link);

        assert!(html.contains("href=\"https://github.com/owner/repo/issues/12\""));
        assert!(html.contains("<strong>Priority:</strong> Critical | <strong>Category:</strong> Bug | <strong>Effort:</strong> Small"));
        assert!(html.contains("<strong>Summary:</strong> Summary for #15"));
        assert!(html.contains("<strong>Suggested Action:</strong> Action for #12"));
        assert!(html.contains("generated automatically"));
    }

    #[test]
    fn regression_render_email_html_escapes_issue_titles() {
        let digest = digest(vec![analyzed(9, "<img src=x onerror=alert(1)>", Priority::Low)]);
        let html = render_email_html(&digest);
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("#9: &lt;img src=x onerror=alert(1)&gt;"));
    }
}
