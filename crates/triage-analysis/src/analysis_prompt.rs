use triage_github::GithubIssue;

pub const MISSING_BODY_PLACEHOLDER: &str = "No description provided";
pub const MISSING_LABELS_PLACEHOLDER: &str = "None";

/// Render the single user-role prompt asking for a five-field JSON classification.
pub fn render_analysis_prompt(issue: &GithubIssue) -> String {
    let body = issue
        .body
        .as_deref()
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .unwrap_or(MISSING_BODY_PLACEHOLDER);
    let labels = issue.label_names().collect::<Vec<_>>();
    let labels = if labels.is_empty() {
        MISSING_LABELS_PLACEHOLDER.to_string()
    } else {
        labels.join(", ")
    };

    format!(
        "Analyze this GitHub issue and classify it for triage.\n\n\
         Title: {title}\n\
         Author: {author}\n\
         Labels: {labels}\n\
         Description:\n{body}\n\n\
         Respond with a JSON object with exactly these fields:\n\
         {{\n  \
         \"priority\": \"Critical\" | \"High\" | \"Medium\" | \"Low\",\n  \
         \"category\": \"Bug\" | \"Feature Request\" | \"Question\" | \"Documentation\" | \"Enhancement\" | \"Other\",\n  \
         \"summary\": \"one-sentence summary of the issue\",\n  \
         \"suggestedAction\": \"the next step a maintainer should take\",\n  \
         \"estimatedEffort\": \"Small\" | \"Medium\" | \"Large\"\n\
         }}\n\n\
         Return only the JSON object, with no explanation or text outside it.",
        title = issue.title,
        author = issue.author_login(),
    )
}
