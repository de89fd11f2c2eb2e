use crate::Analysis;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Return the fenced block body when the text carries one, else the trimmed text.
///
/// A ```json fence wins over a bare ``` fence. An unterminated fence yields
/// everything after the opening marker.
pub fn extract_json_payload(text: &str) -> &str {
    let opening = text
        .find(JSON_FENCE)
        .map(|start| start + JSON_FENCE.len())
        .or_else(|| text.find(FENCE).map(|start| start + FENCE.len()));
    let Some(content_start) = opening else {
        return text.trim();
    };
    let remainder = &text[content_start..];
    let inner = match remainder.find(FENCE) {
        Some(end) => &remainder[..end],
        None => remainder,
    };
    inner.trim()
}

/// Parse model output into an `Analysis`, or `None` when it does not fit the schema.
pub fn parse_analysis(text: &str) -> Option<Analysis> {
    serde_json::from_str::<Analysis>(extract_json_payload(text)).ok()
}
