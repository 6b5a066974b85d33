//! JSON extraction from free-form LLM responses.
//!
//! Providers are asked for JSON but routinely wrap it in prose or
//! markdown fences. Extraction tries three tiers in order: the whole
//! response, the first fenced code block, then the first brace-delimited
//! substring. Callers that get `None` degrade to a raw-text container
//! rather than failing the run.

use regex::Regex;

/// Extract a JSON value from text that may contain markdown or prose.
///
/// Returns `None` when no tier yields valid JSON.
#[must_use]
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    // Tier 1: the whole response is JSON.
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    // Tier 2: a fenced code block (```json or bare ```).
    let fence_re = Regex::new(r"(?s)```(?:json)?\s*\n?(.*?)\n?```").expect("valid regex");
    if let Some(caps) = fence_re.captures(text) {
        if let Ok(value) = serde_json::from_str(caps[1].trim()) {
            return Some(value);
        }
    }

    // Tier 3: first `{` to last `}`.
    let brace_re = Regex::new(r"(?s)\{.*\}").expect("valid regex");
    if let Some(m) = brace_re.find(text) {
        if let Ok(value) = serde_json::from_str(m.as_str()) {
            return Some(value);
        }
    }

    None
}
