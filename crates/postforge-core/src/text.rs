use regex::Regex;

/// Create a filesystem-safe name from a free-text string, capped at 50
/// characters.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = Regex::new(r"[^\w\s-]")
        .expect("valid regex")
        .replace_all(&lowered, "");
    let joined = Regex::new(r"\s+")
        .expect("valid regex")
        .replace_all(stripped.trim(), "_");
    joined.chars().take(50).collect()
}

/// Truncate text to at most `max_chars` characters, appending an ellipsis
/// when anything was cut. Used to cap caption/analysis text fed back into
/// provider prompts.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_spaces_and_strips_punctuation() {
        assert_eq!(sanitize_filename("Thyroid Health: 3 Tips!"), "thyroid_health_3_tips");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "a".repeat(80);
        assert_eq!(sanitize_filename(&long).len(), 50);
    }

    #[test]
    fn truncate_leaves_short_text_untouched() {
        assert_eq!(truncate_text("short", 2000), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }
}
