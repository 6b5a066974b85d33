//! Open Graph meta-tag extraction from raw HTML.
//!
//! Instagram exposes the post image and caption through `og:image` and
//! `og:description`; that is the entire scraping contract this crate
//! relies on.

use regex::Regex;

/// Extract the `content` attribute of a `<meta property="...">` tag.
///
/// Handles both attribute orders (`property` before `content` and the
/// reverse) and decodes the HTML entities that commonly appear in og
/// URLs and captions.
#[must_use]
pub fn extract_og_content(html: &str, property: &str) -> Option<String> {
    let prop = regex::escape(property);

    let property_first = Regex::new(&format!(
        r#"(?is)<meta[^>]*\bproperty\s*=\s*["']{prop}["'][^>]*\bcontent\s*=\s*["']([^"']*)["']"#
    ))
    .expect("valid regex");
    if let Some(caps) = property_first.captures(html) {
        return Some(decode_entities(&caps[1]));
    }

    let content_first = Regex::new(&format!(
        r#"(?is)<meta[^>]*\bcontent\s*=\s*["']([^"']*)["'][^>]*\bproperty\s*=\s*["']{prop}["']"#
    ))
    .expect("valid regex");
    content_first
        .captures(html)
        .map(|caps| decode_entities(&caps[1]))
}

/// Decode the handful of entities og attribute values actually use.
fn decode_entities(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
