//! Output bundle writing: one `post_{k}/` directory per caption variant,
//! holding `caption.txt`, the generated image (when present), and
//! `metadata.json` tracing the bundle back to its inspiration source.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Metadata persisted next to each generated post.
#[derive(Debug, Serialize)]
pub struct PostMetadata {
    pub post_number: usize,
    pub variant: u32,
    pub angle: String,
    pub style: String,
    pub image_provider: String,
    pub text_provider: String,
    pub image_prompt_used: String,
    pub image_generated: bool,
    pub review: serde_json::Value,
    pub inspiration_source: serde_json::Value,
}

/// Write `caption.txt` for a bundle. Hashtags, when present, follow the
/// caption after a `---` separator line.
///
/// # Errors
///
/// Fails if the post directory cannot be created or the file written.
pub fn write_caption(post_dir: &Path, caption: &str, hashtags: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(post_dir)
        .with_context(|| format!("creating post directory {}", post_dir.display()))?;
    let full = if hashtags.is_empty() {
        caption.to_string()
    } else {
        format!("{caption}\n\n---\n{hashtags}")
    };
    let path = post_dir.join("caption.txt");
    std::fs::write(&path, full).with_context(|| format!("writing {}", path.display()))
}

/// Write `metadata.json` for a bundle.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn write_metadata(post_dir: &Path, metadata: &PostMetadata) -> anyhow::Result<()> {
    let path = post_dir.join("metadata.json");
    let body = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))
}

/// Resolve the `inspiration_source` back-reference for a bundle: the
/// source URL string for scraped posts, the whole `_source` object for
/// scratch-mode concepts, `"unknown"` when the analysis carries neither.
#[must_use]
pub fn inspiration_source(analysis: &serde_json::Value) -> serde_json::Value {
    match analysis.get("_source") {
        Some(source) => source
            .get("source_url")
            .cloned()
            .unwrap_or_else(|| source.clone()),
        None => serde_json::Value::String("unknown".to_string()),
    }
}
