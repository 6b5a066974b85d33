//! Input collection and validation.
//!
//! Normalizes the four input sources (inline links, links file, local
//! images, topic) into one validated set. Individual invalid entries are
//! dropped with a warning; only an entirely empty set is fatal.

use std::path::{Path, PathBuf};

use postforge_scraper::{is_instagram_post_url, is_supported_image};

/// Validated inputs for one run.
#[derive(Debug, Default)]
pub struct CollectedInputs {
    pub links: Vec<String>,
    pub images: Vec<PathBuf>,
    pub topic: Option<String>,
}

/// Collect and validate all input sources.
///
/// Links are deduplicated in first-seen order across the inline list and
/// the links file. A missing links file is logged as an error but is
/// only fatal when it leaves the run with no input at all.
///
/// # Errors
///
/// Fails when no valid link, image, or topic remains after validation.
pub fn collect_inputs(
    links: &[String],
    links_file: Option<&Path>,
    images: &[PathBuf],
    topic: Option<&str>,
) -> anyhow::Result<CollectedInputs> {
    let mut collected = CollectedInputs {
        topic: topic.map(ToString::to_string),
        ..CollectedInputs::default()
    };

    for url in links {
        push_link(&mut collected.links, url);
    }

    if let Some(file) = links_file {
        match std::fs::read_to_string(file) {
            Ok(contents) => {
                for line in contents.lines() {
                    let url = line.trim();
                    if !url.is_empty() {
                        push_link(&mut collected.links, url);
                    }
                }
            }
            Err(e) => {
                tracing::error!(path = %file.display(), error = %e, "links file not readable");
            }
        }
    }

    for path in images {
        if is_supported_image(path) {
            if !collected.images.contains(path) {
                collected.images.push(path.clone());
            }
        } else {
            tracing::warn!(path = %path.display(), "invalid image file — skipping");
        }
    }

    if collected.links.is_empty() && collected.images.is_empty() && collected.topic.is_none() {
        anyhow::bail!(
            "no valid inputs provided — use --links, --links-file, --images, or --topic"
        );
    }
    Ok(collected)
}

fn push_link(links: &mut Vec<String>, url: &str) {
    if !is_instagram_post_url(url) {
        tracing::warn!(url, "invalid Instagram URL — skipping");
        return;
    }
    if !links.iter().any(|existing| existing == url) {
        links.push(url.to_string());
    }
}
