use std::path::{Path, PathBuf};

use crate::error::ScraperError;
use crate::types::ScrapedPost;

/// Copy local inspiration images into the run's working directory under
/// positional `inspo_{i}` names. Missing files are skipped with a
/// warning; the copy keeps the original extension.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if `output_dir` cannot be created.
pub fn load_local_images(
    paths: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<ScrapedPost>, ScraperError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ScraperError::Io {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut posts = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "image not found — skipping");
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let dest = output_dir.join(format!("inspo_{}{ext}", i + 1));
        if let Err(e) = std::fs::copy(path, &dest) {
            tracing::warn!(path = %path.display(), error = %e, "could not copy image — skipping");
            continue;
        }

        let absolute = path
            .canonicalize()
            .unwrap_or_else(|_| path.clone());
        posts.push(ScrapedPost {
            image_path: dest,
            caption: "[Local image — no caption available]".to_string(),
            source_url: format!("file://{}", absolute.display()),
            likes: 0,
            comments: 0,
        });
        tracing::info!(path = %path.display(), "loaded local image");
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_existing_images_with_positional_names() {
        let src_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let a = src_dir.path().join("a.png");
        let b = src_dir.path().join("b.jpg");
        std::fs::write(&a, b"png-bytes").unwrap();
        std::fs::write(&b, b"jpg-bytes").unwrap();

        let posts = load_local_images(&[a, b], out_dir.path()).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts[0].image_path.ends_with("inspo_1.png"));
        assert!(posts[1].image_path.ends_with("inspo_2.jpg"));
        assert!(posts[0].source_url.starts_with("file://"));
        assert_eq!(posts[0].caption, "[Local image — no caption available]");
    }

    #[test]
    fn missing_files_are_skipped_not_fatal() {
        let src_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let real = src_dir.path().join("real.webp");
        std::fs::write(&real, b"webp").unwrap();
        let missing = src_dir.path().join("missing.png");

        let posts = load_local_images(&[missing, real], out_dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        // Positional index counts input slots, so the surviving file keeps
        // its original position.
        assert!(posts[0].image_path.ends_with("inspo_2.webp"));
    }
}
