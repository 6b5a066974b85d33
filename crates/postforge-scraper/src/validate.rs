use std::path::Path;

use reqwest::Url;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Check whether a URL looks like a public Instagram post link: host
/// `instagram.com` (optionally `www.`) with a `/p/<id>` path segment.
#[must_use]
pub fn is_instagram_post_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let host_ok = matches!(parsed.host_str(), Some("instagram.com" | "www.instagram.com"));
    host_ok && parsed.path().contains("/p/")
}

/// Check whether a path points to an existing file with a supported image
/// extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lowered = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lowered.as_str())
        })
}
