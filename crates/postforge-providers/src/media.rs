use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A base64-encoded image ready to attach to a vision request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub media_type: &'static str,
    pub data_b64: String,
}

impl ImageAttachment {
    /// Read and encode an image file for attachment.
    ///
    /// Returns `None` for missing files and for `.txt` placeholders
    /// (mock-scrape artifacts carry a `.txt` extension precisely so they
    /// are never attached as image bytes). Read failures are logged and
    /// also yield `None`; a missing attachment degrades the analysis, it
    /// does not abort it.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();
        if ext == "txt" {
            return None;
        }

        match std::fs::read(path) {
            Ok(bytes) => Some(Self {
                media_type: media_type_for(&ext),
                data_b64: STANDARD.encode(bytes),
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load image for analysis");
                None
            }
        }
    }
}

fn media_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "webp" => "image/webp",
        // jpg/jpeg and anything unrecognized
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_real_image_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inspo_1.png");
        std::fs::write(&path, b"png-bytes").unwrap();
        let attachment = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(attachment.media_type, "image/png");
        assert_eq!(attachment.data_b64, STANDARD.encode(b"png-bytes"));
    }

    #[test]
    fn skips_txt_placeholders_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let placeholder = dir.path().join("inspo_1.txt");
        std::fs::write(&placeholder, "[MOCK IMAGE]").unwrap();
        assert!(ImageAttachment::from_path(&placeholder).is_none());
        assert!(ImageAttachment::from_path(&dir.path().join("missing.jpg")).is_none());
    }

    #[test]
    fn unknown_extensions_default_to_jpeg() {
        assert_eq!(media_type_for("heic"), "image/jpeg");
        assert_eq!(media_type_for("jpg"), "image/jpeg");
        assert_eq!(media_type_for("webp"), "image/webp");
    }
}
