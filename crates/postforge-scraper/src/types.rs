use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One scraped inspiration post: the downloaded (or copied) image plus
/// whatever caption and engagement metadata the source exposed.
/// Immutable after creation; serialized whole into the analysis
/// `_source` back-reference and the output bundle metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPost {
    pub image_path: PathBuf,
    pub caption: String,
    pub source_url: String,
    pub likes: u64,
    pub comments: u64,
}

impl ScrapedPost {
    /// The `_source` back-reference stamped onto this post's analysis.
    ///
    /// # Panics
    ///
    /// Never panics in practice: the struct contains only
    /// JSON-representable fields.
    #[must_use]
    pub fn source_value(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("ScrapedPost is always JSON-representable")
    }
}
