use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Social-media knobs used when prompting for captions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default)]
    pub cta_options: Vec<String>,
    #[serde(default)]
    pub hashtags_seed: Vec<String>,
}

/// The brand-context document: every attribute of the single brand the
/// pipeline generates content for. Loaded once per run from
/// `config/brand_context.json` and immutable for the run's duration;
/// every generation step consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandContext {
    pub brand_name: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub key_ingredients: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Free-form audience description; passed to prompts verbatim.
    #[serde(default)]
    pub target_audience: serde_json::Value,
    /// Brand color palette, name → hex.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub social_media: SocialMedia,
}

impl BrandContext {
    #[must_use]
    pub fn products_csv(&self) -> String {
        self.products.join(", ")
    }

    #[must_use]
    pub fn key_ingredients_csv(&self) -> String {
        self.key_ingredients.join(", ")
    }

    #[must_use]
    pub fn topics_csv(&self) -> String {
        self.topics.join(", ")
    }

    #[must_use]
    pub fn cta_csv(&self) -> String {
        self.social_media.cta_options.join(", ")
    }

    #[must_use]
    pub fn hashtags_csv(&self) -> String {
        self.social_media.hashtags_seed.join(", ")
    }

    /// First product, used as the featured product in image prompts.
    #[must_use]
    pub fn featured_product(&self) -> &str {
        self.products
            .first()
            .map_or("functional health food product", String::as_str)
    }
}

/// Load the brand context from a JSON document.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not valid JSON for the fixed schema.
pub fn load_brand_context(path: &Path) -> Result<BrandContext, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
