//! Inspiration analysis role.
//!
//! Takes a scraped post (image + caption) or a bare topic and asks a
//! text/vision provider for a structured JSON analysis of visual style
//! and content strategy. The analysis is free-form
//! (`serde_json::Value`): providers vary in how faithfully they follow
//! the framework, and an unparseable reply degrades to
//! `{"raw_analysis": ...}` rather than failing the run.

use std::path::Path;

use postforge_core::text::truncate_text;
use postforge_core::{extract_json, AppConfig, BrandContext, PromptStore};

use crate::anthropic::AnthropicClient;
use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::media::ImageAttachment;
use crate::TextProvider;

const MAX_TOKENS: u32 = 2000;
const CAPTION_PROMPT_CAP: usize = 2000;

/// Analyzer role, one variant per backend.
pub enum Analyzer {
    Claude(ClaudeAnalyzer),
    Gemini(GeminiAnalyzer),
    Mock(MockAnalyzer),
}

impl Analyzer {
    /// Build the analyzer for the selected provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingKey`] when the selected live
    /// provider's API key is not configured, or [`ProviderError::Http`]
    /// if the HTTP client cannot be constructed.
    pub fn new(
        provider: TextProvider,
        mock: bool,
        config: &AppConfig,
        prompts: &PromptStore,
    ) -> Result<Self, ProviderError> {
        if mock {
            return Ok(Self::Mock(MockAnalyzer));
        }
        match provider {
            TextProvider::Claude => {
                let key = config
                    .anthropic_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("ANTHROPIC_API_KEY"))?;
                Ok(Self::Claude(ClaudeAnalyzer {
                    client: AnthropicClient::new(
                        key,
                        &config.anthropic_model,
                        config.http_timeout_secs,
                    )?,
                    system_analyze: prompts.analyze_inspo.clone(),
                    system_ideate: prompts.ideate_concept.clone(),
                }))
            }
            TextProvider::Gemini => {
                let key = config
                    .google_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("GOOGLE_API_KEY"))?;
                Ok(Self::Gemini(GeminiAnalyzer {
                    client: GeminiClient::new(key, config.http_timeout_secs)?,
                    model: config.gemini_model.clone(),
                    system_analyze: prompts.analyze_inspo.clone(),
                    system_ideate: prompts.ideate_concept.clone(),
                }))
            }
        }
    }

    /// Analyze one inspiration post. Image bytes are attached only when
    /// `image_path` points at a real image (never a `.txt` placeholder).
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport/API failure. Parse
    /// failures never error; they degrade to a raw-text container.
    pub async fn analyze(
        &self,
        image_path: &Path,
        caption: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        match self {
            Self::Claude(a) => a.analyze(image_path, caption, brand).await,
            Self::Gemini(a) => a.analyze(image_path, caption, brand).await,
            Self::Mock(a) => Ok(a.analyze()),
        }
    }

    /// Generate a concept analysis from scratch for a topic. The result
    /// carries a `{"type": "scratch", "topic": ...}` `_source` marker.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport/API failure.
    pub async fn generate_concept(
        &self,
        topic: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        let mut analysis = match self {
            Self::Claude(a) => a.generate_concept(topic, brand).await?,
            Self::Gemini(a) => a.generate_concept(topic, brand).await?,
            Self::Mock(a) => a.generate_concept(),
        };
        if let Some(obj) = analysis.as_object_mut() {
            obj.insert(
                "_source".to_string(),
                serde_json::json!({"type": "scratch", "topic": topic}),
            );
        }
        Ok(analysis)
    }
}

/// Claude-backed analyzer (vision-capable).
pub struct ClaudeAnalyzer {
    client: AnthropicClient,
    system_analyze: String,
    system_ideate: String,
}

impl ClaudeAnalyzer {
    async fn analyze(
        &self,
        image_path: &Path,
        caption: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        let attachment = ImageAttachment::from_path(image_path);
        let user_text = inspiration_user_prompt(caption, brand);
        let response = self
            .client
            .complete(&self.system_analyze, &user_text, attachment.as_ref(), MAX_TOKENS)
            .await?;
        Ok(wrap_or_raw(response))
    }

    async fn generate_concept(
        &self,
        topic: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        let user_text = concept_user_prompt(topic, brand);
        let response = self
            .client
            .complete(&self.system_ideate, &user_text, None, MAX_TOKENS)
            .await?;
        Ok(wrap_or_raw(response))
    }
}

/// Gemini-backed analyzer. Gemini takes no separate system slot here, so
/// the template is prepended to the user prompt.
pub struct GeminiAnalyzer {
    client: GeminiClient,
    model: String,
    system_analyze: String,
    system_ideate: String,
}

impl GeminiAnalyzer {
    async fn analyze(
        &self,
        image_path: &Path,
        caption: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        let attachment = ImageAttachment::from_path(image_path);
        let prompt = format!(
            "{}\n\n{}",
            self.system_analyze,
            inspiration_user_prompt(caption, brand)
        );
        let response = self
            .client
            .generate_content(&self.model, &prompt, attachment.as_ref())
            .await?;
        Ok(wrap_or_raw(response))
    }

    async fn generate_concept(
        &self,
        topic: &str,
        brand: &BrandContext,
    ) -> Result<serde_json::Value, ProviderError> {
        let prompt = format!(
            "{}\n\n{}",
            self.system_ideate,
            concept_user_prompt(topic, brand)
        );
        let response = self
            .client
            .generate_content(&self.model, &prompt, None)
            .await?;
        Ok(wrap_or_raw(response))
    }
}

/// Deterministic analyzer stub for mock runs.
pub struct MockAnalyzer;

impl MockAnalyzer {
    fn analyze(&self) -> serde_json::Value {
        tracing::info!("[mock] analyzing inspiration content");
        serde_json::json!({
            "visual_aesthetics": {
                "color_palette": "Warm earth tones with green accents",
                "composition": "Centered product with flat-lay styling",
                "lighting": "Natural soft light, slight golden hour warmth",
                "typography": "Bold sans-serif headline, minimal text",
                "props": "Scattered seeds, wooden surface, linen backdrop"
            },
            "content_strategy": {
                "hook_type": "Bold health claim with specific benefit",
                "value_proposition": "Functional nutrition made delicious",
                "content_format": "Product showcase with educational angle",
                "cta_approach": "Direct link in bio + discount code"
            },
            "engagement_elements": {
                "caption_structure": "Hook + 3-line body + CTA + hashtags",
                "emotional_trigger": "Aspiration + pain point",
                "shareability": "High — relatable health tip with save-worthy info"
            },
            "adaptation_notes": {
                "what_to_borrow": "Flat-lay composition, warm tones, ingredient-focused styling",
                "what_to_skip": "Generic wellness messaging without specific claims",
                "brand_angle": "Tie to thyroid health with Selenium/Zinc callout"
            }
        })
    }

    fn generate_concept(&self) -> serde_json::Value {
        tracing::info!("[mock] generating concept from topic");
        serde_json::json!({
            "visual_aesthetics": {
                "color_palette": "Fresh greens and whites",
                "composition": "Minimalist product shot",
                "lighting": "Bright studio lighting",
                "typography": "Clean sans-serif",
                "props": "Fresh ingredients related to topic"
            },
            "content_strategy": {
                "hook_type": "Did you know?",
                "value_proposition": "Simple health hack",
                "content_format": "Infographic style",
                "cta_approach": "Save for later"
            },
            "engagement_elements": {
                "caption_structure": "Question -> Answer -> CTA",
                "emotional_trigger": "Curiosity",
                "shareability": "High utility"
            },
            "adaptation_notes": {
                "what_to_borrow": "Clean layout",
                "what_to_skip": "Clutter",
                "brand_angle": "Thyroid-friendly twist"
            }
        })
    }
}

fn inspiration_user_prompt(caption: &str, brand: &BrandContext) -> String {
    let audience = serde_json::to_string_pretty(&brand.target_audience).unwrap_or_default();
    format!(
        "Analyze this Instagram post inspiration:\n\n\
         **Caption from the post:**\n{}\n\n\
         **Our brand context ({}):**\n\
         - Brand: {}\n\
         - Products: {}\n\
         - Topics: {}\n\
         - Target audience: {audience}\n\n\
         Provide a structured analysis as JSON following the framework in your system prompt.",
        truncate_text(caption, CAPTION_PROMPT_CAP),
        brand.brand_name,
        brand.brand_name,
        brand.products_csv(),
        brand.topics_csv(),
    )
}

fn concept_user_prompt(topic: &str, brand: &BrandContext) -> String {
    let audience = serde_json::to_string_pretty(&brand.target_audience).unwrap_or_default();
    format!(
        "Topic: {topic}\n\n\
         Brand Context:\n\
         - Brand: {}\n\
         - Products: {}\n\
         - Topics: {}\n\
         - Target Audience: {audience}\n\n\
         Generate a detailed concept for an Instagram post about this topic.",
        brand.brand_name,
        brand.products_csv(),
        brand.topics_csv(),
    )
}

/// Parse the provider reply, degrading to a raw-text container when no
/// JSON can be extracted.
fn wrap_or_raw(response: String) -> serde_json::Value {
    match extract_json(&response) {
        Some(value) => value,
        None => {
            tracing::warn!("could not parse JSON from analysis response — keeping raw text");
            serde_json::json!({"raw_analysis": response})
        }
    }
}
