//! Post review role.
//!
//! Scores a generated bundle (caption + image prompt) against the
//! inspiration analysis and the brand document on four 1-10 axes. A
//! reply that cannot be parsed as JSON degrades to neutral scores with
//! the raw text preserved for inspection, never to a failed review.

use postforge_core::{extract_json, AppConfig, BrandContext, PromptStore};
use serde::{Deserialize, Serialize};

use crate::anthropic::AnthropicClient;
use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::TextProvider;

const MAX_TOKENS: u32 = 1000;
const NEUTRAL_SCORE: u8 = 5;

/// One scored review axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisScore {
    #[serde(default = "neutral_score")]
    pub score: u8,
    #[serde(default)]
    pub reason: String,
}

fn neutral_score() -> u8 {
    NEUTRAL_SCORE
}

impl Default for AxisScore {
    fn default() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            reason: String::new(),
        }
    }
}

/// Full review of one generated post bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub brand_alignment: AxisScore,
    #[serde(default)]
    pub inspiration_match: AxisScore,
    #[serde(default)]
    pub engagement_potential: AxisScore,
    #[serde(default)]
    pub overall_quality: AxisScore,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Raw reply text, kept only when the reply could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_review: Option<String>,
}

impl ReviewResult {
    /// Neutral review used when the provider reply is unparseable.
    #[must_use]
    pub fn neutral(raw: String) -> Self {
        let axis = AxisScore {
            score: NEUTRAL_SCORE,
            reason: "Could not parse review".to_string(),
        };
        Self {
            brand_alignment: axis.clone(),
            inspiration_match: axis.clone(),
            engagement_potential: axis.clone(),
            overall_quality: axis,
            suggestions: Vec::new(),
            raw_review: Some(raw),
        }
    }
}

/// Reviewer role, one variant per backend.
pub enum Reviewer {
    Claude(ClaudeReviewer),
    Gemini(GeminiReviewer),
    Mock(MockReviewer),
}

impl Reviewer {
    /// Build the reviewer for the selected text provider.
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
            return Ok(Self::Mock(MockReviewer));
        }
        match provider {
            TextProvider::Claude => {
                let key = config
                    .anthropic_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("ANTHROPIC_API_KEY"))?;
                Ok(Self::Claude(ClaudeReviewer {
                    client: AnthropicClient::new(
                        key,
                        &config.anthropic_model,
                        config.http_timeout_secs,
                    )?,
                    system: prompts.review_post.clone(),
                }))
            }
            TextProvider::Gemini => {
                let key = config
                    .google_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("GOOGLE_API_KEY"))?;
                Ok(Self::Gemini(GeminiReviewer {
                    client: GeminiClient::new(key, config.http_timeout_secs)?,
                    model: config.gemini_model.clone(),
                    system: prompts.review_post.clone(),
                }))
            }
        }
    }

    /// Review one bundle.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport/API failure. Parse
    /// failures degrade to [`ReviewResult::neutral`].
    pub async fn review(
        &self,
        caption: &str,
        image_prompt: &str,
        analysis: &serde_json::Value,
        brand: &BrandContext,
    ) -> Result<ReviewResult, ProviderError> {
        match self {
            Self::Claude(r) => r.review(caption, image_prompt, analysis, brand).await,
            Self::Gemini(r) => r.review(caption, image_prompt, analysis, brand).await,
            Self::Mock(r) => Ok(r.review()),
        }
    }
}

/// Claude-backed reviewer.
pub struct ClaudeReviewer {
    client: AnthropicClient,
    system: String,
}

impl ClaudeReviewer {
    async fn review(
        &self,
        caption: &str,
        image_prompt: &str,
        analysis: &serde_json::Value,
        brand: &BrandContext,
    ) -> Result<ReviewResult, ProviderError> {
        let user_text = review_user_prompt(caption, image_prompt, analysis, brand);
        let response = self
            .client
            .complete(&self.system, &user_text, None, MAX_TOKENS)
            .await?;
        Ok(parse_review(response))
    }
}

/// Gemini-backed reviewer.
pub struct GeminiReviewer {
    client: GeminiClient,
    model: String,
    system: String,
}

impl GeminiReviewer {
    async fn review(
        &self,
        caption: &str,
        image_prompt: &str,
        analysis: &serde_json::Value,
        brand: &BrandContext,
    ) -> Result<ReviewResult, ProviderError> {
        let user_text = format!(
            "{}\n\n{}",
            self.system,
            review_user_prompt(caption, image_prompt, analysis, brand)
        );
        let response = self
            .client
            .generate_content(&self.model, &user_text, None)
            .await?;
        Ok(parse_review(response))
    }
}

/// Deterministic reviewer stub for mock runs.
pub struct MockReviewer;

impl MockReviewer {
    fn review(&self) -> ReviewResult {
        tracing::info!("[mock] reviewing post quality");
        ReviewResult {
            brand_alignment: AxisScore {
                score: 8,
                reason: "Good use of thyroid health angle and Benefills products".to_string(),
            },
            inspiration_match: AxisScore {
                score: 7,
                reason: "Captures the educational + visual appeal from inspiration".to_string(),
            },
            engagement_potential: AxisScore {
                score: 8,
                reason: "Strong hook, clear CTA, save-worthy content".to_string(),
            },
            overall_quality: AxisScore {
                score: 8,
                reason: "Ready to post with minor tweaks".to_string(),
            },
            suggestions: vec![
                "Consider adding a more specific pain point in the hook".to_string(),
                "Could include a question to drive comments".to_string(),
            ],
            raw_review: None,
        }
    }
}

fn review_user_prompt(
    caption: &str,
    image_prompt: &str,
    analysis: &serde_json::Value,
    brand: &BrandContext,
) -> String {
    let analysis_pretty = serde_json::to_string_pretty(analysis).unwrap_or_default();
    let brand_pretty = serde_json::to_string_pretty(brand).unwrap_or_default();
    format!(
        "Review this generated Instagram post for the {} brand:\n\n\
         **Generated Caption:**\n{caption}\n\n\
         **Image Generation Prompt:**\n{image_prompt}\n\n\
         **Original Inspiration Analysis:**\n{analysis_pretty}\n\n\
         **Brand Context:**\n{brand_pretty}\n\n\
         Score this post and provide suggestions.",
        brand.brand_name,
    )
}

fn parse_review(response: String) -> ReviewResult {
    let parsed = extract_json(&response)
        .and_then(|value| serde_json::from_value::<ReviewResult>(value).ok());
    match parsed {
        Some(review) => review,
        None => {
            tracing::warn!("could not parse review JSON — using neutral defaults");
            ReviewResult::neutral(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_review() {
        let response = r#"{
            "brand_alignment": {"score": 9, "reason": "on brand"},
            "inspiration_match": {"score": 6, "reason": "loose"},
            "engagement_potential": {"score": 7, "reason": "solid hook"},
            "overall_quality": {"score": 8, "reason": "ship it"},
            "suggestions": ["tighten the CTA"]
        }"#
        .to_string();
        let review = parse_review(response);
        assert_eq!(review.brand_alignment.score, 9);
        assert_eq!(review.suggestions, vec!["tighten the CTA"]);
        assert!(review.raw_review.is_none());
    }

    #[test]
    fn missing_axes_default_to_neutral_score() {
        let response = r#"{"overall_quality": {"score": 8, "reason": "good"}}"#.to_string();
        let review = parse_review(response);
        assert_eq!(review.overall_quality.score, 8);
        assert_eq!(review.brand_alignment.score, 5);
        assert!(review.brand_alignment.reason.is_empty());
    }

    #[test]
    fn unparseable_reply_degrades_to_neutral_with_raw_text() {
        let review = parse_review("This post looks great overall!".to_string());
        assert_eq!(review.brand_alignment.score, 5);
        assert_eq!(review.brand_alignment.reason, "Could not parse review");
        assert_eq!(review.overall_quality.score, 5);
        assert!(review.suggestions.is_empty());
        assert_eq!(
            review.raw_review.as_deref(),
            Some("This post looks great overall!")
        );
    }

    #[test]
    fn raw_review_is_omitted_from_serialized_output() {
        let review = MockReviewer.review();
        let value = serde_json::to_value(&review).unwrap();
        assert!(value.get("raw_review").is_none());
        assert_eq!(value["inspiration_match"]["score"], 7);
    }
}
