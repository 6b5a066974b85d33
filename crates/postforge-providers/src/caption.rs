//! Caption generation role.
//!
//! Produces Instagram caption variants (caption text + hashtag block)
//! from an inspiration analysis and the brand document. Providers are
//! asked for a JSON array; replies that arrive in looser shapes (an
//! object wrapping the array, a single object, or plain prose) are
//! coerced into a variant list instead of failing.

use postforge_core::{extract_json, AppConfig, BrandContext, PromptStore};
use serde::{Deserialize, Serialize};

use crate::anthropic::AnthropicClient;
use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::TextProvider;

const MAX_TOKENS: u32 = 3000;

/// One generated caption variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionVariant {
    #[serde(default)]
    pub variant: u32,
    #[serde(default)]
    pub angle: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: String,
}

/// Caption generator role, one variant per backend.
pub enum CaptionGenerator {
    Claude(ClaudeCaptionGenerator),
    Gemini(GeminiCaptionGenerator),
    Mock(MockCaptionGenerator),
}

impl CaptionGenerator {
    /// Build the caption generator for the selected provider.
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
            return Ok(Self::Mock(MockCaptionGenerator));
        }
        match provider {
            TextProvider::Claude => {
                let key = config
                    .anthropic_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("ANTHROPIC_API_KEY"))?;
                Ok(Self::Claude(ClaudeCaptionGenerator {
                    client: AnthropicClient::new(
                        key,
                        &config.anthropic_model,
                        config.http_timeout_secs,
                    )?,
                    system: prompts.generate_caption.clone(),
                }))
            }
            TextProvider::Gemini => {
                let key = config
                    .google_api_key
                    .as_deref()
                    .ok_or(ProviderError::MissingKey("GOOGLE_API_KEY"))?;
                Ok(Self::Gemini(GeminiCaptionGenerator {
                    client: GeminiClient::new(key, config.http_timeout_secs)?,
                    model: config.gemini_model.clone(),
                    system: prompts.generate_caption.clone(),
                }))
            }
        }
    }

    /// Generate `num_variants` caption variants for an analysis. Variant
    /// numbers in the returned list are always sequential from 1.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport/API failure. Parse
    /// failures degrade to a single raw-text variant.
    pub async fn generate(
        &self,
        analysis: &serde_json::Value,
        brand: &BrandContext,
        num_variants: u32,
    ) -> Result<Vec<CaptionVariant>, ProviderError> {
        let mut variants = match self {
            Self::Claude(g) => g.generate(analysis, brand, num_variants).await?,
            Self::Gemini(g) => g.generate(analysis, brand, num_variants).await?,
            Self::Mock(g) => g.generate(num_variants),
        };
        for (i, variant) in variants.iter_mut().enumerate() {
            variant.variant = u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1);
        }
        Ok(variants)
    }
}

/// Claude-backed caption generator.
pub struct ClaudeCaptionGenerator {
    client: AnthropicClient,
    system: String,
}

impl ClaudeCaptionGenerator {
    async fn generate(
        &self,
        analysis: &serde_json::Value,
        brand: &BrandContext,
        num_variants: u32,
    ) -> Result<Vec<CaptionVariant>, ProviderError> {
        let user_text = caption_user_prompt(analysis, brand, num_variants);
        let response = self
            .client
            .complete(&self.system, &user_text, None, MAX_TOKENS)
            .await?;
        Ok(parse_variants(&response))
    }
}

/// Gemini-backed caption generator. The template is prepended to the
/// user prompt since no separate system slot is used here.
pub struct GeminiCaptionGenerator {
    client: GeminiClient,
    model: String,
    system: String,
}

impl GeminiCaptionGenerator {
    async fn generate(
        &self,
        analysis: &serde_json::Value,
        brand: &BrandContext,
        num_variants: u32,
    ) -> Result<Vec<CaptionVariant>, ProviderError> {
        let user_text = format!(
            "{}\n\n{}",
            self.system,
            caption_user_prompt(analysis, brand, num_variants)
        );
        let response = self
            .client
            .generate_content(&self.model, &user_text, None)
            .await?;
        Ok(parse_variants(&response))
    }
}

/// Deterministic caption generator stub for mock runs. Variants alternate
/// between an educational and a relatable angle.
pub struct MockCaptionGenerator;

impl MockCaptionGenerator {
    fn generate(&self, num_variants: u32) -> Vec<CaptionVariant> {
        tracing::info!(num_variants, "[mock] generating caption variants");
        (0..num_variants)
            .map(|i| CaptionVariant {
                variant: i + 1,
                angle: if i % 2 == 0 {
                    "educational".to_string()
                } else {
                    "relatable".to_string()
                },
                caption: "Your thyroid needs these 3 minerals daily. ✨\n\n\
                          Most people supplement blindly. But science says your thyroid specifically craves:\n\n\
                          → Selenium (found in our Seeds Boost Bar)\n\
                          → Zinc (packed into Nut-ella Nut Butter)\n\
                          → Ashwagandha (in every Thyrovibe Care Pack)\n\n\
                          We didn't just make snacks. We made functional nutrition that your body actually recognizes.\n\n\
                          🔗 Link in bio | Use code FIRSTLOVE20 for 20% off\n\n\
                          What's your biggest thyroid health question? Drop it below 👇"
                    .to_string(),
                hashtags: "#Benefills #ThyroidHealth #FunctionalFoods #CleanEating \
                           #HealthySnacks #NutButter #ThyroidNourishment #WellnessJourney \
                           #ThyroidWarrior #Selenium #Zinc #Ashwagandha #HealthyLiving \
                           #IndianHealthFood #NutritionFacts #ThyroidDiet"
                    .to_string(),
            })
            .collect()
    }
}

fn caption_user_prompt(
    analysis: &serde_json::Value,
    brand: &BrandContext,
    num_variants: u32,
) -> String {
    let analysis_pretty = serde_json::to_string_pretty(analysis).unwrap_or_default();
    let audience = serde_json::to_string_pretty(&brand.target_audience).unwrap_or_default();
    format!(
        "Based on this competitor inspiration analysis:\n{analysis_pretty}\n\n\
         Brand context:\n\
         - Brand: {}\n\
         - Products: {}\n\
         - Key ingredients: {}\n\
         - Topics: {}\n\
         - Target audience: {audience}\n\
         - CTA options: {}\n\
         - Seed hashtags: {}\n\n\
         Generate {num_variants} distinct caption variants. Each should take a DIFFERENT angle\n\
         (e.g., one educational, one emotional/relatable).\n\n\
         Return as a JSON array:\n\
         [\n  {{\n    \"variant\": 1,\n    \"angle\": \"educational\",\n    \
         \"caption\": \"full caption text here\",\n    \"hashtags\": \"#hashtag1 #hashtag2 ...\"\n  }},\n  ...\n]",
        brand.brand_name,
        brand.products_csv(),
        brand.key_ingredients_csv(),
        brand.topics_csv(),
        brand.cta_csv(),
        brand.hashtags_csv(),
    )
}

/// Coerce a provider reply into a variant list.
///
/// Accepted shapes, in order: a JSON array, an object whose first
/// array-valued field holds the variants, a single variant object. When
/// no JSON can be extracted at all, the whole reply becomes one
/// `"mixed"` variant.
fn parse_variants(response: &str) -> Vec<CaptionVariant> {
    let Some(value) = extract_json(response) else {
        tracing::warn!("could not parse JSON from caption response — using raw text");
        return vec![CaptionVariant {
            variant: 1,
            angle: "mixed".to_string(),
            caption: response.to_string(),
            hashtags: String::new(),
        }];
    };

    let list = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => {
            let inner = map.values().find_map(|v| v.as_array().cloned());
            match inner {
                Some(items) => items,
                None => vec![serde_json::Value::Object(map)],
            }
        }
        other => vec![other],
    };

    list.into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}
