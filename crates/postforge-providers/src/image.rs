//! Image generation role.
//!
//! Builds an Instagram-ready prompt from the inspiration analysis and
//! the brand document, applies one of the named style templates, and
//! renders through Imagen or DALL-E. DALL-E calls cost real money per
//! image, so they sit behind an interactive confirmation gate unless
//! the operator disables it.

use std::fmt;
use std::path::Path;

use dialoguer::Confirm;
use postforge_core::{AppConfig, BrandContext};

use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;
use crate::ImageProvider;

const LIFESTYLE_TEMPLATE: &str =
    "Professional Instagram lifestyle product photography of {description}. \
     Setting: Natural, authentic environment (modern kitchen counter, sunny breakfast table, or cozy living room). \
     Lighting: Natural sunlight, golden hour, soft directional warmth. \
     Styling: Casual organic feel with complementary props (fresh ingredients, scattered seeds, wooden surface). \
     Product is the clear hero but context adds warmth. \
     Aesthetic: Fresh, healthy, wholesome, premium Indian health food brand. \
     Colors: Soft purple/lavender accents, warm beige, fresh greens. \
     Aspect ratio 4:5, Instagram-optimized, high-res, commercial quality, no text on image.";

const POSTER_TEMPLATE: &str =
    "High-resolution Instagram post image (4:5 aspect ratio) of {description}. \
     Dynamic premium composition, mouthwatering textures, vibrant colors. \
     Deep rich backdrop with dramatic professional studio lighting, depth of field, high contrast. \
     Premium luxurious feel. No hands, people, text, logos, or distracting elements. \
     Commercial advertising quality, ultra-detailed.";

const FLATLAY_TEMPLATE: &str =
    "Top-down flat lay product photography for Instagram (4:5). {description}. \
     Centered main product with aesthetic props scattered around \
     (scattered seeds, dried berries, honey drizzle, fresh herbs). \
     Warm beige seamless background, soft directional sunlight, crisp realistic shadow. \
     Ultra-realistic, macro photography feel, sharp focus, clean composition, no text. 8k quality.";

const EDITORIAL_TEMPLATE: &str =
    "High-key editorial product shot for Instagram of {description}. \
     Aspect ratio 4:5. Artistic composition with creative angles. \
     Magazine-quality lighting with soft studio setup. \
     Clean, sophisticated, premium feel. Minimal background. Sharp focus. \
     Commercial advertising standard. No text overlay.";

const AMAZON_TEMPLATE: &str =
    "Product image for e-commerce listing: {description}. \
     Pure white background (RGB 255, 255, 255). Front view, crystal clear product-centric shot. \
     No props, no distractions, no text. Soft studio lighting, sharp focus throughout. \
     Product fills 85% of frame. Square 1:1 format.";

/// Named image style template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImageStyle {
    Lifestyle,
    Poster,
    Flatlay,
    Editorial,
    Amazon,
}

impl ImageStyle {
    fn template(self) -> &'static str {
        match self {
            Self::Lifestyle => LIFESTYLE_TEMPLATE,
            Self::Poster => POSTER_TEMPLATE,
            Self::Flatlay => FLATLAY_TEMPLATE,
            Self::Editorial => EDITORIAL_TEMPLATE,
            Self::Amazon => AMAZON_TEMPLATE,
        }
    }

    /// Wrap a scene description in this style's template.
    #[must_use]
    pub fn apply(self, description: &str) -> String {
        self.template().replace("{description}", description)
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lifestyle => "lifestyle",
            Self::Poster => "poster",
            Self::Flatlay => "flatlay",
            Self::Editorial => "editorial",
            Self::Amazon => "amazon",
        };
        f.write_str(name)
    }
}

/// Image generator role, one variant per backend.
pub enum ImageGenerator {
    Google(GoogleImageGenerator),
    Dalle(DalleImageGenerator),
    Mock(MockImageGenerator),
}

impl ImageGenerator {
    /// Build the image generator for the selected provider.
    ///
    /// A live provider whose API key is missing falls back to the mock
    /// generator with a warning rather than failing the run.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn new(
        provider: ImageProvider,
        mock: bool,
        config: &AppConfig,
    ) -> Result<Self, ProviderError> {
        if mock {
            return Ok(Self::Mock(MockImageGenerator));
        }
        match provider {
            ImageProvider::Google => {
                if let Some(key) = config.google_api_key.as_deref() {
                    return Ok(Self::Google(GoogleImageGenerator {
                        client: GeminiClient::new(key, config.http_timeout_secs)?,
                        model: config.imagen_model.clone(),
                    }));
                }
            }
            ImageProvider::Dalle => {
                if let Some(key) = config.openai_api_key.as_deref() {
                    return Ok(Self::Dalle(DalleImageGenerator {
                        client: OpenAiClient::new(key, config.http_timeout_secs)?,
                        model: config.dalle_model.clone(),
                        confirm_spend: config.confirm_image_spend,
                    }));
                }
            }
        }
        tracing::warn!(
            provider = %provider,
            "image provider requested but API key missing — falling back to mock generator"
        );
        Ok(Self::Mock(MockImageGenerator))
    }

    /// Render one image for `prompt` in `style` and save it to
    /// `output_path`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Declined`] when the operator rejects a paid
    ///   DALL-E call at the confirmation gate.
    /// - [`ProviderError::Io`] when the image cannot be written.
    /// - Any transport/API error from the backing client.
    pub async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        style: ImageStyle,
    ) -> Result<(), ProviderError> {
        match self {
            Self::Google(g) => g.generate(prompt, output_path, style).await,
            Self::Dalle(g) => g.generate(prompt, output_path, style).await,
            Self::Mock(g) => g.generate(prompt, output_path, style),
        }
    }
}

/// Imagen-backed image generator.
pub struct GoogleImageGenerator {
    client: GeminiClient,
    model: String,
}

impl GoogleImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        style: ImageStyle,
    ) -> Result<(), ProviderError> {
        let styled = style.apply(prompt);
        tracing::info!(style = %style, "generating image with Imagen");
        let bytes = self.client.generate_image(&self.model, &styled).await?;
        write_image(output_path, &bytes)
    }
}

/// DALL-E-backed image generator with a per-call spend confirmation.
pub struct DalleImageGenerator {
    client: OpenAiClient,
    model: String,
    confirm_spend: bool,
}

impl DalleImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        style: ImageStyle,
    ) -> Result<(), ProviderError> {
        if self.confirm_spend && !spend_confirmed(&self.model) {
            return Err(ProviderError::Declined);
        }
        let styled = style.apply(prompt);
        tracing::info!(style = %style, "generating image with DALL-E");
        let bytes = self.client.generate_image(&self.model, &styled).await?;
        write_image(output_path, &bytes)
    }
}

/// Mock generator: writes a text placeholder where the image would be so
/// the bundle layout stays inspectable without any API spend.
pub struct MockImageGenerator;

impl MockImageGenerator {
    fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        style: ImageStyle,
    ) -> Result<(), ProviderError> {
        let placeholder = format!("[MOCK IMAGE]\nStyle: {style}\nPrompt: {prompt}");
        write_image(output_path, placeholder.as_bytes())?;
        tracing::info!(path = %output_path.display(), "[mock] image saved");
        Ok(())
    }
}

fn spend_confirmed(model: &str) -> bool {
    let prompt = format!("Generate one paid {model} image?");
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %e, "spend confirmation unavailable — declining image call");
            false
        }
    }
}

fn write_image(output_path: &Path, bytes: &[u8]) -> Result<(), ProviderError> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ProviderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(output_path, bytes).map_err(|source| ProviderError::Io {
        path: output_path.to_path_buf(),
        source,
    })
}

/// Build an image-generation prompt from the analysis' visual insights
/// and the brand document. Missing analysis fields collapse to empty
/// strings rather than placeholders.
#[must_use]
pub fn build_image_prompt(analysis: &serde_json::Value, brand: &BrandContext) -> String {
    let str_at = |outer: &str, inner: &str| -> String {
        analysis
            .get(outer)
            .and_then(|v| v.get(inner))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    let borrow_elements = str_at("adaptation_notes", "what_to_borrow");
    let brand_angle = str_at("adaptation_notes", "brand_angle");
    let color_palette = str_at("visual_aesthetics", "color_palette");
    let props = str_at("visual_aesthetics", "props");
    let colors = serde_json::to_string(&brand.colors).unwrap_or_default();

    format!(
        "{} brand '{}' — Instagram performance marketing image. \
         Inspired by: {borrow_elements}. \
         Brand angle: {brand_angle}. \
         Color hints: {color_palette}, with brand colors {colors}. \
         Props/styling: {props}. \
         Must look premium, appetizing, and scroll-stopping for Instagram.",
        brand.brand_name,
        brand.featured_product(),
    )
}
