//! Provider layer for the postforge pipeline.
//!
//! Low-level typed HTTP clients for the external generation APIs
//! (Anthropic Messages, Gemini/Imagen, OpenAI Images) and the four
//! generation roles built on top of them: [`Analyzer`],
//! [`CaptionGenerator`], [`ImageGenerator`], and [`Reviewer`]. Each role
//! is an enum with one variant per live backend plus a deterministic
//! mock, selected at composition time with no runtime type inspection.

pub mod analyzer;
pub mod anthropic;
pub mod caption;
pub mod error;
pub mod gemini;
pub mod image;
pub mod media;
pub mod openai;
pub mod review;

pub use analyzer::Analyzer;
pub use anthropic::AnthropicClient;
pub use caption::{CaptionGenerator, CaptionVariant};
pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use image::{build_image_prompt, ImageGenerator, ImageStyle};
pub use openai::OpenAiClient;
pub use review::{ReviewResult, Reviewer};

/// Text/vision provider selected with `--text-provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TextProvider {
    Claude,
    Gemini,
}

impl std::fmt::Display for TextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextProvider::Claude => write!(f, "claude"),
            TextProvider::Gemini => write!(f, "gemini"),
        }
    }
}

/// Image-generation provider selected with `--image-provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImageProvider {
    Google,
    Dalle,
}

impl std::fmt::Display for ImageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageProvider::Google => write!(f, "google"),
            ImageProvider::Dalle => write!(f, "dalle"),
        }
    }
}
