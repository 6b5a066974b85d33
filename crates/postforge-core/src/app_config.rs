use std::path::PathBuf;

/// Runtime configuration for a pipeline run, sourced from environment
/// variables (see [`crate::config::load_app_config`]).
///
/// API keys are optional here; each is validated only when the matching
/// live provider is actually selected for a run.
#[derive(Clone)]
pub struct AppConfig {
    /// Root directory under which timestamped `run_*` directories are created.
    pub run_root: PathBuf,
    /// Path to the brand-context JSON document.
    pub brand_context_path: PathBuf,
    /// Directory holding the prompt-template documents.
    pub prompts_dir: PathBuf,
    pub log_level: String,
    /// Per-request timeout applied to every provider and scraper call.
    pub http_timeout_secs: u64,
    /// User-agent sent by the inspiration scraper.
    pub scraper_user_agent: String,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// When `true` (the default), paid DALL-E generation calls require an
    /// interactive confirmation before each request.
    pub confirm_image_spend: bool,
    pub anthropic_model: String,
    pub gemini_model: String,
    pub imagen_model: String,
    pub dalle_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("run_root", &self.run_root)
            .field("brand_context_path", &self.brand_context_path)
            .field("prompts_dir", &self.prompts_dir)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("confirm_image_spend", &self.confirm_image_spend)
            .field("anthropic_model", &self.anthropic_model)
            .field("gemini_model", &self.gemini_model)
            .field("imagen_model", &self.imagen_model)
            .field("dalle_model", &self.dalle_model)
            .finish()
    }
}
