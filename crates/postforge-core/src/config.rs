use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files: useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup, no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let run_root = PathBuf::from(or_default("POSTFORGE_OUTPUT_DIR", "./output"));
    let brand_context_path = PathBuf::from(or_default(
        "POSTFORGE_BRAND_CONTEXT",
        "./config/brand_context.json",
    ));
    let prompts_dir = PathBuf::from(or_default("POSTFORGE_PROMPTS_DIR", "./prompts"));
    let log_level = or_default("POSTFORGE_LOG_LEVEL", "info");
    let http_timeout_secs = parse_u64("POSTFORGE_HTTP_TIMEOUT_SECS", "60")?;
    let scraper_user_agent = or_default(
        "POSTFORGE_SCRAPER_USER_AGENT",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    );
    let confirm_image_spend = parse_bool("POSTFORGE_CONFIRM_IMAGE_SPEND", "true")?;

    let anthropic_api_key = lookup("ANTHROPIC_API_KEY").ok();
    let google_api_key = lookup("GOOGLE_API_KEY").ok();
    let openai_api_key = lookup("OPENAI_API_KEY").ok();

    let anthropic_model = or_default("ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929");
    let gemini_model = or_default("GEMINI_MODEL", "gemini-2.0-flash");
    let imagen_model = or_default("GOOGLE_IMAGE_MODEL", "imagen-3.0-generate-001");
    let dalle_model = or_default("OPENAI_IMAGE_MODEL", "dall-e-3");

    Ok(AppConfig {
        run_root,
        brand_context_path,
        prompts_dir,
        log_level,
        http_timeout_secs,
        scraper_user_agent,
        anthropic_api_key,
        google_api_key,
        openai_api_key,
        confirm_image_spend,
        anthropic_model,
        gemini_model,
        imagen_model,
        dalle_model,
    })
}
