//! Shared foundations for the postforge content pipeline: application
//! configuration, the brand-context document, prompt templates, and
//! parsing helpers for free-form LLM output.

pub mod app_config;
pub mod brand;
pub mod config;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod text;

pub use app_config::AppConfig;
pub use brand::{load_brand_context, BrandContext};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use extract::extract_json;
pub use prompts::PromptStore;
