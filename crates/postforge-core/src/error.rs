use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading run configuration (env vars, the brand
/// context document, prompt templates). All of these are fatal: the
/// pipeline refuses to start on a broken configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("prompt template not found: {}", .0.display())]
    MissingPrompt(PathBuf),
}
