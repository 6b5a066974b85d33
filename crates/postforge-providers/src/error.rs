use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the provider clients and generation roles.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider API returned a non-2xx status with an error message.
    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The env var holding the selected provider's API key is not set.
    #[error("{0} not set — required for the selected provider")]
    MissingKey(&'static str),

    /// The provider answered 2xx but with no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Base64 image payload from the provider could not be decoded.
    #[error("invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operator declined the paid-generation confirmation prompt.
    /// Treated by the orchestrator as "image absent", not a failure.
    #[error("image generation declined at the confirmation prompt")]
    Declined,
}
