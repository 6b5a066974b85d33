//! HTTP client for the Anthropic Messages API.
//!
//! Wraps `reqwest` with the `x-api-key` / `anthropic-version` headers,
//! optional base64 image attachment for vision requests, and typed
//! response handling. Non-2xx responses surface the API's own error
//! message as [`ProviderError::Api`].

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::media::ImageAttachment;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
///
/// Use [`AnthropicClient::new`] for production or
/// [`AnthropicClient::with_base_url`] to point at a mock server in tests.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        })
    }

    /// Sends a single-turn message and returns the first text block of the
    /// reply. An image attachment, when present, is placed before the text
    /// block so the model sees it in context.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-2xx response.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body is not the expected shape.
    /// - [`ProviderError::EmptyResponse`] if the reply has no text block.
    pub async fn complete(
        &self,
        system: &str,
        user_text: &str,
        image: Option<&ImageAttachment>,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let mut content = Vec::new();
        if let Some(attachment) = image {
            content.push(serde_json::json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": attachment.media_type,
                    "data": attachment.data_b64,
                }
            }));
        }
        content.push(serde_json::json!({"type": "text", "text": user_text}));

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "system": system,
            "messages": [{"role": "user", "content": content}],
        });

        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "anthropic",
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
                context: url,
                source: e,
            })?;
        parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Pull the `error.message` field out of an error body, falling back to
/// the raw text when the body is not the usual envelope.
pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}
