//! HTTP client for the Gemini `generateContent` and Imagen `predict`
//! endpoints of the Generative Language API. Both take the API key as a
//! query parameter rather than a header.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::anthropic::api_error_message;
use crate::error::ProviderError;
use crate::media::ImageAttachment;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for Google's Generative Language API (Gemini text/vision and
/// Imagen image generation).
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
}

impl GeminiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
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
        })
    }

    /// Generates text from a prompt, optionally grounded on an inline
    /// image. Returns the first text part of the first candidate.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-2xx response.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body is not the expected shape.
    /// - [`ProviderError::EmptyResponse`] if no candidate carries text.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, ProviderError> {
        let mut parts = Vec::new();
        if let Some(attachment) = image {
            parts.push(serde_json::json!({
                "inline_data": {
                    "mime_type": attachment.media_type,
                    "data": attachment.data_b64,
                }
            }));
        }
        parts.push(serde_json::json!({"text": prompt}));

        let body = serde_json::json!({"contents": [{"parts": parts}]});
        let url = format!(
            "{}/v1beta/models/{model}:generateContent?key={}",
            self.base_url, self.api_key
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "gemini",
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
                context: format!("generateContent({model})"),
                source: e,
            })?;
        parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.text)
            .ok_or(ProviderError::EmptyResponse)
    }

    /// Generates one image via Imagen's `predict` endpoint and returns the
    /// decoded image bytes.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-2xx response.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body is not the expected shape.
    /// - [`ProviderError::EmptyResponse`] if no prediction carries image data.
    /// - [`ProviderError::Decode`] if the payload is not valid base64.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let body = serde_json::json!({
            "instances": [{"prompt": prompt}],
            "parameters": {"sampleCount": 1},
        });
        let url = format!(
            "{}/v1beta/models/{model}:predict?key={}",
            self.base_url, self.api_key
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "gemini",
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: PredictResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
                context: format!("predict({model})"),
                source: e,
            })?;
        let payload = parsed
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded)
            .ok_or(ProviderError::EmptyResponse)?;
        Ok(STANDARD.decode(payload)?)
    }
}
