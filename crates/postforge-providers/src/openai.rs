//! HTTP client for the OpenAI Images API. The generation response
//! carries a short-lived URL; the client downloads it immediately and
//! returns raw image bytes so callers never see the intermediate URL.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::anthropic::api_error_message;
use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI Images (DALL-E) API.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

impl OpenAiClient {
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

    /// Generates one 1024x1024 standard-quality image and returns its
    /// downloaded bytes.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-2xx generation response.
    /// - [`ProviderError::Http`] on network failure (generation or download).
    /// - [`ProviderError::Deserialize`] if the body is not the expected shape.
    /// - [`ProviderError::EmptyResponse`] if no image URL is returned.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
        });

        let url = format!("{}/v1/images/generations", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "openai",
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: ImagesResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
                context: url,
                source: e,
            })?;
        let image_url = parsed
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or(ProviderError::EmptyResponse)?;

        let download = self.client.get(&image_url).send().await?;
        let download_status = download.status();
        if !download_status.is_success() {
            return Err(ProviderError::Api {
                provider: "openai",
                status: download_status.as_u16(),
                message: format!("image download failed: {image_url}"),
            });
        }
        Ok(download.bytes().await?.to_vec())
    }
}
