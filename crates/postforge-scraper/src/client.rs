use std::path::Path;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::og::extract_og_content;
use crate::types::ScrapedPost;

/// Live inspiration scraper: plain HTTP fetch of the post page followed
/// by `og:image` / `og:description` extraction and an image download.
///
/// Per-URL failures (network error, non-2xx, missing metadata) skip that
/// URL only. Partial success is acceptable, and the overall call never
/// fails because a single URL did.
pub struct OgScraper {
    client: Client,
}

impl OgScraper {
    /// Creates an `OgScraper` with the configured timeout and user-agent.
    ///
    /// The user-agent should be a browser profile; Instagram serves og
    /// meta tags to browsers, not to obvious bots.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Scrape each URL into an `inspo_{i}.jpg` + caption pair.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if `output_dir` cannot be created.
    /// Individual URL failures are logged at warn level and skipped.
    pub async fn scrape_posts(
        &self,
        urls: &[String],
        output_dir: &Path,
    ) -> Result<Vec<ScrapedPost>, ScraperError> {
        std::fs::create_dir_all(output_dir).map_err(|e| ScraperError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let mut posts = Vec::new();
        for (i, url) in urls.iter().enumerate() {
            tracing::info!(url = %url, index = i + 1, total = urls.len(), "scraping inspiration post");
            match self.scrape_one(url, output_dir, i + 1).await {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "skipping inspiration post — scrape failed");
                }
            }
        }
        Ok(posts)
    }

    async fn scrape_one(
        &self,
        url: &str,
        output_dir: &Path,
        index: usize,
    ) -> Result<ScrapedPost, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let html = response.text().await?;

        let image_url =
            extract_og_content(&html, "og:image").ok_or_else(|| ScraperError::MissingOgImage {
                url: url.to_string(),
            })?;
        let caption = extract_og_content(&html, "og:description").unwrap_or_default();

        let image_response = self.client.get(&image_url).send().await?;
        let image_status = image_response.status();
        if !image_status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: image_status.as_u16(),
                url: image_url,
            });
        }
        let bytes = image_response.bytes().await?;

        let dest = output_dir.join(format!("inspo_{index}.jpg"));
        std::fs::write(&dest, &bytes).map_err(|e| ScraperError::Io {
            path: dest.clone(),
            source: e,
        })?;

        Ok(ScrapedPost {
            image_path: dest,
            caption,
            source_url: url.to_string(),
            likes: 0,
            comments: 0,
        })
    }
}
