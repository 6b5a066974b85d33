//! Inspiration intake for the postforge pipeline.
//!
//! Fetches image + caption pairs from public Instagram post URLs via
//! their `og:` meta tags, or copies local inspiration images into the
//! run's working directory. Both paths produce uniform [`ScrapedPost`]
//! records named positionally (`inspo_{i}.*`) so the post index stays
//! correlated with the output bundle index.

pub mod client;
pub mod error;
pub mod local;
pub mod mock;
pub mod og;
pub mod types;
pub mod validate;

use std::path::{Path, PathBuf};

pub use client::OgScraper;
pub use error::ScraperError;
pub use mock::MockScraper;
pub use types::ScrapedPost;
pub use validate::{is_instagram_post_url, is_supported_image};

/// Inspiration scraper, one variant per backend. The mock backend is
/// deterministic and touches neither the network nor any API key.
pub enum Scraper {
    Live(OgScraper),
    Mock(MockScraper),
}

impl Scraper {
    /// Build the scraper selected by the mock flag.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the live HTTP client cannot be
    /// constructed.
    pub fn new(mock: bool, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        if mock {
            Ok(Self::Mock(MockScraper))
        } else {
            Ok(Self::Live(OgScraper::new(timeout_secs, user_agent)?))
        }
    }

    /// Retrieve an image and caption for each URL, writing artifacts into
    /// `output_dir`. Per-URL failures are logged and skipped; the call as a
    /// whole only fails if the output directory cannot be created.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if `output_dir` cannot be created.
    pub async fn scrape_posts(
        &self,
        urls: &[String],
        output_dir: &Path,
    ) -> Result<Vec<ScrapedPost>, ScraperError> {
        match self {
            Self::Live(scraper) => scraper.scrape_posts(urls, output_dir).await,
            Self::Mock(scraper) => scraper.scrape_posts(urls, output_dir),
        }
    }

    /// Copy local inspiration images into `output_dir` under normalized
    /// `inspo_{i}` names. Missing files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if `output_dir` cannot be created.
    pub fn load_local_images(
        &self,
        paths: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<ScrapedPost>, ScraperError> {
        local::load_local_images(paths, output_dir)
    }
}
