use std::path::Path;

use crate::error::ScraperError;
use crate::types::ScrapedPost;

/// Deterministic scraper stub: writes a text placeholder per URL instead
/// of downloading anything. Placeholder files keep the `.txt` extension
/// so downstream vision steps know not to attach them as image bytes.
pub struct MockScraper;

impl MockScraper {
    /// Produce one placeholder post per URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if `output_dir` or a placeholder file
    /// cannot be written.
    pub fn scrape_posts(
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
            let dest = output_dir.join(format!("inspo_{}.txt", i + 1));
            std::fs::write(&dest, format!("[MOCK IMAGE from {url}]")).map_err(|e| {
                ScraperError::Io {
                    path: dest.clone(),
                    source: e,
                }
            })?;
            tracing::info!(url = %url, path = %dest.display(), "mock-scraped inspiration post");

            posts.push(ScrapedPost {
                image_path: dest,
                caption: format!(
                    "Mock caption for post {}: Amazing healthy snack that changed my life! \
                     #health #wellness",
                    i + 1
                ),
                source_url: url.clone(),
                likes: 1500,
                comments: 89,
            });
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_placeholder_per_url() {
        let dir = tempfile::tempdir().unwrap();
        let urls = vec![
            "https://www.instagram.com/p/AAA/".to_string(),
            "https://www.instagram.com/p/BBB/".to_string(),
        ];
        let posts = MockScraper.scrape_posts(&urls, dir.path()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].likes, 1500);
        assert_eq!(posts[1].source_url, urls[1]);

        let placeholder = std::fs::read_to_string(&posts[0].image_path).unwrap();
        assert_eq!(placeholder, "[MOCK IMAGE from https://www.instagram.com/p/AAA/]");
    }

    #[test]
    fn is_deterministic_across_runs() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let urls = vec!["https://www.instagram.com/p/AAA/".to_string()];
        let a = MockScraper.scrape_posts(&urls, dir_a.path()).unwrap();
        let b = MockScraper.scrape_posts(&urls, dir_b.path()).unwrap();
        assert_eq!(a[0].caption, b[0].caption);
        assert_eq!(a[0].likes, b[0].likes);
    }
}
