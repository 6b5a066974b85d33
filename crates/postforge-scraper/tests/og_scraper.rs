//! Integration tests for `OgScraper` using wiremock HTTP mocks.

use postforge_scraper::OgScraper;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_scraper() -> OgScraper {
    OgScraper::new(30, "postforge-test/0.1").expect("client construction should not fail")
}

fn post_page(image_url: &str, description: &str) -> String {
    format!(
        r#"<html><head>
        <meta property="og:image" content="{image_url}"/>
        <meta property="og:description" content="{description}"/>
        </head><body></body></html>"#
    )
}

#[tokio::test]
async fn scrapes_image_and_caption_from_og_tags() {
    let server = MockServer::start().await;
    let image_url = format!("{}/media/photo.jpg", server.uri());

    Mock::given(method("GET"))
        .and(path("/p/ABC123/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(post_page(&image_url, "Great snack idea")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let urls = vec![format!("{}/p/ABC123/", server.uri())];
    let posts = test_scraper()
        .scrape_posts(&urls, out.path())
        .await
        .expect("output dir is writable");

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].caption, "Great snack idea");
    assert_eq!(posts[0].source_url, urls[0]);
    assert!(posts[0].image_path.ends_with("inspo_1.jpg"));
    assert_eq!(std::fs::read(&posts[0].image_path).unwrap(), b"jpeg-bytes");
}

#[tokio::test]
async fn url_without_og_image_is_skipped_not_fatal() {
    let server = MockServer::start().await;
    let image_url = format!("{}/media/good.jpg", server.uri());

    Mock::given(method("GET"))
        .and(path("/p/NOIMAGE/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><head></head></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p/GOOD/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(post_page(&image_url, "ok")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/good.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let urls = vec![
        format!("{}/p/NOIMAGE/", server.uri()),
        format!("{}/p/GOOD/", server.uri()),
    ];
    let posts = test_scraper().scrape_posts(&urls, out.path()).await.unwrap();

    // Partial success: the bad URL is dropped, the good one survives with
    // its positional index intact.
    assert_eq!(posts.len(), 1);
    assert!(posts[0].image_path.ends_with("inspo_2.jpg"));
}

#[tokio::test]
async fn http_error_on_post_page_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p/GONE/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let urls = vec![format!("{}/p/GONE/", server.uri())];
    let posts = test_scraper().scrape_posts(&urls, out.path()).await.unwrap();
    assert!(posts.is_empty());
}
