use std::path::Path;

use postforge_core::AppConfig;
use postforge_providers::{ImageProvider, ImageStyle, TextProvider};

use super::{run, RunOptions};
use crate::run_log::RunLog;

fn test_config(base: &Path) -> AppConfig {
    let brand_path = base.join("brand_context.json");
    std::fs::write(
        &brand_path,
        serde_json::json!({
            "brand_name": "Benefills",
            "products": ["Seeds Boost Bar", "Nut-ella Nut Butter"],
            "key_ingredients": ["Selenium", "Zinc"],
            "topics": ["thyroid health"],
            "colors": {"primary": "#7c6fb0"}
        })
        .to_string(),
    )
    .unwrap();

    AppConfig {
        run_root: base.join("output"),
        brand_context_path: brand_path,
        prompts_dir: base.join("prompts"),
        log_level: "info".to_string(),
        http_timeout_secs: 5,
        scraper_user_agent: "test-agent".to_string(),
        anthropic_api_key: None,
        google_api_key: None,
        openai_api_key: None,
        confirm_image_spend: true,
        anthropic_model: "claude-sonnet-4-5-20250929".to_string(),
        gemini_model: "gemini-2.0-flash".to_string(),
        imagen_model: "imagen-3.0-generate-001".to_string(),
        dalle_model: "dall-e-3".to_string(),
    }
}

fn mock_options() -> RunOptions {
    RunOptions {
        links: Vec::new(),
        links_file: None,
        images: Vec::new(),
        topic: None,
        style: ImageStyle::Lifestyle,
        variants: 2,
        image_provider: ImageProvider::Google,
        text_provider: TextProvider::Claude,
        mock: true,
        skip_scrape: false,
        skip_images: false,
        skip_review: false,
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn topic_mode_produces_one_bundle_per_variant() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let run_dir = dir.path().join("output").join("run_test");
    std::fs::create_dir_all(&run_dir).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        topic: Some("thyroid health".to_string()),
        ..mock_options()
    };
    let summary = run(&options, &config, &run_dir, &mut run_log).await.unwrap();
    assert_eq!(summary.posts_generated, 2);

    let analyses = read_json(&run_dir.join("analysis.json"));
    let analyses = analyses.as_array().unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(
        analyses[0]["_source"],
        serde_json::json!({"type": "scratch", "topic": "thyroid health"})
    );

    for k in 1..=2 {
        let post_dir = run_dir.join(format!("post_{k}"));
        let caption = std::fs::read_to_string(post_dir.join("caption.txt")).unwrap();
        assert!(caption.contains("\n\n---\n#Benefills"));

        let image = std::fs::read_to_string(post_dir.join("image.png")).unwrap();
        assert!(image.starts_with("[MOCK IMAGE]\nStyle: lifestyle\n"));

        let metadata = read_json(&post_dir.join("metadata.json"));
        assert_eq!(metadata["post_number"], k);
        assert_eq!(metadata["image_generated"], true);
        assert_eq!(metadata["review"]["overall_quality"]["score"], 8);
        assert_eq!(
            metadata["inspiration_source"],
            serde_json::json!({"type": "scratch", "topic": "thyroid health"})
        );
    }
    assert_eq!(read_json(&run_dir.join("post_1/metadata.json"))["variant"], 1);
    assert_eq!(read_json(&run_dir.join("post_2/metadata.json"))["variant"], 2);
}

#[tokio::test]
async fn scraped_links_trace_back_to_their_source_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let run_dir = dir.path().join("output").join("run_test");
    std::fs::create_dir_all(&run_dir).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        links: vec![
            "https://www.instagram.com/p/AAA/".to_string(),
            "https://www.instagram.com/p/BBB/".to_string(),
        ],
        variants: 1,
        ..mock_options()
    };
    let summary = run(&options, &config, &run_dir, &mut run_log).await.unwrap();
    assert_eq!(summary.posts_generated, 2);

    // Mock scraping leaves positional text placeholders.
    assert!(run_dir.join("scraped/inspo_1.txt").is_file());
    assert!(run_dir.join("scraped/inspo_2.txt").is_file());

    let first = read_json(&run_dir.join("post_1/metadata.json"));
    assert_eq!(
        first["inspiration_source"],
        serde_json::json!("https://www.instagram.com/p/AAA/")
    );
    let second = read_json(&run_dir.join("post_2/metadata.json"));
    assert_eq!(
        second["inspiration_source"],
        serde_json::json!("https://www.instagram.com/p/BBB/")
    );
}

#[tokio::test]
async fn image_write_failure_degrades_only_that_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let run_dir = dir.path().join("output").join("run_test");
    // A directory squatting on the image path makes the write fail.
    std::fs::create_dir_all(run_dir.join("post_1/image.png")).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        topic: Some("gut health".to_string()),
        variants: 2,
        ..mock_options()
    };
    let summary = run(&options, &config, &run_dir, &mut run_log).await.unwrap();
    assert_eq!(summary.posts_generated, 2);

    let first = read_json(&run_dir.join("post_1/metadata.json"));
    assert_eq!(first["image_generated"], false);
    let second = read_json(&run_dir.join("post_2/metadata.json"));
    assert_eq!(second["image_generated"], true);

    run_log.save(&run_dir).unwrap();
    let log = read_json(&run_dir.join("run_log.json"));
    let errors = log["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["step"], "image_gen_post_1");
}

#[tokio::test]
async fn skip_flags_leave_image_absent_and_review_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let run_dir = dir.path().join("output").join("run_test");
    std::fs::create_dir_all(&run_dir).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        topic: Some("sleep".to_string()),
        variants: 1,
        skip_images: true,
        skip_review: true,
        ..mock_options()
    };
    run(&options, &config, &run_dir, &mut run_log).await.unwrap();

    let post_dir = run_dir.join("post_1");
    assert!(!post_dir.join("image.png").exists());
    let metadata = read_json(&post_dir.join("metadata.json"));
    assert_eq!(metadata["image_generated"], false);
    assert_eq!(metadata["review"], serde_json::json!({}));
}

#[tokio::test]
async fn identical_mock_runs_produce_identical_bundle_sets() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    async fn run_once(config: &AppConfig, run_dir: &Path) -> super::RunSummary {
        std::fs::create_dir_all(run_dir).unwrap();
        let options = RunOptions {
            topic: Some("thyroid health".to_string()),
            ..mock_options()
        };
        let mut run_log = RunLog::new();
        run(&options, config, run_dir, &mut run_log).await.unwrap()
    }

    let first_dir = dir.path().join("output").join("run_a");
    let second_dir = dir.path().join("output").join("run_b");
    let first = run_once(&config, &first_dir).await;
    let second = run_once(&config, &second_dir).await;
    assert_eq!(first.posts_generated, second.posts_generated);

    assert_eq!(
        read_json(&first_dir.join("analysis.json")),
        read_json(&second_dir.join("analysis.json"))
    );
    for k in 1..=first.posts_generated {
        let a = first_dir.join(format!("post_{k}"));
        let b = second_dir.join(format!("post_{k}"));
        assert_eq!(
            std::fs::read_to_string(a.join("caption.txt")).unwrap(),
            std::fs::read_to_string(b.join("caption.txt")).unwrap()
        );
        assert_eq!(
            std::fs::read_to_string(a.join("image.png")).unwrap(),
            std::fs::read_to_string(b.join("image.png")).unwrap()
        );
        assert_eq!(read_json(&a.join("metadata.json")), read_json(&b.join("metadata.json")));
    }
}

#[tokio::test]
async fn run_without_valid_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let run_dir = dir.path().join("output").join("run_test");
    std::fs::create_dir_all(&run_dir).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        links: vec!["https://example.com/not-instagram".to_string()],
        ..mock_options()
    };
    let result = run(&options, &config, &run_dir, &mut run_log).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn live_text_provider_without_key_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(dir.path().join("prompts")).unwrap();
    for name in ["analyze_inspo", "ideate_concept", "generate_caption", "review_post"] {
        std::fs::write(
            dir.path().join("prompts").join(format!("{name}.md")),
            "system prompt body",
        )
        .unwrap();
    }
    let run_dir = dir.path().join("output").join("run_test");
    std::fs::create_dir_all(&run_dir).unwrap();
    let mut run_log = RunLog::new();

    let options = RunOptions {
        topic: Some("iron".to_string()),
        mock: false,
        ..mock_options()
    };
    let err = run(&options, &config, &run_dir, &mut run_log)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
}
