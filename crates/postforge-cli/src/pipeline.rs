//! The run orchestrator.
//!
//! Drives one end-to-end generation run: brand context → input
//! collection → inspiration intake → analysis → caption/image/review
//! bundles. Fatal errors (bad configuration, no usable input, no
//! inspiration content) abort the run; per-post generation failures are
//! logged in the [`RunLog`] and degrade only the affected bundle.

use std::path::{Path, PathBuf};

use anyhow::Context;
use postforge_core::text::truncate_text;
use postforge_core::{load_brand_context, AppConfig, PromptStore};
use postforge_providers::{
    build_image_prompt, Analyzer, CaptionGenerator, ImageGenerator, ImageProvider, ImageStyle,
    Reviewer, TextProvider,
};
use postforge_scraper::Scraper;

use crate::bundle::{self, PostMetadata};
use crate::inputs::collect_inputs;
use crate::run_log::RunLog;

const CAPTION_PREVIEW_CHARS: usize = 200;

/// Everything the orchestrator needs from the command line.
#[derive(Debug)]
pub struct RunOptions {
    pub links: Vec<String>,
    pub links_file: Option<PathBuf>,
    pub images: Vec<PathBuf>,
    pub topic: Option<String>,
    pub style: ImageStyle,
    pub variants: u32,
    pub image_provider: ImageProvider,
    pub text_provider: TextProvider,
    pub mock: bool,
    pub skip_scrape: bool,
    pub skip_images: bool,
    pub skip_review: bool,
}

#[derive(Debug)]
pub struct RunSummary {
    pub posts_generated: usize,
}

/// Execute one pipeline run into `run_dir`.
///
/// # Errors
///
/// Fails on configuration errors (unreadable brand context or prompts,
/// missing API key for a selected live text provider, no valid input)
/// and when inspiration mode yields zero posts. Per-bundle image and
/// review failures are recorded in `run_log` instead.
pub async fn run(
    options: &RunOptions,
    config: &AppConfig,
    run_dir: &Path,
    run_log: &mut RunLog,
) -> anyhow::Result<RunSummary> {
    let brand = load_brand_context(&config.brand_context_path)?;
    run_log.log_step(
        "load_brand_context",
        "success",
        serde_json::json!({"brand": brand.brand_name}),
    );
    tracing::info!(brand = %brand.brand_name, "brand context loaded");

    let inputs = collect_inputs(
        &options.links,
        options.links_file.as_deref(),
        &options.images,
        options.topic.as_deref(),
    )?;
    run_log.log_step(
        "collect_inputs",
        "success",
        serde_json::json!({"links": inputs.links.len(), "images": inputs.images.len()}),
    );
    tracing::info!(
        links = inputs.links.len(),
        images = inputs.images.len(),
        topic = inputs.topic.is_some(),
        "inputs collected"
    );

    // Mock roles never read the templates, so a missing prompts directory
    // must not block a mock run.
    let prompts = if options.mock {
        PromptStore::default()
    } else {
        PromptStore::load(&config.prompts_dir)?
    };
    let analyzer = Analyzer::new(options.text_provider, options.mock, config, &prompts)?;

    let mut analyses: Vec<serde_json::Value> = Vec::new();
    if let Some(topic) = inputs.topic.as_deref() {
        tracing::info!(topic, "generating concept from topic");
        let concept = analyzer.generate_concept(topic, &brand).await?;
        analyses.push(concept);
        run_log.log_step("ideate", "success", serde_json::json!({"topic": topic}));
    } else {
        let scraper = Scraper::new(
            options.mock,
            config.http_timeout_secs,
            &config.scraper_user_agent,
        )?;
        let scraped_dir = run_dir.join("scraped");
        let mut posts = Vec::new();
        if !inputs.links.is_empty() && !options.skip_scrape {
            posts.extend(scraper.scrape_posts(&inputs.links, &scraped_dir).await?);
        }
        if !inputs.images.is_empty() {
            posts.extend(scraper.load_local_images(&inputs.images, &scraped_dir)?);
        }

        if posts.is_empty() {
            run_log.log_step(
                "scrape",
                "failed",
                serde_json::json!({"reason": "no content loaded"}),
            );
            anyhow::bail!("no inspiration content could be loaded");
        }
        run_log.log_step(
            "scrape",
            "success",
            serde_json::json!({"posts_scraped": posts.len()}),
        );
        tracing::info!(posts = posts.len(), "inspiration content loaded");

        for (i, post) in posts.iter().enumerate() {
            tracing::info!(post = i + 1, total = posts.len(), "analyzing inspiration post");
            let mut analysis = analyzer.analyze(&post.image_path, &post.caption, &brand).await?;
            if let Some(obj) = analysis.as_object_mut() {
                obj.insert("_source".to_string(), post.source_value());
            }
            analyses.push(analysis);
        }
    }

    let analysis_path = run_dir.join("analysis.json");
    std::fs::write(&analysis_path, serde_json::to_string_pretty(&analyses)?)
        .with_context(|| format!("writing {}", analysis_path.display()))?;
    run_log.log_step(
        "analyze",
        "success",
        serde_json::json!({"analyses_count": analyses.len()}),
    );

    let caption_gen =
        CaptionGenerator::new(options.text_provider, options.mock, config, &prompts)?;
    let image_gen = if options.skip_images {
        None
    } else {
        Some(ImageGenerator::new(
            options.image_provider,
            options.mock,
            config,
        )?)
    };
    let reviewer = if options.skip_review {
        None
    } else {
        Some(Reviewer::new(
            options.text_provider,
            options.mock,
            config,
            &prompts,
        )?)
    };

    let mut post_count = 0usize;
    for analysis in &analyses {
        let variants = caption_gen
            .generate(analysis, &brand, options.variants)
            .await?;

        for variant in variants {
            post_count += 1;
            let post_dir = run_dir.join(format!("post_{post_count}"));
            bundle::write_caption(&post_dir, &variant.caption, &variant.hashtags)?;

            let image_prompt = build_image_prompt(analysis, &brand);

            let mut image_generated = false;
            if let Some(generator) = &image_gen {
                let image_path = post_dir.join("image.png");
                match generator
                    .generate(&image_prompt, &image_path, options.style)
                    .await
                {
                    Ok(()) => image_generated = true,
                    Err(e) => {
                        tracing::error!(post = post_count, error = %e, "image generation failed");
                        run_log.log_error(&format!("image_gen_post_{post_count}"), &e.to_string());
                    }
                }
            }

            let mut review = serde_json::json!({});
            if let Some(reviewer) = &reviewer {
                match reviewer
                    .review(&variant.caption, &image_prompt, analysis, &brand)
                    .await
                {
                    Ok(result) => review = serde_json::to_value(result)?,
                    Err(e) => {
                        tracing::error!(post = post_count, error = %e, "review failed");
                        run_log.log_error(&format!("review_post_{post_count}"), &e.to_string());
                    }
                }
            }

            bundle::write_metadata(
                &post_dir,
                &PostMetadata {
                    post_number: post_count,
                    variant: variant.variant,
                    angle: variant.angle.clone(),
                    style: options.style.to_string(),
                    image_provider: options.image_provider.to_string(),
                    text_provider: options.text_provider.to_string(),
                    image_prompt_used: image_prompt,
                    image_generated,
                    review: review.clone(),
                    inspiration_source: bundle::inspiration_source(analysis),
                },
            )?;

            let score = review
                .get("overall_quality")
                .and_then(|q| q.get("score"))
                .and_then(serde_json::Value::as_u64)
                .map_or_else(|| "N/A".to_string(), |s| s.to_string());
            println!(
                "  post {post_count} ({angle}) — score {score}/10",
                angle = variant.angle
            );
        }
    }

    run_log.log_step(
        "generate",
        "success",
        serde_json::json!({"posts_generated": post_count}),
    );
    run_log.log_step("complete", "success", serde_json::json!({}));

    print_caption_preview(run_dir, post_count);
    Ok(RunSummary {
        posts_generated: post_count,
    })
}

fn print_caption_preview(run_dir: &Path, post_count: usize) {
    if post_count == 0 {
        return;
    }
    println!("\ncaption preview:");
    for k in 1..=post_count {
        let caption_path = run_dir.join(format!("post_{k}")).join("caption.txt");
        if let Ok(contents) = std::fs::read_to_string(&caption_path) {
            println!("\n[post {k}]\n{}", truncate_text(&contents, CAPTION_PREVIEW_CHARS));
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
