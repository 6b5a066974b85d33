//! Per-run audit log written alongside the generated bundles.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use serde::Serialize;

/// Audit record of one pipeline run: every step outcome and every
/// non-fatal error, flushed to `run_log.json` at run end (including
/// failed and interrupted runs).
#[derive(Debug, Serialize)]
pub struct RunLog {
    started_at: String,
    steps: Vec<StepEntry>,
    errors: Vec<ErrorEntry>,
    completed_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct StepEntry {
    step: String,
    status: String,
    timestamp: String,
    details: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ErrorEntry {
    step: String,
    error: String,
    timestamp: String,
}

impl RunLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: now(),
            steps: Vec::new(),
            errors: Vec::new(),
            completed_at: None,
        }
    }

    pub fn log_step(&mut self, step: &str, status: &str, details: serde_json::Value) {
        self.steps.push(StepEntry {
            step: step.to_string(),
            status: status.to_string(),
            timestamp: now(),
            details,
        });
    }

    pub fn log_error(&mut self, step: &str, error: &str) {
        self.errors.push(ErrorEntry {
            step: step.to_string(),
            error: error.to_string(),
            timestamp: now(),
        });
    }

    /// Stamp `completed_at` and write `run_log.json` into `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or the file written.
    pub fn save(&mut self, dir: &Path) -> anyhow::Result<PathBuf> {
        self.completed_at = Some(now());
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating run directory {}", dir.display()))?;
        let path = dir.join("run_log.json");
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, body)
            .with_context(|| format!("writing run log {}", path.display()))?;
        Ok(path)
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_steps_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = RunLog::new();
        log.log_step(
            "scrape",
            "success",
            serde_json::json!({"posts_scraped": 2}),
        );
        log.log_error("image_gen_post_1", "predict call failed");

        let path = log.save(dir.path()).unwrap();
        assert!(path.ends_with("run_log.json"));

        let body: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(body["steps"][0]["step"], "scrape");
        assert_eq!(body["steps"][0]["details"]["posts_scraped"], 2);
        assert_eq!(body["errors"][0]["step"], "image_gen_post_1");
        assert!(body["completed_at"].is_string());
        assert!(body["started_at"].is_string());
    }
}
