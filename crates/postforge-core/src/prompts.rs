use std::path::Path;

use crate::ConfigError;

/// The four prompt-template documents, loaded read-only at run start.
///
/// Each template is the system prompt for one generation role; the
/// role-specific user prompt is assembled at call time.
#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    pub analyze_inspo: String,
    pub ideate_concept: String,
    pub generate_caption: String,
    pub review_post: String,
}

impl PromptStore {
    /// Load all templates from `dir` (`<name>.md` per template).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPrompt`] if a template file does not
    /// exist, or [`ConfigError::Io`] if one cannot be read.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            analyze_inspo: read_prompt(dir, "analyze_inspo")?,
            ideate_concept: read_prompt(dir, "ideate_concept")?,
            generate_caption: read_prompt(dir, "generate_caption")?,
            review_post: read_prompt(dir, "review_post")?,
        })
    }
}

fn read_prompt(dir: &Path, name: &str) -> Result<String, ConfigError> {
    let path = dir.join(format!("{name}.md"));
    if !path.is_file() {
        return Err(ConfigError::MissingPrompt(path));
    }
    std::fs::read_to_string(&path).map_err(|e| ConfigError::Io { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_all_four_templates() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "analyze_inspo",
            "ideate_concept",
            "generate_caption",
            "review_post",
        ] {
            std::fs::write(dir.path().join(format!("{name}.md")), format!("{name} body"))
                .unwrap();
        }
        let store = PromptStore::load(dir.path()).expect("all templates present");
        assert_eq!(store.analyze_inspo, "analyze_inspo body");
        assert_eq!(store.review_post, "review_post body");
    }

    #[test]
    fn load_fails_on_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("analyze_inspo.md"), "x").unwrap();
        let result = PromptStore::load(dir.path());
        assert!(
            matches!(result, Err(ConfigError::MissingPrompt(ref p)) if p.ends_with("ideate_concept.md")),
            "expected MissingPrompt(ideate_concept.md), got: {result:?}"
        );
    }
}
