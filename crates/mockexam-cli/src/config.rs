//! `mockexam.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "mockexam.toml";

/// Top-level mockexam configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MockexamConfig {
    /// Directory holding `<name>.txt` test files.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,
    /// Shuffle question order before a run.
    #[serde(default)]
    pub shuffle: bool,
    /// Print the explanation after each graded answer.
    #[serde(default = "default_true")]
    pub show_explanations: bool,
    /// Banner printed at the start of a run.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}
fn default_true() -> bool {
    true
}
fn default_title() -> String {
    "Spring Certification Mock Exam".to_string()
}

impl Default for MockexamConfig {
    fn default() -> Self {
        Self {
            tests_dir: default_tests_dir(),
            shuffle: false,
            show_explanations: true,
            title: default_title(),
        }
    }
}

/// Load config from an explicit path, or `mockexam.toml` in the current
/// directory, falling back to defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<MockexamConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<MockexamConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(MockexamConfig::default()),
    }
}
