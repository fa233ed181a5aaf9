//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use casemark_core::error::DEFAULT_MAX_ANSWER_CHARS;

/// Top-level casemark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasemarkConfig {
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Maximum accepted answer length in characters.
    #[serde(default = "default_max_answer_chars")]
    pub max_answer_chars: usize,
    /// Default output format when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./casemark-results")
}
fn default_max_answer_chars() -> usize {
    DEFAULT_MAX_ANSWER_CHARS
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for CasemarkConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_answer_chars: default_max_answer_chars(),
            default_format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations:
/// `casemark.toml` in the current directory, then
/// `~/.config/casemark/config.toml`.
pub fn load_config_from(path: Option<&Path>) -> Result<CasemarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("casemark.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CasemarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CasemarkConfig::default(),
    };

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("casemark"))
}
