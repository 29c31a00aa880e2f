//! echograde configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level echograde configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchogradeConfig {
    /// Output directory for grade reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Student name used when an answer sheet doesn't carry one.
    #[serde(default = "default_student")]
    pub student: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./echograde-results")
}
fn default_format() -> String {
    "text".to_string()
}
fn default_student() -> String {
    crate::model::ANONYMOUS_STUDENT.to_string()
}

impl Default for EchogradeConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            student: default_student(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `echograde.toml` in the current directory
/// 2. `~/.config/echograde/config.toml`
///
/// Environment variable overrides: `ECHOGRADE_OUTPUT_DIR`, `ECHOGRADE_STUDENT`.
pub fn load_config_from(path: Option<&Path>) -> Result<EchogradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("echograde.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EchogradeConfig::default(),
    };

    if let Ok(dir) = std::env::var("ECHOGRADE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(student) = std::env::var("ECHOGRADE_STUDENT") {
        config.student = student;
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<EchogradeConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("echograde"))
}
