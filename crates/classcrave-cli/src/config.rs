//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use classcrave_core::scoring::PASS_THRESHOLD_PERCENT;
use classcrave_core::template::TemplateId;

/// Top-level classcrave configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCraveConfig {
    /// Template used when an assignment names an unknown one.
    #[serde(default = "default_template")]
    pub default_template: String,
    /// Minimum percentage for an attempt to pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Output directory for attempt reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_template() -> String {
    TemplateId::DEFAULT.to_string()
}
fn default_pass_threshold() -> f64 {
    PASS_THRESHOLD_PERCENT
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./classcrave-results")
}

impl Default for ClassCraveConfig {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            pass_threshold: default_pass_threshold(),
            output_dir: default_output_dir(),
        }
    }
}

impl ClassCraveConfig {
    /// The configured fallback template.
    pub fn fallback_template(&self) -> Result<TemplateId> {
        self.default_template
            .parse()
            .context("invalid default_template in config")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `classcrave.toml` in the current directory
/// 2. `~/.config/classcrave/config.toml`
///
/// `CLASSCRAVE_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<ClassCraveConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("classcrave.toml");
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
            toml::from_str::<ClassCraveConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClassCraveConfig::default(),
    };

    if let Ok(dir) = std::env::var("CLASSCRAVE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    anyhow::ensure!(
        (0.0..=100.0).contains(&config.pass_threshold),
        "pass_threshold must be between 0 and 100"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("classcrave"))
}
