//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bloomly_core::session::SMOOTHING_ALPHA;

/// Top-level bloomly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloomlyConfig {
    /// Directory holding the saved profile and in-progress answers.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Weight on fresh data when blending a new pass into the profile.
    #[serde(default = "default_alpha")]
    pub smoothing_alpha: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./bloomly-data")
}

fn default_alpha() -> f64 {
    SMOOTHING_ALPHA
}

impl Default for BloomlyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            smoothing_alpha: default_alpha(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `bloomly.toml` in the current directory
/// 2. `~/.config/bloomly/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<BloomlyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bloomly.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<BloomlyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BloomlyConfig::default(),
    };

    anyhow::ensure!(
        (0.0..=1.0).contains(&config.smoothing_alpha),
        "smoothing_alpha must be between 0.0 and 1.0"
    );

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bloomly"))
}
