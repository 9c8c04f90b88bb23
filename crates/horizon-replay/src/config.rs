//! Replay configuration loading

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Frames delivered per second
    #[serde(default = "default_rate")]
    pub rate_hz: f64,
    /// Frames grouped into one delivery batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Where panel state is persisted between runs
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate(),
            batch_size: default_batch_size(),
            state_path: default_state_path(),
        }
    }
}

fn default_rate() -> f64 {
    30.0
}

fn default_batch_size() -> usize {
    10
}

fn default_state_path() -> String {
    "./horizon-state.json".to_string()
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}
