//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM relay configuration
    pub relay: RelayConfig,

    /// Card catalog configuration
    pub catalog: CatalogConfig,

    /// Draw configuration
    pub draw: DrawConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.draw.reversed_probability) {
            return Err(eyre::eyre!(
                "draw.reversed-probability must be between 0 and 1, got {}",
                self.draw.reversed_probability
            ));
        }
        if self.relay.endpoint.is_empty() {
            return Err(eyre::eyre!("relay.endpoint must not be empty"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .cybertarot.yml
        let local_config = PathBuf::from(".cybertarot.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/cybertarot/cybertarot.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cybertarot").join("cybertarot.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Forwarding endpoint URL
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://qwen-forward-2.linhongjie625.workers.dev".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// Card catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON document
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tarot_database_cn.json"),
        }
    }
}

/// Draw configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Probability that a drawn card lands reversed
    #[serde(rename = "reversed-probability")]
    pub reversed_probability: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            reversed_probability: 0.3,
        }
    }
}
