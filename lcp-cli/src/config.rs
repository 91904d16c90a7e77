//! Configuration handling for the lcptools CLI
//!
//! Supports loading configuration from lcptools.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use lcp_core::{Level, SegmentConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub segment: SegmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Worker threads for segmented parsing (0 lets rayon decide)
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Target level for every record
    #[serde(default = "default_level")]
    pub level: Level,

    /// Pack three-symbol DCT runs instead of hashing them
    #[serde(default)]
    pub compressed_labels: bool,

    /// Parse the reverse-complement strand
    #[serde(default)]
    pub reverse_complement: bool,

    /// Encoding table with `<char> <code> <rc_code>` lines; DNA when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet_file: Option<PathBuf>,
}

fn default_level() -> Level { 1 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            compressed_labels: false,
            reverse_complement: false,
            alphabet_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            parse: ParseConfig::default(),
            segment: SegmentConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("lcptools.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: lcptools.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = Self::to_toml(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;
        Ok(())
    }

    /// Default configuration rendered as TOML
    pub fn example_toml() -> Result<String> {
        Self::to_toml(&Self::default())
    }

    fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
