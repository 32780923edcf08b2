//! Engine configuration, persisted as TOML.
//!
//! Every field has a serde default, so a config file only needs the keys it
//! changes. An empty file is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gauge::{BASELINE_PER_INCH, MAX_PER_INCH};
use crate::render::DEFAULT_CELL_SIZE;
use crate::search::DEFAULT_LIMIT;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration for the pattern engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pixels per chart cell in rendered output.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Maximum number of search results.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    /// Standard stitches/rows per inch that charts are drawn at.
    #[serde(default = "default_baseline_gauge")]
    pub baseline_gauge: f64,
    /// Largest stitches/rows per inch accepted from users.
    #[serde(default = "default_max_gauge")]
    pub max_gauge: f64,
    /// Seed the image collection with one sample per digit.
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}
fn default_search_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_baseline_gauge() -> f64 {
    BASELINE_PER_INCH
}
fn default_max_gauge() -> f64 {
    MAX_PER_INCH
}
fn default_seed_samples() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            search_limit: default_search_limit(),
            baseline_gauge: default_baseline_gauge(),
            max_gauge: default_max_gauge(),
            seed_samples: default_seed_samples(),
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.into(),
            })
        };
        if self.cell_size == 0 {
            return invalid("cell_size must be > 0");
        }
        if self.search_limit == 0 {
            return invalid("search_limit must be > 0");
        }
        if !self.baseline_gauge.is_finite() || self.baseline_gauge <= 0.0 {
            return invalid("baseline_gauge must be > 0");
        }
        if !self.max_gauge.is_finite() || self.max_gauge <= 0.0 {
            return invalid("max_gauge must be > 0");
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
