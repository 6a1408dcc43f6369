//! World configuration loaded once at startup.
//!
//! The block catalog and biome attributes are data, not code: a host can
//! ship them in a JSON file and tweak terrain without recompiling. Every
//! field falls back to the built-in defaults mirroring the reference
//! world.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::core::biome::BiomeAttributes;
use crate::core::block::BlockCatalog;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: i32,
    pub view_distance: i32,
    pub atlas_size_in_blocks: u32,
    pub catalog: BlockCatalog,
    pub biome: BiomeAttributes,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            view_distance: VIEW_DISTANCE_IN_CHUNKS,
            atlas_size_in_blocks: TEXTURE_ATLAS_SIZE_IN_BLOCKS,
            catalog: BlockCatalog::default(),
            biome: BiomeAttributes::default(),
        }
    }
}

impl WorldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks only. Degenerate lode bands are downgraded to
    /// warnings because generation treats them as zero-match rules, not
    /// errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view_distance < 1 {
            return Err(ConfigError::Invalid(format!(
                "view_distance must be at least 1, got {}",
                self.view_distance
            )));
        }
        if self.atlas_size_in_blocks == 0 {
            return Err(ConfigError::Invalid(
                "atlas_size_in_blocks must be nonzero".to_string(),
            ));
        }
        if self.catalog.is_empty() || self.catalog.is_solid(0) {
            return Err(ConfigError::Invalid(
                "block id 0 must exist and be non-solid air".to_string(),
            ));
        }
        self.biome.warn_on_degenerate_lodes();
        Ok(())
    }
}
