use serde::{Deserialize, Serialize};

use crate::constants::*;

/// A vein placement rule. A voxel strictly inside the (min_height,
/// max_height) band whose 3D noise sample clears `threshold` is replaced
/// with `block_id`. Rules are applied in declaration order, later matches
/// overriding earlier ones.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lode {
    pub name: String,
    pub block_id: u8,
    pub min_height: i32,
    pub max_height: i32,
    pub scale: f32,
    pub threshold: f32,
    pub noise_offset: f32,
}

/// Terrain shaping parameters plus the ordered lode list for one biome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BiomeAttributes {
    pub name: String,
    /// Height below which the world is guaranteed solid.
    pub solid_ground_height: i32,
    /// Amplitude of the terrain height field above solid ground.
    pub terrain_height: i32,
    pub terrain_scale: f32,
    pub lodes: Vec<Lode>,
}

impl BiomeAttributes {
    /// Logs a warning for each lode whose height band can never match.
    /// An inverted band is not an error: generation simply yields no
    /// matches for it.
    pub fn warn_on_degenerate_lodes(&self) {
        for lode in &self.lodes {
            if lode.min_height >= lode.max_height {
                tracing::warn!(
                    lode = %lode.name,
                    min = lode.min_height,
                    max = lode.max_height,
                    "lode height band is empty, it will never place blocks"
                );
            }
            if lode.min_height < 0 || lode.max_height > CHUNK_HEIGHT {
                tracing::warn!(
                    lode = %lode.name,
                    "lode height band extends outside world vertical bounds"
                );
            }
        }
    }
}

impl Default for BiomeAttributes {
    fn default() -> Self {
        BiomeAttributes {
            name: "Default".to_string(),
            solid_ground_height: 42,
            terrain_height: 42,
            terrain_scale: 0.25,
            lodes: vec![
                Lode {
                    name: "Dirt".to_string(),
                    block_id: BLOCK_DIRT,
                    min_height: 1,
                    max_height: 255,
                    scale: 0.1,
                    threshold: 0.5,
                    noise_offset: 0.0,
                },
                Lode {
                    name: "Sand".to_string(),
                    block_id: 5,
                    min_height: 30,
                    max_height: 60,
                    scale: 0.2,
                    threshold: 0.6,
                    noise_offset: 500.0,
                },
                Lode {
                    name: "Caves".to_string(),
                    block_id: BLOCK_AIR,
                    min_height: 5,
                    max_height: 60,
                    scale: 0.1,
                    threshold: 0.55,
                    noise_offset: 43534.0,
                },
            ],
        }
    }
}
