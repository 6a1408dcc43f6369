//! Procedural voxel generation.
//!
//! `VoxelGenerator` derives the block id for any world position from the
//! seed alone: a height-field pass shapes the surface, then lode rules
//! place veins in the underground. Because the result is a pure function
//! of position, neighbor chunks can be "seen through" during meshing by
//! simply resampling.

use crate::constants::*;
use crate::core::biome::BiomeAttributes;
use crate::world::noise::NoiseField;

pub struct VoxelGenerator {
    noise: NoiseField,
    biome: BiomeAttributes,
}

impl VoxelGenerator {
    pub fn new(seed: i32, biome: BiomeAttributes) -> Self {
        biome.warn_on_degenerate_lodes();
        VoxelGenerator {
            noise: NoiseField::new(seed),
            biome,
        }
    }

    pub fn seed(&self) -> i32 {
        self.noise.seed
    }

    pub fn biome(&self) -> &BiomeAttributes {
        &self.biome
    }

    /// Surface height of the terrain column at (x, z).
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .noise
            .sample_2d(x as f32, z as f32, 0.0, self.biome.terrain_scale);
        (self.biome.terrain_height as f32 * sample).floor() as i32 + self.biome.solid_ground_height
    }

    /// Block id at a world position. First matching rule wins:
    /// outside the world is air, y == 0 is bedrock, then the height-field
    /// pass, then the lode pass over the stone interior.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> u8 {
        if !is_voxel_in_world(x, y, z) {
            return BLOCK_AIR;
        }

        if y == 0 {
            return BLOCK_BEDROCK;
        }

        // basic terrain pass
        let terrain_height = self.terrain_height(x, z);

        let mut voxel = if y == terrain_height {
            BLOCK_GRASS
        } else if y < terrain_height && y > terrain_height - SURFACE_SOIL_DEPTH {
            BLOCK_DIRT
        } else if y > terrain_height {
            return BLOCK_AIR;
        } else {
            BLOCK_STONE
        };

        // second pass: lodes carve into the stone interior, in declaration
        // order with later matches overriding earlier ones
        if voxel == BLOCK_STONE {
            for lode in &self.biome.lodes {
                if y > lode.min_height && y < lode.max_height {
                    if self.noise.sample_3d(
                        x as f32,
                        y as f32,
                        z as f32,
                        lode.noise_offset,
                        lode.scale,
                        lode.threshold,
                    ) {
                        voxel = lode.block_id;
                    }
                }
            }
        }

        voxel
    }
}

// Worker threads each rebuild their generator from the seed.
impl Clone for VoxelGenerator {
    fn clone(&self) -> Self {
        VoxelGenerator::new(self.noise.seed, self.biome.clone())
    }
}

/// Whether a voxel position lies inside the world volume.
pub fn is_voxel_in_world(x: i32, y: i32, z: i32) -> bool {
    x >= 0
        && x < WORLD_SIZE_IN_VOXELS
        && y >= 0
        && y < CHUNK_HEIGHT
        && z >= 0
        && z < WORLD_SIZE_IN_VOXELS
}
