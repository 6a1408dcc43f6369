use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::render::mesh::ChunkMesh;

/// Integer (x, z) grid coordinate identifying a chunk. Pure value type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Chunk coordinate containing a world-space position.
    pub fn from_world_pos(pos: Vec3) -> Self {
        ChunkCoord {
            x: (pos.x / CHUNK_WIDTH as f32).floor() as i32,
            z: (pos.z / CHUNK_WIDTH as f32).floor() as i32,
        }
    }
}

/// Flat buffer index for a local voxel position.
#[inline]
pub fn voxel_index(x: i32, y: i32, z: i32) -> usize {
    (x + CHUNK_WIDTH * (z + CHUNK_WIDTH * y)) as usize
}

/// One WIDTH x HEIGHT x WIDTH column of voxels, the unit of generation,
/// meshing and streaming. The voxel grid is populated once at creation and
/// immutable afterwards; the mesh is derived from it once.
pub struct Chunk {
    pub coord: ChunkCoord,
    voxels: Vec<u8>,
    pub mesh: ChunkMesh,
    pub is_active: bool,
}

impl Chunk {
    /// Creates the chunk and fills its grid from `voxel_source`, which is
    /// called with world-space coordinates.
    pub fn generate(coord: ChunkCoord, voxel_source: impl Fn(i32, i32, i32) -> u8) -> Self {
        let origin_x = coord.x * CHUNK_WIDTH;
        let origin_z = coord.z * CHUNK_WIDTH;

        let mut voxels = vec![0u8; VOXELS_PER_CHUNK];
        for y in 0..CHUNK_HEIGHT {
            for x in 0..CHUNK_WIDTH {
                for z in 0..CHUNK_WIDTH {
                    voxels[voxel_index(x, y, z)] = voxel_source(origin_x + x, y, origin_z + z);
                }
            }
        }

        Chunk {
            coord,
            voxels,
            mesh: ChunkMesh::default(),
            is_active: true,
        }
    }

    /// World-space placement of this chunk's minimum corner (y is 0).
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(
            (self.coord.x * CHUNK_WIDTH) as f32,
            0.0,
            (self.coord.z * CHUNK_WIDTH) as f32,
        )
    }

    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < CHUNK_WIDTH && y >= 0 && y < CHUNK_HEIGHT && z >= 0 && z < CHUNK_WIDTH
    }

    /// Block id at a local position, air when out of bounds.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> u8 {
        if Self::contains_local(x, y, z) {
            self.voxels[voxel_index(x, y, z)]
        } else {
            BLOCK_AIR
        }
    }

    pub fn voxels(&self) -> &[u8] {
        &self.voxels
    }
}
