//! Chunk meshing: turns a voxel grid into triangle buffers containing
//! only exposed faces.
//!
//! Neighbor solidity across chunk borders is resolved through an injected
//! `neighbor_lookup` closure rather than a back-reference to the owning
//! world. The streamer supplies a closure that resamples the deterministic
//! generator, so a chunk can be meshed before its neighbors exist.

use crate::constants::*;
use crate::core::block::BlockCatalog;
use crate::core::chunk::Chunk;
use crate::core::vertex::Vertex;
use crate::render::atlas::TextureAtlas;

/// CPU-side mesh buffers for one chunk. Positions are chunk-local; the
/// host places the mesh with `Chunk::world_position` and recomputes
/// normals over the final triangle list.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Builds the exposed-face mesh for a chunk. A face is emitted iff its
/// neighbor voxel is non-solid; in-bounds neighbors read the local grid,
/// out-of-bounds neighbors go through `neighbor_lookup` with world-space
/// coordinates.
pub fn build_chunk_mesh(
    chunk: &Chunk,
    catalog: &BlockCatalog,
    atlas: &TextureAtlas,
    neighbor_lookup: impl Fn(i32, i32, i32) -> u8,
) -> ChunkMesh {
    let mut mesh = ChunkMesh::default();
    let origin_x = chunk.coord.x * CHUNK_WIDTH;
    let origin_z = chunk.coord.z * CHUNK_WIDTH;

    let is_solid_at = |x: i32, y: i32, z: i32| -> bool {
        if Chunk::contains_local(x, y, z) {
            catalog.is_solid(chunk.voxel(x, y, z))
        } else {
            catalog.is_solid(neighbor_lookup(origin_x + x, y, origin_z + z))
        }
    };

    for y in 0..CHUNK_HEIGHT {
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let block_id = chunk.voxel(x, y, z);
                let Some(block) = catalog.get(block_id) else {
                    continue;
                };
                if !block.is_solid {
                    continue;
                }

                for (face, check) in FACE_CHECKS.iter().enumerate() {
                    if is_solid_at(x + check[0], y + check[1], z + check[2]) {
                        continue;
                    }

                    let base = mesh.vertices.len() as u32;
                    let uvs = atlas.uvs(block.texture_id(face));
                    for (corner, uv) in VOXEL_TRIS[face].iter().zip(uvs) {
                        let offset = VOXEL_VERTS[*corner];
                        mesh.vertices.push(Vertex {
                            position: [
                                x as f32 + offset[0],
                                y as f32 + offset[1],
                                z as f32 + offset[2],
                            ],
                            uv,
                        });
                    }
                    mesh.indices
                        .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
                }
            }
        }
    }

    mesh
}
