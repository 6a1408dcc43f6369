// Core module with fundamental types
pub mod core;

// Render module with CPU-side mesh construction
pub mod render;

// World module with generation and streaming
pub mod world;

// Other modules
pub mod config;
pub mod constants;

// Re-exports
pub use crate::config::{ConfigError, WorldConfig};
pub use crate::constants::*;
pub use crate::core::{BiomeAttributes, BlockCatalog, BlockType, Chunk, ChunkCoord, Lode, Vertex};
pub use crate::render::{ChunkMesh, TextureAtlas, build_chunk_mesh};
pub use crate::world::{
    ChunkLoader, ChunkState, NoiseField, VoxelGenerator, World, generate_chunk, is_chunk_in_world,
    is_voxel_in_world,
};
