//! World generation and streaming.

pub mod generator;
pub mod loader;
pub mod noise;
pub mod streamer;

pub use generator::{VoxelGenerator, is_voxel_in_world};
pub use loader::ChunkLoader;
pub use noise::NoiseField;
pub use streamer::{ChunkState, World, generate_chunk, is_chunk_in_world};
