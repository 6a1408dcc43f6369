//! Core data structures for the terrain system.
//! Contains fundamental types like blocks, biomes, chunks, and vertices.

pub mod biome;
pub mod block;
pub mod chunk;
pub mod vertex;

// Re-export commonly used types
pub use biome::{BiomeAttributes, Lode};
pub use block::{BlockCatalog, BlockType};
pub use chunk::{Chunk, ChunkCoord};
pub use vertex::Vertex;
