//! CPU-side mesh construction. The external renderer owns GPU resources;
//! this module only produces vertex and index buffers.

pub mod atlas;
pub mod mesh;

pub use atlas::TextureAtlas;
pub use mesh::{ChunkMesh, build_chunk_mesh};
