// World constants
pub const CHUNK_WIDTH: i32 = 16;
pub const CHUNK_HEIGHT: i32 = 128;
pub const WORLD_SIZE_IN_CHUNKS: i32 = 100;
pub const WORLD_SIZE_IN_VOXELS: i32 = WORLD_SIZE_IN_CHUNKS * CHUNK_WIDTH;
pub const VIEW_DISTANCE_IN_CHUNKS: i32 = 5;

pub const VOXELS_PER_CHUNK: usize = (CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_WIDTH) as usize;

// Texture atlas layout
pub const TEXTURE_ATLAS_SIZE_IN_BLOCKS: u32 = 4;
pub const NORMALIZED_BLOCK_TEXTURE_SIZE: f32 = 1.0 / TEXTURE_ATLAS_SIZE_IN_BLOCKS as f32;

// Block ids the generator hands out directly
pub const BLOCK_AIR: u8 = 0;
pub const BLOCK_BEDROCK: u8 = 1;
pub const BLOCK_STONE: u8 = 2;
pub const BLOCK_GRASS: u8 = 3;
pub const BLOCK_DIRT: u8 = 6;

// Depth of the dirt layer directly under the grass surface
pub const SURFACE_SOIL_DEPTH: i32 = 4;

// Async loader constants
pub const ASYNC_WORKER_COUNT: usize = 4;

/// Unit offsets to the six face-adjacent neighbors, in face order
/// {back, front, top, bottom, left, right}. Mesh emission, texture lookup
/// and neighbor checks all share this ordering.
pub const FACE_CHECKS: [[i32; 3]; 6] = [
    [0, 0, -1], // back
    [0, 0, 1],  // front
    [0, 1, 0],  // top
    [0, -1, 0], // bottom
    [-1, 0, 0], // left
    [1, 0, 0],  // right
];

/// The eight corners of a unit cube, referenced by VOXEL_TRIS.
pub const VOXEL_VERTS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Four corner indices per face. Each face expands to two triangles with
/// the index pattern (0,1,2),(2,1,3) relative to its quad base, keeping
/// the winding outward on every side.
pub const VOXEL_TRIS: [[usize; 4]; 6] = [
    [0, 3, 1, 2], // back
    [5, 6, 4, 7], // front
    [3, 7, 2, 6], // top
    [1, 5, 0, 4], // bottom
    [4, 7, 0, 3], // left
    [1, 2, 5, 6], // right
];
