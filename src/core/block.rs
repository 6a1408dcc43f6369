use serde::{Deserialize, Serialize};

/// One entry in the block catalog. Face texture indices are stored in face
/// order {back, front, top, bottom, left, right}, matching FACE_CHECKS.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockType {
    pub name: String,
    pub is_solid: bool,
    pub face_textures: [u32; 6],
}

impl BlockType {
    pub fn new(name: &str, is_solid: bool, face_textures: [u32; 6]) -> Self {
        BlockType {
            name: name.to_string(),
            is_solid,
            face_textures,
        }
    }

    /// Uniform texture on all six faces.
    pub fn uniform(name: &str, is_solid: bool, texture: u32) -> Self {
        Self::new(name, is_solid, [texture; 6])
    }

    /// Texture index for a face. A face index outside 0..6 is a programming
    /// fault; it is logged and resolved to texture 0 rather than aborting
    /// mesh construction.
    pub fn texture_id(&self, face_index: usize) -> u32 {
        match self.face_textures.get(face_index) {
            Some(&texture) => texture,
            None => {
                tracing::error!(block = %self.name, face_index, "invalid face index");
                0
            }
        }
    }
}

/// Ordered block registry indexed by block id. Id 0 is always air and
/// non-solid; ids outside the catalog resolve to air.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockCatalog {
    blocks: Vec<BlockType>,
}

impl BlockCatalog {
    pub fn new(blocks: Vec<BlockType>) -> Self {
        BlockCatalog { blocks }
    }

    pub fn get(&self, id: u8) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn is_solid(&self, id: u8) -> bool {
        self.blocks.get(id as usize).is_some_and(|b| b.is_solid)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        BlockCatalog::new(vec![
            BlockType::uniform("Air", false, 0),
            BlockType::uniform("Bedrock", true, 9),
            BlockType::uniform("Stone", true, 0),
            BlockType::new("Grass", true, [2, 2, 7, 1, 2, 2]),
            BlockType::new("Furnace", true, [13, 8, 11, 11, 13, 13]),
            BlockType::uniform("Sand", true, 10),
            BlockType::uniform("Dirt", true, 1),
        ])
    }
}
