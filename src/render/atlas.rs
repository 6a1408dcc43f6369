//! Texture atlas addressing.
//!
//! The atlas is a single square image divided into an N x N grid of equal
//! cells, indexed row-major by a flat texture id. Atlas layouts are
//! top-left origin while UV space is bottom-left origin, so the v axis is
//! flipped when a cell is resolved.

use crate::constants::*;

#[derive(Clone, Copy, Debug)]
pub struct TextureAtlas {
    pub size_in_blocks: u32,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        TextureAtlas {
            size_in_blocks: TEXTURE_ATLAS_SIZE_IN_BLOCKS,
        }
    }
}

impl TextureAtlas {
    pub fn new(size_in_blocks: u32) -> Self {
        TextureAtlas { size_in_blocks }
    }

    /// Normalized side length of one atlas cell.
    pub fn cell_size(&self) -> f32 {
        1.0 / self.size_in_blocks as f32
    }

    /// The four UV corners of a texture cell, ordered to match the four
    /// vertices a face emits: (u, v), (u, v+s), (u+s, v), (u+s, v+s).
    pub fn uvs(&self, texture_id: u32) -> [[f32; 2]; 4] {
        let size = self.cell_size();
        let row = (texture_id / self.size_in_blocks) as f32;
        let col = (texture_id % self.size_in_blocks) as f32;

        let u = col * size;
        let v = 1.0 - row * size - size;

        [
            [u, v],
            [u, v + size],
            [u + size, v],
            [u + size, v + size],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_zero_is_top_left_cell_flipped() {
        let atlas = TextureAtlas::new(4);
        let uvs = atlas.uvs(0);
        assert_eq!(uvs[0], [0.0, 0.75]);
        assert_eq!(uvs[3], [0.25, 1.0]);
    }

    #[test]
    fn last_texture_is_bottom_right_cell() {
        let atlas = TextureAtlas::new(4);
        let uvs = atlas.uvs(15);
        assert_eq!(uvs[0], [0.75, 0.0]);
        assert_eq!(uvs[3], [1.0, 0.25]);
    }

    #[test]
    fn all_cells_stay_in_unit_square() {
        let atlas = TextureAtlas::new(4);
        for id in 0..16 {
            for [u, v] in atlas.uvs(id) {
                assert!((0.0..=1.0).contains(&u));
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
