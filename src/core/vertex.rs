use bytemuck::{Pod, Zeroable};

/// Mesh vertex handed to the external renderer. Normals are recomputed by
/// the renderer from the final triangle list, so only position and uv are
/// carried here.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}
