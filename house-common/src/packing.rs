//! Vertex data packing utilities
//!
//! Every house mesh component (body, roof, fascia) shares one interleaved
//! vertex layout:
//! - Position: Float32x3 (12 bytes)
//! - Normal: Float32x3 (12 bytes)
//! - Texcoord: Float32x2 (8 bytes)
//! - Tangent: Float32x3 (12 bytes)
//!
//! 44 bytes per vertex, indices are u16. Bytes are written in host order.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

// ============================================================================
// Vertex Layout Constants
// ============================================================================

/// Position components (x, y, z)
pub const POSITION_COMPONENTS: u32 = 3;
/// Normal components (x, y, z)
pub const NORMAL_COMPONENTS: u32 = 3;
/// Texcoord components (u, v)
pub const TEXCOORD_COMPONENTS: u32 = 2;
/// Tangent components (x, y, z)
pub const TANGENT_COMPONENTS: u32 = 3;

/// Byte offset of the position attribute within a vertex
pub const POSITION_OFFSET: u32 = 0;
/// Byte offset of the normal attribute within a vertex
pub const NORMAL_OFFSET: u32 = POSITION_OFFSET + POSITION_COMPONENTS * 4;
/// Byte offset of the texcoord attribute within a vertex
pub const TEXCOORD_OFFSET: u32 = NORMAL_OFFSET + NORMAL_COMPONENTS * 4;
/// Byte offset of the tangent attribute within a vertex
pub const TANGENT_OFFSET: u32 = TEXCOORD_OFFSET + TEXCOORD_COMPONENTS * 4;

/// Vertex stride in bytes
pub const VERTEX_STRIDE: u32 = TANGENT_OFFSET + TANGENT_COMPONENTS * 4;

/// Index size in bytes (u16)
pub const INDEX_SIZE: u32 = 2;

/// Highest vertex number a u16 index can reference.
/// Meshes that would go past this must be split.
pub const MAX_INDEX_VALUE: u32 = u16::MAX as u32;

// ============================================================================
// Packed Vertex
// ============================================================================

/// One interleaved vertex, laid out exactly as the renderer declares it
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
    pub tangent: [f32; 3],
}

impl PackedVertex {
    /// Build a packed vertex from glam vectors
    #[inline]
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2, tangent: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            texcoord: texcoord.to_array(),
            tangent: tangent.to_array(),
        }
    }

    /// Position as a glam vector
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Normal as a glam vector
    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// Texcoord as a glam vector
    #[inline]
    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }
}

/// Pack a vertex into its 44 byte interleaved representation
#[inline]
pub fn pack_vertex(position: Vec3, normal: Vec3, texcoord: Vec2, tangent: Vec3) -> [u8; 44] {
    let vertex = PackedVertex::new(position, normal, texcoord, tangent);
    let mut out = [0u8; 44];
    out.copy_from_slice(bytemuck::bytes_of(&vertex));
    out
}

/// Decode a vertex from the start of `bytes`
///
/// Returns `None` if fewer than [`VERTEX_STRIDE`] bytes are available.
#[inline]
pub fn unpack_vertex(bytes: &[u8]) -> Option<PackedVertex> {
    let raw = bytes.get(..VERTEX_STRIDE as usize)?;
    Some(bytemuck::pod_read_unaligned(raw))
}
