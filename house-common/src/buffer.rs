//! Shared vertex/index buffer and the cursor threaded through generators
//!
//! One `SharedBuffer` lives for a whole house build. Generators run one after
//! another (body, roof, fascia); each receives the cursor returned by the
//! previous one and hands back an advanced cursor. The cursor's vertex count
//! is the index bias, so indices written by later generators still refer to
//! the right vertices of the shared region.

use crate::error::GeometryError;
use crate::packing::{INDEX_SIZE, MAX_INDEX_VALUE, VERTEX_STRIDE};

/// Write position within a [`SharedBuffer`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferCursor {
    /// Byte offset into the vertex region
    pub vertex_offset: usize,
    /// Byte offset into the index region
    pub index_offset: usize,
    /// Vertices written so far (added to every emitted index)
    pub vertex_count: u32,
}

impl BufferCursor {
    /// Cursor at the start of an empty buffer
    pub const START: BufferCursor = BufferCursor {
        vertex_offset: 0,
        index_offset: 0,
        vertex_count: 0,
    };

    /// Cursor advanced past `vertices` vertices and `indices` indices
    ///
    /// Fails with [`GeometryError::BufferOverflow`] if the new vertex count
    /// could not be referenced by a u16 index.
    pub fn advanced(self, vertices: usize, indices: usize) -> Result<Self, GeometryError> {
        let vertex_count = self.vertex_count as u64 + vertices as u64;
        if vertex_count > MAX_INDEX_VALUE as u64 {
            return Err(GeometryError::BufferOverflow { vertex_count });
        }

        Ok(Self {
            vertex_offset: self.vertex_offset + vertices * VERTEX_STRIDE as usize,
            index_offset: self.index_offset + indices * INDEX_SIZE as usize,
            vertex_count: vertex_count as u32,
        })
    }
}

/// Growable byte regions for interleaved vertices and u16 indices
///
/// Writes land at explicit byte offsets; a region grows (zero filled) when a
/// write reaches past its end and existing bytes are overwritten in place,
/// which lets a caller reuse a buffer from an earlier build.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    vertices: Vec<u8>,
    indices: Vec<u8>,
}

impl SharedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw vertex region
    pub fn vertex_bytes(&self) -> &[u8] {
        &self.vertices
    }

    /// Raw index region
    pub fn index_bytes(&self) -> &[u8] {
        &self.indices
    }

    /// Write vertex bytes at `offset`
    pub fn write_vertices(&mut self, offset: usize, data: &[u8]) {
        write_at(&mut self.vertices, offset, data);
    }

    /// Write u16 indices at byte `offset`
    pub fn write_indices(&mut self, offset: usize, indices: &[u16]) {
        write_at(&mut self.indices, offset, bytemuck::cast_slice(indices));
    }

    /// Read back the u16 index at position `index` (not byte offset)
    pub fn index_at(&self, index: usize) -> Option<u16> {
        let start = index * INDEX_SIZE as usize;
        let bytes = self.indices.get(start..start + INDEX_SIZE as usize)?;
        Some(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    /// Drop everything written at or after `cursor`
    ///
    /// Used to discard a half-finished build so no partial mesh survives an error.
    pub fn rewind(&mut self, cursor: BufferCursor) {
        self.vertices.truncate(cursor.vertex_offset);
        self.indices.truncate(cursor.index_offset);
    }
}

fn write_at(region: &mut Vec<u8>, offset: usize, data: &[u8]) {
    let end = offset + data.len();
    if region.len() < end {
        region.resize(end, 0);
    }
    region[offset..end].copy_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advance() {
        let cursor = BufferCursor::START.advanced(14, 18).unwrap();
        assert_eq!(cursor.vertex_offset, 14 * 44);
        assert_eq!(cursor.index_offset, 36);
        assert_eq!(cursor.vertex_count, 14);
    }

    #[test]
    fn test_cursor_overflow() {
        let cursor = BufferCursor {
            vertex_count: 65_000,
            ..BufferCursor::START
        };
        assert!(cursor.advanced(535, 0).is_ok());
        assert!(matches!(
            cursor.advanced(536, 0),
            Err(GeometryError::BufferOverflow {
                vertex_count: 65_536
            })
        ));
    }

    #[test]
    fn test_write_grows_region() {
        let mut buffer = SharedBuffer::new();
        buffer.write_indices(4, &[7, 9]);
        assert_eq!(buffer.index_bytes().len(), 8);
        assert_eq!(buffer.index_at(0), Some(0));
        assert_eq!(buffer.index_at(2), Some(7));
        assert_eq!(buffer.index_at(3), Some(9));
        assert_eq!(buffer.index_at(4), None);
    }

    #[test]
    fn test_write_overwrites_in_place() {
        let mut buffer = SharedBuffer::new();
        buffer.write_vertices(0, &[1, 2, 3, 4]);
        buffer.write_vertices(1, &[9, 9]);
        assert_eq!(buffer.vertex_bytes(), &[1, 9, 9, 4]);
    }

    #[test]
    fn test_rewind() {
        let mut buffer = SharedBuffer::new();
        buffer.write_vertices(0, &[0u8; 88]);
        buffer.write_indices(0, &[0, 1, 2]);
        let cursor = BufferCursor::START.advanced(1, 2).unwrap();
        buffer.rewind(cursor);
        assert_eq!(buffer.vertex_bytes().len(), 44);
        assert_eq!(buffer.index_bytes().len(), 4);
    }
}
