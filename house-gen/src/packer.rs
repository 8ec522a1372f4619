//! Face packer: triangulates faces and writes them into a shared buffer
//!
//! Every face gets its own vertices (no sharing across faces), so normals are
//! flat per face. Texcoords are a planar projection onto the face's own
//! tangent frame:
//! - tangent `t = normalize(n × Y)`, or `+X` for horizontal faces
//! - bitangent `b = n × t`
//! - texcoord `(p·t, p·b) * tex_scale`
//!
//! Faces sharing a plane therefore get continuous texcoords.

use glam::{Vec2, Vec3};
use house_common::{
    BufferCursor, GeometryError, ModelSpec, SharedBuffer, VERTEX_STRIDE, pack_vertex,
};
use tracing::debug;

use crate::face::Face;

/// Result of one generator call
#[derive(Clone, Debug, PartialEq)]
pub struct MeshOutput {
    /// Where the component landed and how to read it
    pub spec: ModelSpec,
    /// Cursor for the next generator
    pub cursor: BufferCursor,
}

/// Tangent frame used for a face's normal, tangent and texcoords
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceFrame {
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl FaceFrame {
    /// Frame of a face; zero-area faces fall back to an upward normal
    pub fn of(face: &Face) -> Self {
        let normal = face.normal().unwrap_or(Vec3::Y);
        let tangent = normal.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let bitangent = normal.cross(tangent);
        Self {
            normal,
            tangent,
            bitangent,
        }
    }

    /// Planar texcoord of a point
    #[inline]
    pub fn texcoord(&self, point: Vec3, tex_scale: f32) -> Vec2 {
        Vec2::new(point.dot(self.tangent), point.dot(self.bitangent)) * tex_scale
    }
}

/// Pack `faces` at `cursor` and describe the result as component `name`
///
/// The whole call is checked against the u16 index limit before anything is
/// written, so an overflow leaves the buffer untouched.
pub fn pack_faces(
    name: &str,
    buffer: &mut SharedBuffer,
    cursor: BufferCursor,
    faces: &[Face],
    tex_scale: f32,
) -> Result<MeshOutput, GeometryError> {
    let vertex_total: usize = faces.iter().map(Face::vertex_count).sum();
    let index_total: usize = faces.iter().map(Face::index_count).sum();
    let end = cursor.advanced(vertex_total, index_total)?;

    let mut vertex_data = Vec::with_capacity(vertex_total * VERTEX_STRIDE as usize);
    let mut indices: Vec<u16> = Vec::with_capacity(index_total);
    // Fits: `advanced` already bounded the final count by u16::MAX
    let mut next_vertex = cursor.vertex_count as u16;

    for face in faces {
        let frame = FaceFrame::of(face);
        for &point in face.points() {
            vertex_data.extend_from_slice(&pack_vertex(
                point,
                frame.normal,
                frame.texcoord(point, tex_scale),
                frame.tangent,
            ));
        }
        for triangle in face.triangles() {
            indices.extend(triangle.iter().map(|&local| next_vertex + local));
        }
        next_vertex += face.vertex_count() as u16;
    }

    buffer.write_vertices(cursor.vertex_offset, &vertex_data);
    buffer.write_indices(cursor.index_offset, &indices);

    debug!(
        "{}: {} faces, {} vertices, {} indices (base vertex {})",
        name,
        faces.len(),
        vertex_total,
        index_total,
        cursor.vertex_count
    );

    Ok(MeshOutput {
        spec: ModelSpec::between(name, cursor, end),
        cursor: end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_common::unpack_vertex;

    fn unit_quad(offset: Vec3) -> Face {
        Face::Quad([Vec3::ZERO, Vec3::Z, Vec3::X + Vec3::Z, Vec3::X]).translated(offset)
    }

    #[test]
    fn test_pack_counts() {
        let mut buffer = SharedBuffer::new();
        let faces = [
            unit_quad(Vec3::ZERO),
            Face::Tri([Vec3::ZERO, Vec3::Z, Vec3::X]),
        ];
        let output = pack_faces("test", &mut buffer, BufferCursor::START, &faces, 1.0).unwrap();

        assert_eq!(output.spec.vertex_count, 7);
        assert_eq!(output.spec.index.count, 9);
        assert_eq!(buffer.vertex_bytes().len(), 7 * 44);
        assert_eq!(buffer.index_bytes().len(), 18);
        assert_eq!(output.cursor.vertex_count, 7);
    }

    #[test]
    fn test_fan_triangulation() {
        let mut buffer = SharedBuffer::new();
        pack_faces(
            "test",
            &mut buffer,
            BufferCursor::START,
            &[unit_quad(Vec3::ZERO)],
            1.0,
        )
        .unwrap();
        let indices: Vec<u16> = (0..6).filter_map(|i| buffer.index_at(i)).collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_indices_are_biased_by_cursor() {
        let mut buffer = SharedBuffer::new();
        let first = pack_faces(
            "a",
            &mut buffer,
            BufferCursor::START,
            &[unit_quad(Vec3::ZERO)],
            1.0,
        )
        .unwrap();
        let second =
            pack_faces("b", &mut buffer, first.cursor, &[unit_quad(Vec3::X)], 1.0).unwrap();

        assert_eq!(second.spec.base_vertex, 4);
        assert_eq!(second.spec.index.byte_offset, 12);
        let indices: Vec<u16> = (6..12).filter_map(|i| buffer.index_at(i)).collect();
        assert_eq!(indices, vec![4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_overflow_leaves_buffer_untouched() {
        let mut buffer = SharedBuffer::new();
        let cursor = BufferCursor {
            vertex_count: u16::MAX as u32 - 2,
            ..BufferCursor::START
        };
        let result = pack_faces("big", &mut buffer, cursor, &[unit_quad(Vec3::ZERO)], 1.0);

        assert!(matches!(result, Err(GeometryError::BufferOverflow { .. })));
        assert!(buffer.vertex_bytes().is_empty());
        assert!(buffer.index_bytes().is_empty());
    }

    #[test]
    fn test_flat_normals_and_tangents() {
        let mut buffer = SharedBuffer::new();
        pack_faces(
            "test",
            &mut buffer,
            BufferCursor::START,
            &[unit_quad(Vec3::ZERO)],
            2.0,
        )
        .unwrap();

        for i in 0..4 {
            let vertex = unpack_vertex(&buffer.vertex_bytes()[i * 44..]).unwrap();
            assert!((vertex.normal() - Vec3::Y).length() < 1e-6);
            assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
        }

        // (1, 0, 1) projects onto (x, -z) scaled by 2
        let corner = unpack_vertex(&buffer.vertex_bytes()[2 * 44..]).unwrap();
        assert!((corner.texcoord() - Vec2::new(2.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_sloped_face_frame() {
        let face = Face::Quad([
            Vec3::new(10.0, 5.0, 0.0),
            Vec3::new(15.0, 0.0, -5.0),
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(0.0, 5.0, 0.0),
        ]);
        let frame = FaceFrame::of(&face);
        assert!(frame.tangent.y.abs() < 1e-6);
        assert!(frame.tangent.dot(frame.normal).abs() < 1e-6);
        assert!(frame.bitangent.dot(frame.normal).abs() < 1e-6);
        assert!((frame.bitangent.length() - 1.0).abs() < 1e-5);
    }
}
