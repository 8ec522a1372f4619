//! Wall body generation
//!
//! Every segment gets a rectangular wall box around its ridge line, `extrude`
//! to either side. Along the ridge the box follows the same overhang rules as
//! the roof eaves so walls and roof line up at gable ends and joins.

use glam::Vec3;
use house_common::{BufferCursor, GeometryError, SharedBuffer};
use tracing::debug;

use crate::face::{Face, hanging_strip};
use crate::packer::{MeshOutput, pack_faces};
use crate::segment::{DirNorm, Segment, resolve_dir_norm};

/// Ground corners of one wall box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallBox {
    pub start_minus: Vec3,
    pub start_plus: Vec3,
    pub end_minus: Vec3,
    pub end_plus: Vec3,
}

impl WallBox {
    /// Wall box of `segment`, `extrude` to either side of the ridge
    pub fn of(segment: &Segment, frame: &DirNorm, extrude: f32) -> Self {
        let (s0, s1) = segment.end_shifts(extrude);
        let start = frame.start_ref + frame.dir * s0;
        let end = frame.end_ref + frame.dir * s1;
        let side = frame.norm * extrude;
        Self {
            start_minus: start - side,
            start_plus: start + side,
            end_minus: end - side,
            end_plus: end + side,
        }
    }
}

/// Outward facing wall quads of one segment: minus, plus, end, start
pub fn wall_faces(
    segment: &Segment,
    extrude: f32,
    height: f32,
) -> Result<Vec<Face>, GeometryError> {
    let frame = resolve_dir_norm(segment)?;
    let corners = WallBox::of(segment, &frame, extrude);
    let top = Vec3::Y * height;
    let wall = |p: Vec3, q: Vec3| hanging_strip(p + top, q + top, height);

    let mut faces = vec![
        wall(corners.end_minus, corners.start_minus),
        wall(corners.start_plus, corners.end_plus),
    ];
    if !segment.flat {
        faces.push(wall(corners.end_plus, corners.end_minus));
        if !segment.start_join {
            faces.push(wall(corners.start_minus, corners.start_plus));
        }
    }
    Ok(faces)
}

/// Wall body generator
pub struct BodyGenerator;

impl BodyGenerator {
    /// Generate walls of `height` for every segment into `buffer` at `cursor`
    pub fn generate_body(
        segments: &[Segment],
        height: f32,
        extrude: f32,
        tex_scale: f32,
        buffer: &mut SharedBuffer,
        cursor: BufferCursor,
    ) -> Result<MeshOutput, GeometryError> {
        let mut faces = Vec::with_capacity(segments.len() * 4);
        for segment in segments {
            faces.extend(wall_faces(segment, extrude, height)?);
        }

        debug!("generate_body: {} segments -> {} walls", segments.len(), faces.len());

        pack_faces("body", buffer, cursor, &faces, tex_scale)
    }
}
