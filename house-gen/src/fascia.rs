//! Fascia trim along the roof eaves

use glam::Vec3;
use house_common::{BufferCursor, GeometryError, SharedBuffer};
use tracing::debug;

use crate::face::{Face, hanging_strip};
use crate::packer::{MeshOutput, pack_faces};
use crate::roof::generate_roof_positions;
use crate::segment::Segment;

/// Height of the trim strip below the eaves
pub const FASCIA_DEPTH: f32 = 0.15;

/// Fascia generator
pub struct FasciaGenerator;

impl FasciaGenerator {
    /// Generate a trim strip under every eave edge of the roof over `segments`
    ///
    /// `extrude` must match the roof's so the strips sit on its eaves; the eaves
    /// are at `y_offset`.
    pub fn generate_fascia(
        segments: &[Segment],
        extrude: f32,
        y_offset: f32,
        tex_scale: f32,
        buffer: &mut SharedBuffer,
        cursor: BufferCursor,
    ) -> Result<MeshOutput, GeometryError> {
        let lift = Vec3::Y * y_offset;
        let mut faces: Vec<Face> = Vec::with_capacity(segments.len() * 4);

        for segment in segments {
            // Ridge height does not move the eaves
            let roof = generate_roof_positions(segment, 0.0, extrude)?;
            faces.extend(
                roof.eave_edges()
                    .into_iter()
                    .map(|(p, q)| hanging_strip(p + lift, q + lift, FASCIA_DEPTH)),
            );
        }

        debug!("generate_fascia: {} strips", faces.len());

        pack_faces("fascia", buffer, cursor, &faces, tex_scale)
    }
}
