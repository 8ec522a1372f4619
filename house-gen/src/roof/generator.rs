//! Roof mesh generation
//!
//! Turns per-segment roof faces into a two-layer shell (top and bottom, the
//! bottom lowered by the roof thickness and wound the other way) and packs it
//! into the shared buffer.

use glam::{Vec2, Vec3};
use house_common::{BufferCursor, GeometryError, SharedBuffer};
use tracing::{debug, warn};

use super::curve::generate_roof_positions_from_curve;
use super::positions::generate_roof_positions;
use crate::face::Face;
use crate::packer::{MeshOutput, pack_faces};
use crate::segment::Segment;

/// Default distance between the top and bottom roof layers
pub const DEFAULT_ROOF_THICKNESS: f32 = 0.05;

/// Shape parameters for a segment roof
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofParams {
    /// Ridge height above the eaves
    pub height: f32,
    /// Horizontal distance from ridge to eaves
    pub extrude: f32,
    /// Distance between the top and bottom layers
    pub thickness: f32,
    /// Height of the eaves
    pub y_offset: f32,
    /// Texcoord units per world unit
    pub tex_scale: f32,
}

impl Default for RoofParams {
    fn default() -> Self {
        Self {
            height: 1.0,
            extrude: 1.0,
            thickness: DEFAULT_ROOF_THICKNESS,
            y_offset: 0.0,
            tex_scale: 1.0,
        }
    }
}

/// Roof mesh generator
pub struct RoofGenerator;

impl RoofGenerator {
    /// Generate the roof over `segments` into `buffer` at `cursor`
    ///
    /// Per segment the top layer is emitted as minus slope, plus slope, end
    /// face, start face (absent faces are skipped). The bottom layer repeats
    /// all of it lowered by `thickness` with reversed winding.
    ///
    /// # Errors
    /// - [`GeometryError::InvalidGeometry`] for a zero-length segment or a
    ///   non-finite parameter
    /// - [`GeometryError::BufferOverflow`] if the roof would not fit u16 indices
    pub fn generate_roof(
        segments: &[Segment],
        params: &RoofParams,
        buffer: &mut SharedBuffer,
        cursor: BufferCursor,
    ) -> Result<MeshOutput, GeometryError> {
        GeometryError::ensure_finite(
            "roof parameters",
            &[
                params.height,
                params.extrude,
                params.thickness,
                params.y_offset,
                params.tex_scale,
            ],
        )?;

        let thickness = if params.thickness < 0.0 {
            warn!("generate_roof: thickness must be >= 0.0, clamping to 0.0");
            0.0
        } else {
            params.thickness
        };

        let mut top = Vec::with_capacity(segments.len() * 4);
        for segment in segments {
            let roof = generate_roof_positions(segment, params.height, params.extrude)?;
            top.extend(roof.faces());
        }

        let lift = Vec3::Y * params.y_offset;
        let drop = Vec3::Y * (params.y_offset - thickness);
        let mut faces: Vec<Face> = top.iter().map(|face| face.translated(lift)).collect();
        faces.extend(top.iter().map(|face| face.reversed().translated(drop)));

        debug!(
            "generate_roof: {} segments -> {} faces per layer",
            segments.len(),
            top.len()
        );

        pack_faces("roof", buffer, cursor, &faces, params.tex_scale)
    }

    /// Generate an outline roof into `buffer` at `cursor`
    ///
    /// See [`generate_roof_positions_from_curve`] for the face layout.
    pub fn generate_roof_from_curve(
        footprint: &[Vec2],
        roof_outline: &[Vec2],
        height: f32,
        y_offset: f32,
        tex_scale: f32,
        buffer: &mut SharedBuffer,
        cursor: BufferCursor,
    ) -> Result<MeshOutput, GeometryError> {
        GeometryError::ensure_finite("tex_scale", &[tex_scale])?;
        let faces = generate_roof_positions_from_curve(footprint, roof_outline, height, y_offset)?;
        pack_faces("roof", buffer, cursor, &faces, tex_scale)
    }
}
