//! House orchestration
//!
//! Builds a complete house shell in one shared buffer: walls first, then the
//! roof, then the fascia, each appended after the previous component. Decal
//! placements are computed last. A failing step rolls the buffer back, so a
//! caller never sees a partial house.

use house_common::{BufferCursor, GeometryError, ModelSpec, SharedBuffer};
use tracing::{debug, warn};

use crate::body::BodyGenerator;
use crate::decal::{Decal, DecalGenerator};
use crate::fascia::FasciaGenerator;
use crate::layout::SegmentGenerator;
use crate::roof::{DEFAULT_ROOF_THICKNESS, RoofGenerator, RoofParams};
use crate::segment::Segment;

/// Optional house parameters
#[derive(Clone, Debug, PartialEq)]
pub struct HouseOptions {
    /// Seed for the footprint layout, random when `None`
    pub seed: Option<u64>,
    pub tex_scale_roof: f32,
    pub tex_scale_body: f32,
    /// Distance between the top and bottom roof layers
    pub thickness_roof: f32,
    /// Explicit footprint, replaces the seeded layout
    pub segments: Option<Vec<Segment>>,
}

impl Default for HouseOptions {
    fn default() -> Self {
        Self {
            seed: None,
            tex_scale_roof: 1.0,
            tex_scale_body: 1.0,
            thickness_roof: DEFAULT_ROOF_THICKNESS,
            segments: None,
        }
    }
}

/// A generated house: one descriptor per mesh component plus decals
#[derive(Clone, Debug, PartialEq)]
pub struct House {
    pub body: ModelSpec,
    pub roof: ModelSpec,
    pub fascia: ModelSpec,
    pub decals: Vec<Decal>,
    /// Footprint the house was built from
    pub segments: Vec<Segment>,
    /// Cursor after the last component, for appending more geometry
    pub cursor: BufferCursor,
}

impl House {
    /// Mesh descriptors in buffer order
    pub fn meshes(&self) -> [&ModelSpec; 3] {
        [&self.body, &self.roof, &self.fascia]
    }
}

/// House generator
pub struct HouseGenerator;

impl HouseGenerator {
    /// Generate a house into a fresh buffer
    ///
    /// # Arguments
    /// * `height_body` - Wall height below the eaves
    /// * `height_roof` - Ridge height above the eaves
    /// * `extrude` - Half width of the walls around the ridge line
    /// * `overhang` - How far the roof reaches past the walls
    pub fn generate_house(
        height_body: f32,
        height_roof: f32,
        extrude: f32,
        overhang: f32,
        options: &HouseOptions,
    ) -> Result<(SharedBuffer, House), GeometryError> {
        let mut buffer = SharedBuffer::new();
        let house = Self::generate_house_into(
            &mut buffer,
            BufferCursor::START,
            height_body,
            height_roof,
            extrude,
            overhang,
            options,
        )?;
        Ok((buffer, house))
    }

    /// Generate a house into `buffer`, starting at `cursor`
    ///
    /// On error everything written from `cursor` on is discarded.
    pub fn generate_house_into(
        buffer: &mut SharedBuffer,
        cursor: BufferCursor,
        height_body: f32,
        height_roof: f32,
        extrude: f32,
        overhang: f32,
        options: &HouseOptions,
    ) -> Result<House, GeometryError> {
        let result = build(
            buffer,
            cursor,
            height_body,
            height_roof,
            extrude,
            overhang,
            options,
        );
        if result.is_err() {
            buffer.rewind(cursor);
        }
        result
    }
}

fn build(
    buffer: &mut SharedBuffer,
    cursor: BufferCursor,
    height_body: f32,
    height_roof: f32,
    extrude: f32,
    overhang: f32,
    options: &HouseOptions,
) -> Result<House, GeometryError> {
    if !(extrude > 0.0 && extrude.is_finite()) {
        return Err(GeometryError::invalid(format!(
            "extrude must be a positive finite number, got {extrude}"
        )));
    }
    GeometryError::ensure_finite(
        "house heights, overhang and thickness_roof",
        &[height_body, height_roof, overhang, options.thickness_roof],
    )?;

    let overhang = if overhang < 0.0 {
        warn!("generate_house: overhang must be >= 0.0, clamping to 0.0");
        0.0
    } else {
        overhang
    };
    let tex_scale_roof = positive_tex_scale("tex_scale_roof", options.tex_scale_roof);
    let tex_scale_body = positive_tex_scale("tex_scale_body", options.tex_scale_body);

    // The walls rise into the overhang so they meet the underside of the slopes
    let roof_extrude = extrude + overhang;
    let t = overhang / roof_extrude;
    let body_height = height_body + t * height_roof;

    let segments = match &options.segments {
        Some(segments) => segments.clone(),
        None => SegmentGenerator::generate_segments(roof_extrude, options.seed),
    };
    if segments.is_empty() {
        return Err(GeometryError::invalid("house needs at least one segment"));
    }

    let body = BodyGenerator::generate_body(
        &segments,
        body_height,
        extrude,
        tex_scale_body,
        buffer,
        cursor,
    )?;

    let roof_params = RoofParams {
        height: height_roof,
        extrude: roof_extrude,
        thickness: options.thickness_roof,
        y_offset: height_body,
        tex_scale: tex_scale_roof,
    };
    let roof = RoofGenerator::generate_roof(&segments, &roof_params, buffer, body.cursor)?;

    let fascia = FasciaGenerator::generate_fascia(
        &segments,
        roof_extrude,
        height_body,
        tex_scale_roof,
        buffer,
        roof.cursor,
    )?;

    let decals = DecalGenerator::generate_decals(&segments, height_body, extrude)?;

    debug!(
        "generate_house: {} segments, {} vertices, {} decals",
        segments.len(),
        fascia.cursor.vertex_count - cursor.vertex_count,
        decals.len()
    );

    Ok(House {
        body: body.spec,
        roof: roof.spec,
        fascia: fascia.spec,
        decals,
        segments,
        cursor: fascia.cursor,
    })
}

fn positive_tex_scale(name: &str, value: f32) -> f32 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        warn!("generate_house: {} must be > 0.0, got {}, using 1.0", name, value);
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn single_wing() -> HouseOptions {
        HouseOptions {
            segments: Some(vec![Segment::new(Vec2::ZERO, Vec2::new(8.0, 0.0))]),
            ..HouseOptions::default()
        }
    }

    #[test]
    fn test_components_are_chained() {
        let (buffer, house) =
            HouseGenerator::generate_house(3.0, 2.0, 2.0, 0.5, &single_wing()).unwrap();

        // body: 4 walls, roof: 2 x 14, fascia: 4 strips
        assert_eq!(house.body.vertex_count, 16);
        assert_eq!(house.roof.vertex_count, 28);
        assert_eq!(house.fascia.vertex_count, 16);

        assert_eq!(house.body.base_vertex, 0);
        assert_eq!(house.roof.base_vertex, 16);
        assert_eq!(house.fascia.base_vertex, 44);
        assert_eq!(house.roof.vertex_offset, 16 * 44);
        assert_eq!(house.roof.index.byte_offset, house.body.index_byte_len());

        assert_eq!(house.cursor.vertex_count, 60);
        assert_eq!(buffer.vertex_bytes().len(), 60 * 44);
        assert_eq!(buffer.index_bytes().len(), house.cursor.index_offset);
    }

    #[test]
    fn test_body_rises_into_overhang() {
        let (buffer, house) =
            HouseGenerator::generate_house(3.0, 2.0, 2.0, 0.5, &single_wing()).unwrap();

        // t = 0.5 / 2.5, walls reach 3.0 + 0.2 * 2.0
        let top = (0..house.body.vertex_count as usize)
            .filter_map(|i| house_common::unpack_vertex(&buffer.vertex_bytes()[i * 44..]))
            .map(|v| v.position[1])
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((top - 3.4).abs() < 1e-5);
    }

    #[test]
    fn test_seeded_house_is_deterministic() {
        let options = HouseOptions {
            seed: Some(7),
            ..HouseOptions::default()
        };
        let (a_buffer, a) = HouseGenerator::generate_house(3.0, 2.0, 1.5, 0.3, &options).unwrap();
        let (b_buffer, b) = HouseGenerator::generate_house(3.0, 2.0, 1.5, 0.3, &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a_buffer.vertex_bytes(), b_buffer.vertex_bytes());
    }

    #[test]
    fn test_negative_overhang_is_clamped() {
        let (_, clamped) =
            HouseGenerator::generate_house(3.0, 2.0, 2.0, -1.0, &single_wing()).unwrap();
        let (_, flush) =
            HouseGenerator::generate_house(3.0, 2.0, 2.0, 0.0, &single_wing()).unwrap();
        assert_eq!(clamped, flush);
    }

    #[test]
    fn test_failed_build_rolls_back() {
        let mut buffer = SharedBuffer::new();
        let first = HouseGenerator::generate_house_into(
            &mut buffer,
            BufferCursor::START,
            3.0,
            2.0,
            2.0,
            0.5,
            &single_wing(),
        )
        .unwrap();
        let snapshot = buffer.vertex_bytes().to_vec();

        // Body and roof still fit, the fascia pushes past the index limit
        let cursor = BufferCursor {
            vertex_count: u16::MAX as u32 - 50,
            ..first.cursor
        };
        let result = HouseGenerator::generate_house_into(
            &mut buffer,
            cursor,
            3.0,
            2.0,
            2.0,
            0.5,
            &single_wing(),
        );

        assert!(matches!(result, Err(GeometryError::BufferOverflow { .. })));
        assert_eq!(buffer.vertex_bytes(), snapshot.as_slice());
        assert_eq!(buffer.index_bytes().len(), first.cursor.index_offset);
    }

    #[test]
    fn test_empty_footprint_fails() {
        let options = HouseOptions {
            segments: Some(Vec::new()),
            ..HouseOptions::default()
        };
        let result = HouseGenerator::generate_house(3.0, 2.0, 2.0, 0.5, &options);
        assert!(matches!(result, Err(GeometryError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_non_finite_input_fails() {
        let nan_thickness = HouseOptions {
            thickness_roof: f32::NAN,
            ..single_wing()
        };
        let cases = [
            (f32::NAN, 2.0, 0.5, single_wing()),
            (3.0, f32::INFINITY, 0.5, single_wing()),
            (3.0, 2.0, f32::NAN, single_wing()),
            (3.0, 2.0, 0.5, nan_thickness),
        ];
        for (height_body, height_roof, overhang, options) in cases {
            let mut buffer = SharedBuffer::new();
            let result = HouseGenerator::generate_house_into(
                &mut buffer,
                BufferCursor::START,
                height_body,
                height_roof,
                2.0,
                overhang,
                &options,
            );
            assert!(matches!(result, Err(GeometryError::InvalidGeometry { .. })));
            assert!(buffer.vertex_bytes().is_empty());
            assert!(buffer.index_bytes().is_empty());
        }
    }

    #[test]
    fn test_invalid_extrude() {
        let result = HouseGenerator::generate_house(3.0, 2.0, 0.0, 0.0, &single_wing());
        assert!(matches!(result, Err(GeometryError::InvalidGeometry { .. })));
    }
}
