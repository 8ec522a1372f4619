//! Roof position generation for a single footprint segment
//!
//! A segment is the ridge line of one roof wing. The wing is built from two
//! long slopes meeting at the ridge and up to two short hip faces closing the
//! ridge ends. Everything is generated at base height 0; the packer lifts it
//! to the wall top.

use glam::Vec3;
use house_common::GeometryError;

use crate::face::Face;
use crate::segment::{Segment, resolve_dir_norm};

/// Which side of the ridge a slope sits on, relative to the segment normal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlopeSide {
    /// Eaves at `-norm * extrude`
    Minus,
    /// Eaves at `+norm * extrude`
    Plus,
}

/// One long roof slope: two ridge apexes and the two eave points below them
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofSlope {
    pub side: SlopeSide,
    pub apex_end: Vec3,
    pub eave_end: Vec3,
    pub eave_start: Vec3,
    pub apex_start: Vec3,
}

impl RoofSlope {
    /// The slope as an outward facing quad
    ///
    /// The minus slope walks end apex -> end eave -> start eave -> start apex;
    /// the plus slope walks the same path backwards so it faces the other way.
    pub fn face(&self) -> Face {
        match self.side {
            SlopeSide::Minus => Face::Quad([
                self.apex_end,
                self.eave_end,
                self.eave_start,
                self.apex_start,
            ]),
            SlopeSide::Plus => Face::Quad([
                self.apex_start,
                self.eave_start,
                self.eave_end,
                self.apex_end,
            ]),
        }
    }

    /// Eave edge in the face's winding order
    pub fn eave(&self) -> (Vec3, Vec3) {
        match self.side {
            SlopeSide::Minus => (self.eave_end, self.eave_start),
            SlopeSide::Plus => (self.eave_start, self.eave_end),
        }
    }

    /// Opposite slope of a symmetric pitched roof
    ///
    /// The ridge apexes are shared; the eaves are carried across the ridge by
    /// `2 * extrude` along `norm`.
    pub fn mirrored(&self, norm: Vec3, extrude: f32) -> RoofSlope {
        let across = norm * (2.0 * extrude);
        RoofSlope {
            side: match self.side {
                SlopeSide::Minus => SlopeSide::Plus,
                SlopeSide::Plus => SlopeSide::Minus,
            },
            apex_end: self.apex_end,
            eave_end: self.eave_end + across,
            eave_start: self.eave_start + across,
            apex_start: self.apex_start,
        }
    }
}

/// Unindexed roof geometry of one segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofPolyData {
    pub long_minus: RoofSlope,
    pub long_plus: RoofSlope,
    /// Hip face closing the ridge end, absent for flat segments
    pub short_end: Option<Face>,
    /// Hip face closing the ridge start, absent for flat or joined segments
    pub short_start: Option<Face>,
}

impl RoofPolyData {
    /// Present faces in emission order: minus, plus, end, start
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        [
            Some(self.long_minus.face()),
            Some(self.long_plus.face()),
            self.short_end,
            self.short_start,
        ]
        .into_iter()
        .flatten()
    }

    /// Eave edges of every present face, in each face's winding order
    pub fn eave_edges(&self) -> Vec<(Vec3, Vec3)> {
        let mut edges = vec![self.long_minus.eave(), self.long_plus.eave()];
        for face in [self.short_end, self.short_start].into_iter().flatten() {
            let points = face.points();
            edges.push((points[1], points[2]));
        }
        edges
    }
}

/// Rotate `point` half a turn about the vertical line through `pivot`
///
/// Implemented as a point reflection through `pivot` followed by negating the
/// height again, which undoes the vertical flip of the reflection.
#[inline]
pub fn rotate_half_turn(point: Vec3, pivot: Vec3) -> Vec3 {
    let reflected = pivot - (point - pivot);
    Vec3::new(reflected.x, -reflected.y, reflected.z)
}

#[inline]
fn on_ground(point: Vec3) -> Vec3 {
    Vec3::new(point.x, 0.0, point.z)
}

/// Generate the roof faces of one segment
///
/// # Arguments
/// * `segment` - Ridge line of the wing
/// * `height` - Ridge height above the eaves
/// * `extrude` - Horizontal distance from the ridge to the eaves
///
/// # Errors
/// [`GeometryError::InvalidGeometry`] for a zero-length segment.
pub fn generate_roof_positions(
    segment: &Segment,
    height: f32,
    extrude: f32,
) -> Result<RoofPolyData, GeometryError> {
    let frame = resolve_dir_norm(segment)?;
    let lift = Vec3::Y * height;

    let (start_shift, end_shift) = segment.end_shifts(extrude);

    let long_minus = RoofSlope {
        side: SlopeSide::Minus,
        apex_end: frame.end_ref + lift,
        eave_end: on_ground(frame.end_ref - frame.norm * extrude) + frame.dir * end_shift,
        eave_start: on_ground(frame.start_ref - frame.norm * extrude + frame.dir * start_shift),
        apex_start: frame.start_ref + lift,
    };
    let long_plus = long_minus.mirrored(frame.norm, extrude);

    let mut short_end = None;
    let mut short_start = None;

    if !segment.flat {
        let eave_plus = on_ground(frame.end_ref) + frame.norm * extrude + frame.dir * extrude;
        let eave_minus = eave_plus - frame.norm * (2.0 * extrude);
        let end_face = Face::Tri([frame.end_ref + lift, eave_plus, eave_minus]);
        short_end = Some(end_face);

        if !segment.start_join {
            let pivot = frame.start_ref + frame.dir * (frame.length / 2.0);
            short_start = Some(end_face.map(|p| rotate_half_turn(p, pivot)));
        }
    }

    Ok(RoofPolyData {
        long_minus,
        long_plus,
        short_end,
        short_start,
    })
}
