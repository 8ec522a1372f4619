//! Roof positions from a closed outline
//!
//! The wall outline and an inset roof outline (same point count) are joined
//! edge by edge into a shell. Where the inset collapses an edge to a point the
//! side face degenerates into a triangle, which is how hip ends come out.

use glam::{Vec2, Vec3};
use house_common::GeometryError;

use crate::face::Face;

/// Vertical gap between the top layer and the bottom layer of an outline roof
pub const CURVE_SHELL_GAP: f32 = 0.05;

/// Generate side faces followed by bottom faces for an outline roof
///
/// # Arguments
/// * `footprint` - Closed wall outline, `(x, z)` points with positive signed area
/// * `roof_outline` - Inset outline at ridge height, one point per footprint point
/// * `height` - Ridge height above the wall top
/// * `y_offset` - Height of the wall top
///
/// All side faces are returned before any bottom face, so callers can address
/// the two layers as separate index ranges.
pub fn generate_roof_positions_from_curve(
    footprint: &[Vec2],
    roof_outline: &[Vec2],
    height: f32,
    y_offset: f32,
) -> Result<Vec<Face>, GeometryError> {
    if footprint.len() < 3 {
        return Err(GeometryError::invalid(format!(
            "outline needs at least 3 points, got {}",
            footprint.len()
        )));
    }
    if footprint.len() != roof_outline.len() {
        return Err(GeometryError::invalid(format!(
            "footprint has {} points but roof outline has {}",
            footprint.len(),
            roof_outline.len()
        )));
    }

    GeometryError::ensure_finite("outline height and y_offset", &[height, y_offset])?;
    for (footprint_point, roof_point) in footprint.iter().zip(roof_outline) {
        if !footprint_point.is_finite() || !roof_point.is_finite() {
            return Err(GeometryError::invalid(format!(
                "outline point pair {footprint_point:?} / {roof_point:?} is not finite"
            )));
        }
    }

    let count = footprint.len();
    let mut faces = Vec::with_capacity(count * 2);

    for i in 0..count {
        let edge = OutlineEdge::new(footprint, roof_outline, i, height, y_offset);
        faces.push(Face::tri_or_quad(
            edge.end,
            edge.start,
            edge.roof_start,
            edge.roof_end,
        ));
    }

    // Bottom layer with reversed winding so it faces down
    let gap = y_offset - CURVE_SHELL_GAP;
    for i in 0..count {
        let edge = OutlineEdge::new(footprint, roof_outline, i, height, gap);
        faces.push(Face::tri_or_quad(
            edge.start,
            edge.end,
            edge.roof_end,
            edge.roof_start,
        ));
    }

    Ok(faces)
}

/// Wall-top and roof points of outline edge `i -> i + 1`
struct OutlineEdge {
    start: Vec3,
    end: Vec3,
    roof_start: Vec3,
    roof_end: Vec3,
}

impl OutlineEdge {
    fn new(footprint: &[Vec2], roof: &[Vec2], i: usize, height: f32, base: f32) -> Self {
        let j = (i + 1) % footprint.len();
        let at = |p: Vec2, y: f32| Vec3::new(p.x, y, p.y);
        Self {
            start: at(footprint[i], base),
            end: at(footprint[j], base),
            roof_start: at(roof[i], base + height),
            roof_end: at(roof[j], base + height),
        }
    }
}

/// Offset a closed outline towards its interior
///
/// Each corner moves along the bisector of its two edge normals, far enough
/// that both adjacent edges end up `distance` inside; sharp corners are
/// limited to `2 * distance`. Insetting a rectangle by half its short side
/// collapses the short edges to single points.
///
/// # Errors
/// [`GeometryError::InvalidGeometry`] on fewer than 3 points or a zero-length edge.
pub fn inset_outline(points: &[Vec2], distance: f32) -> Result<Vec<Vec2>, GeometryError> {
    let count = points.len();
    if count < 3 {
        return Err(GeometryError::invalid(format!("outline needs at least 3 points, got {count}")));
    }

    // Interior is to the left of each edge for positive area, to the right otherwise
    let sign = if signed_area(points) >= 0.0 { 1.0 } else { -1.0 };
    let max_offset = distance.abs() * 2.0;

    let mut inset = Vec::with_capacity(count);
    for i in 0..count {
        let prev = points[(i + count - 1) % count];
        let current = points[i];
        let next = points[(i + 1) % count];

        let incoming = (current - prev).try_normalize().ok_or_else(|| {
            GeometryError::invalid(format!("zero-length outline edge at {current:?}"))
        })?;
        let outgoing = (next - current).try_normalize().ok_or_else(|| {
            GeometryError::invalid(format!("zero-length outline edge at {current:?}"))
        })?;

        let n1 = incoming.perp() * sign;
        let n2 = outgoing.perp() * sign;
        let bisector = (n1 + n2).try_normalize().unwrap_or(n1);

        let dot = n1.dot(bisector);
        let offset = if dot.abs() > 0.001 {
            distance / dot
        } else {
            distance
        };

        inset.push(current + bisector * offset.clamp(-max_offset, max_offset));
    }

    Ok(inset)
}

/// Shoelace signed area of a closed outline
pub fn signed_area(points: &[Vec2]) -> f32 {
    let count = points.len();
    (0..count)
        .map(|i| points[i].perp_dot(points[(i + 1) % count]))
        .sum::<f32>()
        * 0.5
}
