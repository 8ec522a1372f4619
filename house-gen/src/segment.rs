//! Footprint segments and their direction/normal frames

use glam::{Vec2, Vec3};
use house_common::GeometryError;

/// Segments shorter than this have no usable direction
pub const MIN_SEGMENT_LENGTH: f32 = 1e-5;

/// One directed edge of a house footprint
///
/// Footprint coordinates are `(x, z)` on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    /// No ridge end: the roof stops flush at both ends and no end faces are built
    pub flat: bool,
    /// The start meets the previous segment through a mitered join, so this
    /// segment builds no start face of its own
    pub start_join: bool,
}

impl Segment {
    /// Free-standing segment with gabled ends
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            flat: false,
            start_join: false,
        }
    }

    /// Mark the segment as joined to its predecessor
    pub fn joined(mut self) -> Self {
        self.start_join = true;
        self
    }

    /// Mark the segment as flat
    pub fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// Ground plane length
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Shift along the ridge of the eaves (and walls) at the start and the end
    ///
    /// Gabled ends overhang by `extrude`, joined starts are pulled in by
    /// `extrude` and flat ends stay flush.
    pub fn end_shifts(&self, extrude: f32) -> (f32, f32) {
        let start = if self.start_join {
            extrude
        } else if self.flat {
            0.0
        } else {
            -extrude
        };
        let end = if self.flat { 0.0 } else { extrude };
        (start, end)
    }
}

/// Lift a footprint point onto the ground plane (`y = 0`)
#[inline]
pub fn ground(point: Vec2) -> Vec3 {
    Vec3::new(point.x, 0.0, point.y)
}

/// Reference frame of one segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirNorm {
    pub start_ref: Vec3,
    pub end_ref: Vec3,
    /// Unit vector from start to end
    pub dir: Vec3,
    /// Unit vector perpendicular to `dir` on the ground plane (`dir × Y`)
    pub norm: Vec3,
    pub length: f32,
}

/// Resolve the direction/normal frame of a segment
///
/// Reference points are the segment endpoints on the ground plane. Fails with
/// [`GeometryError::InvalidGeometry`] rather than producing NaNs for a
/// zero-length or non-finite segment.
pub fn resolve_dir_norm(segment: &Segment) -> Result<DirNorm, GeometryError> {
    if !segment.start.is_finite() || !segment.end.is_finite() {
        return Err(GeometryError::invalid(format!(
            "segment {:?} -> {:?} has non-finite coordinates",
            segment.start, segment.end
        )));
    }

    let start_ref = ground(segment.start);
    let end_ref = ground(segment.end);
    let delta = end_ref - start_ref;
    let length = delta.length();

    if length < MIN_SEGMENT_LENGTH {
        return Err(GeometryError::invalid(format!(
            "zero-length segment at {:?}",
            segment.start
        )));
    }

    let dir = delta / length;
    let norm = dir.cross(Vec3::Y);

    Ok(DirNorm {
        start_ref,
        end_ref,
        dir,
        norm,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_axis_aligned_frame() {
        let frame = resolve_dir_norm(&Segment::new(Vec2::ZERO, Vec2::new(10.0, 0.0))).unwrap();
        assert!((frame.dir - Vec3::X).length() < EPSILON);
        assert!((frame.norm - Vec3::Z).length() < EPSILON);
        assert!((frame.length - 10.0).abs() < EPSILON);
        assert_eq!(frame.end_ref, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_diagonal_frame_is_orthonormal() {
        let frame = resolve_dir_norm(&Segment::new(Vec2::ZERO, Vec2::new(10.0, 10.0))).unwrap();
        assert!((frame.dir.length() - 1.0).abs() < EPSILON);
        assert!((frame.norm.length() - 1.0).abs() < EPSILON);
        assert!(frame.dir.dot(frame.norm).abs() < EPSILON);
        assert_eq!(frame.norm.y, 0.0);
    }

    #[test]
    fn test_end_shifts() {
        let segment = Segment::new(Vec2::ZERO, Vec2::X);
        assert_eq!(segment.end_shifts(2.0), (-2.0, 2.0));
        assert_eq!(segment.joined().end_shifts(2.0), (2.0, 2.0));
        assert_eq!(segment.flat().end_shifts(2.0), (0.0, 0.0));
    }

    #[test]
    fn test_zero_length_segment_fails() {
        let point = Vec2::new(3.0, 4.0);
        let result = resolve_dir_norm(&Segment::new(point, point));
        assert!(matches!(result, Err(GeometryError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_non_finite_segment_fails() {
        let result = resolve_dir_norm(&Segment::new(Vec2::ZERO, Vec2::new(f32::NAN, 1.0)));
        assert!(result.is_err());
    }
}
