//! Seeded footprint layout
//!
//! Produces a chain of one to three roof wings at right angles (an I, L, U or
//! Z shaped plan). Each wing after the first starts at the previous wing's end
//! and is marked as joined, so the roof and walls miter into the corner.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::debug;

use crate::segment::Segment;

/// Maximum number of wings in a generated footprint
pub const MAX_WINGS: usize = 3;

/// Footprint layout generator
pub struct SegmentGenerator;

impl SegmentGenerator {
    /// Generate a footprint for a roof with the given `extrude`
    ///
    /// The same seed always yields the same segments. Without a seed a random
    /// one is drawn and logged so the layout can be reproduced.
    pub fn generate_segments(extrude: f32, seed: Option<u64>) -> Vec<Segment> {
        let seed = seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            debug!("generate_segments: using random seed {}", seed);
            seed
        });
        let mut rng = Pcg32::seed_from_u64(seed);
        let extrude = extrude.abs().max(f32::EPSILON);

        let wings = rng.random_range(1..=MAX_WINGS);
        let mut segments = Vec::with_capacity(wings);

        let first_length = rng.random_range(3.0f32..=6.0) * extrude;
        segments.push(Segment::new(Vec2::ZERO, Vec2::new(first_length, 0.0)));

        let mut dir = Vec2::X;
        for _ in 1..wings {
            // Turn left or right by a quarter
            dir = if rng.random_bool(0.5) {
                dir.perp()
            } else {
                -dir.perp()
            };
            let length = rng.random_range(2.5f32..=5.0) * extrude;
            let start = segments[segments.len() - 1].end;
            segments.push(Segment::new(start, start + dir * length).joined());
        }

        recentre(&mut segments);
        debug!("generate_segments: seed {} -> {} wings", seed, segments.len());
        segments
    }
}

/// Move the segments so their bounding box is centred on the origin
fn recentre(segments: &mut [Segment]) {
    let (min, max) = segments.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), segment| {
            (
                min.min(segment.start).min(segment.end),
                max.max(segment.start).max(segment.end),
            )
        },
    );
    let centre = (min + max) / 2.0;
    for segment in segments.iter_mut() {
        segment.start -= centre;
        segment.end -= centre;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_same_seed_same_layout() {
        let a = SegmentGenerator::generate_segments(2.0, Some(42));
        let b = SegmentGenerator::generate_segments(2.0, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_shape() {
        for seed in 0..64 {
            let segments = SegmentGenerator::generate_segments(1.5, Some(seed));
            assert!((1..=MAX_WINGS).contains(&segments.len()));

            let first = segments[0];
            assert!(!first.start_join);
            assert!((first.end.y - first.start.y).abs() < EPSILON);
            assert!(first.length() >= 3.0 * 1.5 - EPSILON);
            assert!(first.length() <= 6.0 * 1.5 + EPSILON);

            for pair in segments.windows(2) {
                let (prev, next) = (pair[0], pair[1]);
                assert!(next.start_join);
                assert!(!next.flat);
                assert!((next.start - prev.end).length() < EPSILON);
                let turn = (prev.end - prev.start).dot(next.end - next.start);
                assert!(turn.abs() < EPSILON);
                assert!(next.length() >= 2.5 * 1.5 - EPSILON);
                assert!(next.length() <= 5.0 * 1.5 + EPSILON);
            }
        }
    }

    #[test]
    fn test_layout_is_centred() {
        for seed in 0..16 {
            let segments = SegmentGenerator::generate_segments(1.0, Some(seed));
            let mut min = Vec2::splat(f32::INFINITY);
            let mut max = Vec2::splat(f32::NEG_INFINITY);
            for segment in &segments {
                min = min.min(segment.start).min(segment.end);
                max = max.max(segment.start).max(segment.end);
            }
            assert!(((min + max) / 2.0).length() < EPSILON);
        }
    }

    #[test]
    fn test_unseeded_layout_is_valid() {
        let segments = SegmentGenerator::generate_segments(1.0, None);
        assert!(!segments.is_empty());
        assert!(segments.iter().all(|s| s.length() > 0.0));
    }
}
