//! Window and door placement on the long walls
//!
//! Decals are not geometry: they are placements (centre, facing, size) that a
//! renderer projects onto the body mesh.

use glam::{Vec2, Vec3};
use house_common::GeometryError;
use tracing::debug;

use crate::segment::{Segment, resolve_dir_norm};

/// Distance between neighbouring window centres
pub const WINDOW_SPACING: f32 = 3.0;
/// Minimum distance from a window centre to the wall ends
pub const WINDOW_MARGIN: f32 = 1.0;
/// Window centre height as a fraction of the wall height
pub const WINDOW_HEIGHT_FACTOR: f32 = 0.55;
/// Gap between a decal and the wall it sits on
pub const DECAL_OFFSET: f32 = 0.01;

/// Width and height of a window
pub const WINDOW_SIZE: Vec2 = Vec2::new(1.0, 1.2);
/// Width and height of a door
pub const DOOR_SIZE: Vec2 = Vec2::new(1.1, 2.1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecalKind {
    Window,
    Door,
}

impl DecalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecalKind::Window => "window",
            DecalKind::Door => "door",
        }
    }
}

/// One decal placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decal {
    pub kind: DecalKind,
    /// Centre of the decal
    pub position: Vec3,
    /// Direction the decal faces (the wall's outward normal)
    pub normal: Vec3,
    /// Width and height
    pub size: Vec2,
}

/// Decal generator
pub struct DecalGenerator;

impl DecalGenerator {
    /// Place windows along both long walls of every segment and one door
    ///
    /// The door goes at the centre of the first segment's plus wall and takes
    /// the place of the window nearest to it.
    pub fn generate_decals(
        segments: &[Segment],
        height_body: f32,
        extrude: f32,
    ) -> Result<Vec<Decal>, GeometryError> {
        let mut decals = Vec::new();
        let window_y = height_body * WINDOW_HEIGHT_FACTOR;

        for (i, segment) in segments.iter().enumerate() {
            let frame = resolve_dir_norm(segment)?;
            let (s0, s1) = segment.end_shifts(extrude);
            let wall_length = frame.length + s1 - s0;
            let wall_start = frame.start_ref + frame.dir * s0;

            let slots = window_slots(wall_length);
            let door_at = wall_length / 2.0;
            let door_slot = if i == 0 {
                nearest(&slots, door_at)
            } else {
                None
            };

            for (side, normal) in [(-1.0, -frame.norm), (1.0, frame.norm)] {
                let face = wall_start + frame.norm * (side * (extrude + DECAL_OFFSET));
                let is_door_wall = i == 0 && side > 0.0;

                for (slot, &along) in slots.iter().enumerate() {
                    if is_door_wall && door_slot == Some(slot) {
                        continue;
                    }
                    decals.push(Decal {
                        kind: DecalKind::Window,
                        position: face + frame.dir * along + Vec3::Y * window_y,
                        normal,
                        size: WINDOW_SIZE,
                    });
                }

                if is_door_wall {
                    decals.push(Decal {
                        kind: DecalKind::Door,
                        position: face + frame.dir * door_at + Vec3::Y * (DOOR_SIZE.y / 2.0),
                        normal,
                        size: DOOR_SIZE,
                    });
                }
            }
        }

        debug!("generate_decals: {} decals", decals.len());
        Ok(decals)
    }
}

/// Window centres along a wall of `length`, evenly spaced and centred
fn window_slots(length: f32) -> Vec<f32> {
    let usable = length - 2.0 * WINDOW_MARGIN;
    if usable < 0.0 {
        return Vec::new();
    }
    let count = (usable / WINDOW_SPACING).floor() as usize + 1;
    let first = (length - (count - 1) as f32 * WINDOW_SPACING) / 2.0;
    (0..count)
        .map(|i| first + i as f32 * WINDOW_SPACING)
        .collect()
}

fn nearest(slots: &[f32], at: f32) -> Option<usize> {
    slots
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - at).abs().total_cmp(&(*b - at).abs()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_window_slots() {
        assert!(window_slots(1.5).is_empty());
        assert_eq!(window_slots(2.0), vec![1.0]);
        // 10 long: usable 8 -> 3 windows, centred
        let slots = window_slots(10.0);
        assert_eq!(slots.len(), 3);
        assert!((slots[0] - 2.0).abs() < EPSILON);
        assert!((slots[2] - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_segment_has_one_door() {
        // Wall runs from x = -2 to x = 8
        let segment = Segment::new(Vec2::ZERO, Vec2::new(6.0, 0.0));
        let decals = DecalGenerator::generate_decals(&[segment], 3.0, 2.0).unwrap();

        let doors: Vec<_> = decals
            .iter()
            .filter(|d| d.kind == DecalKind::Door)
            .collect();
        assert_eq!(doors.len(), 1);
        let door = doors[0];
        assert!((door.position - Vec3::new(3.0, 1.05, 2.01)).length() < EPSILON);
        assert!((door.normal - Vec3::Z).length() < EPSILON);

        // 3 windows on the minus wall, 2 left on the plus wall
        assert_eq!(decals.len(), 6);
    }

    #[test]
    fn test_windows_sit_in_front_of_walls() {
        let segment = Segment::new(Vec2::ZERO, Vec2::new(6.0, 0.0));
        let decals = DecalGenerator::generate_decals(&[segment], 4.0, 2.0).unwrap();
        for decal in decals.iter().filter(|d| d.kind == DecalKind::Window) {
            assert!((decal.position.y - 2.2).abs() < EPSILON);
            assert!((decal.position.z.abs() - 2.01).abs() < EPSILON);
            assert!(decal.position.z * decal.normal.z > 0.0);
        }
    }

    #[test]
    fn test_only_first_segment_gets_a_door() {
        let segments = [
            Segment::new(Vec2::ZERO, Vec2::new(6.0, 0.0)),
            Segment::new(Vec2::new(6.0, 0.0), Vec2::new(6.0, 8.0)).joined(),
        ];
        let decals = DecalGenerator::generate_decals(&segments, 3.0, 2.0).unwrap();
        let doors = decals.iter().filter(|d| d.kind == DecalKind::Door).count();
        assert_eq!(doors, 1);
    }
}
