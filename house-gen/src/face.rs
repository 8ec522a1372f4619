//! Planar polygon faces emitted by the position generators

use glam::Vec3;

/// Points closer than this are treated as the same point
pub const COINCIDENT_EPSILON: f32 = 1e-3;

/// A triangle or planar quad, wound counter-clockwise when seen from its front
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Face {
    Tri([Vec3; 3]),
    Quad([Vec3; 4]),
}

impl Face {
    /// Points in winding order
    pub fn points(&self) -> &[Vec3] {
        match self {
            Face::Tri(points) => points,
            Face::Quad(points) => points,
        }
    }

    /// Number of vertices this face emits
    pub fn vertex_count(&self) -> usize {
        self.points().len()
    }

    /// Number of indices after fan triangulation
    pub fn index_count(&self) -> usize {
        (self.vertex_count() - 2) * 3
    }

    /// Fan triangulation from the first point, as local vertex numbers
    pub fn triangles(&self) -> &'static [[u16; 3]] {
        match self {
            Face::Tri(_) => &[[0, 1, 2]],
            Face::Quad(_) => &[[0, 1, 2], [0, 2, 3]],
        }
    }

    /// Same face with opposite winding
    pub fn reversed(&self) -> Face {
        match *self {
            Face::Tri([a, b, c]) => Face::Tri([c, b, a]),
            Face::Quad([a, b, c, d]) => Face::Quad([d, c, b, a]),
        }
    }

    /// Same face moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Face {
        self.map(|p| p + offset)
    }

    /// Apply a point transform to every point, keeping the order
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Face {
        match *self {
            Face::Tri([a, b, c]) => Face::Tri([f(a), f(b), f(c)]),
            Face::Quad([a, b, c, d]) => Face::Quad([f(a), f(b), f(c), f(d)]),
        }
    }

    /// Unit face normal (Newell's method), `None` for zero-area faces
    pub fn normal(&self) -> Option<Vec3> {
        let points = self.points();
        let mut normal = Vec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize()
    }

    /// Quad `a b c d`, or triangle `a b c` when `c` and `d` coincide
    pub fn tri_or_quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Face {
        if c.distance(d) > COINCIDENT_EPSILON {
            Face::Quad([a, b, c, d])
        } else {
            Face::Tri([a, b, c])
        }
    }
}

/// Vertical strip hanging `depth` below the top edge `p -> q`
///
/// With `p -> q` taken in the winding order of an outward facing roof face,
/// the strip faces the same side as that face.
pub fn hanging_strip(p: Vec3, q: Vec3, depth: f32) -> Face {
    let drop = Vec3::new(0.0, depth, 0.0);
    Face::Quad([p, p - drop, q - drop, q])
}
