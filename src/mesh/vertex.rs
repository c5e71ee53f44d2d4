//! Polygon corners: a position plus a shading normal.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A polygon corner. The normal is only used for shading; geometry uses the
/// polygon's plane.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Build a vertex; any NaN or infinite component becomes `0.0`.
    #[inline]
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        let finite = |c: Real| if c.is_finite() { c } else { 0.0 };
        Vertex {
            pos: pos.map(finite),
            normal: normal.map(finite),
        }
    }

    /// Point the normal the other way; the position is untouched.
    ///
    /// ```rust
    /// # use nalgebra::{Point3, Vector3};
    /// # use banshee::mesh::vertex::Vertex;
    /// let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::x());
    /// v.flip();
    /// assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(v.normal, -Vector3::x());
    /// ```
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Lerp position and normal; `t = 0` is `self`, `t = 1` is `other`.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex::new(
            self.pos + (other.pos - self.pos) * t,
            self.normal.lerp(&other.normal, t),
        )
    }
}
