//! Struct and functions for working with planar `Polygon`s in 3D space.

use crate::float_types::{EPSILON, Real, tolerance};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Plane classification constants; a polygon's type is the bitwise OR of its vertices' types.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Result of splitting a polygon by a plane:
/// `(coplanar_front, coplanar_back, front, back)`.
pub type SplitPolygons<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

/// An oriented plane `n · p = w` with unit normal `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and its offset along that normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Best-fit plane through a closed ring of points using Newell's method.
    ///
    /// The normal follows the winding of the ring (counter-clockwise seen from the
    /// front). Returns `None` when the ring encloses no area.
    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let normal = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + curr.coords.cross(&next.coords)
            });

        let len = normal.norm();
        if len < tolerance() * tolerance() {
            return None;
        }
        let normal = normal / len;

        let centroid = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / points.len() as Real;

        Some(Plane {
            w: normal.dot(&centroid),
            normal,
        })
    }

    /// Plane through the positions of `vertices`, see [`Plane::from_points`].
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let points: Vec<Point3<Real>> = vertices.iter().map(|v| v.pos).collect();
        Self::from_points(&points)
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Flip the plane in place (reverse normal and offset).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as `FRONT`, `BACK` or `COPLANAR` using [`tolerance`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        let eps = tolerance();
        if t < -eps {
            BACK
        } else if t > eps {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Bitmask of the classifications of every vertex of `polygon`.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Split `polygon` by this plane.
    ///
    /// Coplanar polygons go to the front or back bucket depending on whether
    /// their normal agrees with this plane. Spanning polygons are cut in two;
    /// each fragment keeps the plane of the parent polygon, and fragments with
    /// fewer than three vertices are discarded.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> SplitPolygons<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(n + 1);
                let mut split_back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new);
                            split_back.push(vertex_new);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(polygon.fragment(split_front));
                }
                if split_back.len() >= 3 {
                    back.push(polygon.fragment(split_back));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
