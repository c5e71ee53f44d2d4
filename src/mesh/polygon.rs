//! Struct and functions for working with planar `Polygon`s in 3D space.

use crate::float_types::{
    Real,
    parry3d::bounding_volume::Aabb,
};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// A convex, planar polygon with at least three vertices.
///
/// Vertices are ordered counter-clockwise when seen from the side the plane
/// normal points to (the outside of the solid the polygon bounds).
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting
    pub plane: Plane,

    /// Lazily‑computed axis‑aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices, computing its plane from their winding.
    ///
    /// Returns `None` if fewer than three vertices are given or they enclose no area.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Option<Self> {
        let plane = Plane::from_vertices(&vertices)?;
        Some(Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        })
    }

    /// Create a triangle from three points, with vertex normals set to the face normal.
    pub fn triangle(points: [Point3<Real>; 3], metadata: Option<S>) -> Option<Self> {
        let vertices = points
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let mut polygon = Self::new(vertices, metadata)?;
        polygon.set_new_normal();
        Some(polygon)
    }

    /// A piece of this polygon produced by splitting: same plane, same metadata.
    pub(crate) fn fragment(&self, vertices: Vec<Vertex>) -> Self {
        Polygon {
            vertices,
            plane: self.plane.clone(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut aabb = Aabb::new_invalid();
            for v in &self.vertices {
                aabb.take_point(v.pos);
            }
            aabb
        })
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Triangulate this polygon as a fan around its first vertex.
    ///
    /// Valid because every polygon in a mesh is convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let first = self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [first, pair[0], pair[1]])
            .collect()
    }

    /// Area of the polygon.
    pub fn area(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }

    /// Reset every vertex normal to the plane normal (flat shading).
    pub fn set_new_normal(&mut self) {
        let normal = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }
}
