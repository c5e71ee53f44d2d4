//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::float_types::{
    EPSILON, Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex};
use crate::traits::CSGOps;
use nalgebra::{Matrix3, Matrix4};
use std::{fmt::Debug, sync::OnceLock};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod bsp;
pub mod loft;
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed polyhedral solid described by its boundary polygons.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons bounding the solid
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons;
        mesh
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polys {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Helper to collect all vertices from the Mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Fan-triangulate every polygon, returning a Mesh made only of triangles.
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| poly.fragment(triangle.to_vec()))
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(triangles)
    }

    /// Number of triangles this mesh produces when exported.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// Signed volume enclosed by the mesh (divergence theorem).
    ///
    /// Positive when polygons wind counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> Real {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Enclosed volume, independent of orientation.
    pub fn volume(&self) -> Real {
        self.signed_volume().abs()
    }

    /// Total area of all boundary polygons.
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(|p| p.area()).sum()
    }

    /// Returns a new Mesh with every polygon flipped (inside becomes outside).
    pub fn inverse(&self) -> Mesh<S> {
        let mut polygons = self.polygons.clone();
        for p in &mut polygons {
            p.flip();
        }
        Mesh::from_polygons(polygons)
    }

    /// Reset every vertex normal to the normal of its polygon.
    pub fn renormalize(&mut self) {
        for poly in &mut self.polygons {
            poly.set_new_normal();
        }
    }
}

/// Apply `matrix` to one polygon; `None` if the polygon collapses.
fn transform_polygon<S: Clone + Send + Sync>(
    poly: &Polygon<S>,
    matrix: &Matrix4<Real>,
    normal_matrix: &Matrix3<Real>,
    mirrored: bool,
) -> Option<Polygon<S>> {
    let mut vertices: Vec<Vertex> = poly
        .vertices
        .iter()
        .map(|v| {
            let normal = normal_matrix * v.normal;
            let normal = if normal.norm() > EPSILON {
                normal.normalize()
            } else {
                normal
            };
            Vertex::new(matrix.transform_point(&v.pos), normal)
        })
        .collect();

    if mirrored {
        vertices.reverse();
    }

    let plane = Plane::from_vertices(&vertices)?;
    Some(Polygon {
        vertices,
        plane,
        bounding_box: OnceLock::new(),
        metadata: poly.metadata.clone(),
    })
}

impl<S: Clone + Send + Sync + Debug> CSGOps for Mesh<S> {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        tracing::debug!(
            a_clip = a_clip.len(),
            a_passthru = a_passthru.len(),
            b_clip = b_clip.len(),
            b_passthru = b_passthru.len(),
            "union"
        );

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        // Clipping needs a tree over the whole other solid, not only the faces near the overlap
        let a_solid = (!a_passthru.is_empty()).then(|| Node::from_polygons(&self.polygons));
        let b_solid = (!b_passthru.is_empty()).then(|| Node::from_polygons(&other.polygons));

        a.clip_to(b_solid.as_ref().unwrap_or(&b));
        b.clip_to(a_solid.as_ref().unwrap_or(&a));
        b.invert();
        b.clip_to(a_solid.as_ref().unwrap_or(&a));
        b.invert();
        a.build(&b.all_polygons());

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);

        Mesh::from_polygons(final_polys)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to Mesh.
    ///
    /// Normals use the inverse-transpose of the linear part; a mirroring
    /// transform reverses polygon winding so that normals keep pointing out.
    fn transform(&self, matrix: &Matrix4<Real>) -> Mesh<S> {
        let linear: Matrix3<Real> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = match linear.try_inverse() {
            Some(inverse) => inverse.transpose(),
            None => {
                tracing::warn!("singular transform, vertex normals left unchanged");
                Matrix3::identity()
            },
        };
        let mirrored = linear.determinant() < 0.0;

        #[cfg(feature = "parallel")]
        let polygons = self
            .polygons
            .par_iter()
            .filter_map(|p| transform_polygon(p, matrix, &normal_matrix, mirrored))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let polygons = self
            .polygons
            .iter()
            .filter_map(|p| transform_polygon(p, matrix, &normal_matrix, mirrored))
            .collect();

        Mesh::from_polygons(polygons)
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            self.polygons
                .iter()
                .fold(Aabb::new_invalid(), |acc, p| acc.merged(&p.bounding_box()))
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
