//! 3D primitive constructors: sphere, frustum and cylinder

use crate::errors::GeometryError;
use crate::float_types::{PI, Real, TAU, tolerance};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// UV sphere of `radius` centred at the origin, poles on the Z axis.
    ///
    /// ```text
    /// segments: slices around Z (longitude), >= 3
    /// stacks:   bands from pole to pole (latitude), >= 2
    /// ```
    /// The poles are fans of triangles; every other band is split into triangle pairs.
    pub fn sphere(
        radius: Real,
        segments: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        GeometryError::check_positive("sphere radius", radius)?;
        GeometryError::check_segments("sphere segments", 3, segments)?;
        GeometryError::check_segments("sphere stacks", 2, stacks)?;

        let point = |j: usize, i: usize| {
            let phi = PI * j as Real / stacks as Real;
            let theta = TAU * (i % segments) as Real / segments as Real;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            Vertex::new(Point3::from(normal * radius), normal)
        };
        let north = Vertex::new(Point3::new(0.0, 0.0, radius), Vector3::z());
        let south = Vertex::new(Point3::new(0.0, 0.0, -radius), -Vector3::z());

        let mut polygons = Vec::with_capacity(2 * segments * stacks);
        for i in 0..segments {
            // Top cap
            polygons.extend(Polygon::new(
                vec![north, point(1, i), point(1, i + 1)],
                metadata.clone(),
            ));

            // Bands between ring j (above) and ring j + 1 (below)
            for j in 1..stacks - 1 {
                let (up_i, up_next) = (point(j, i), point(j, i + 1));
                let (low_i, low_next) = (point(j + 1, i), point(j + 1, i + 1));
                polygons.extend(Polygon::new(vec![up_i, low_i, low_next], metadata.clone()));
                polygons.extend(Polygon::new(vec![up_i, low_next, up_next], metadata.clone()));
            }

            // Bottom cap
            polygons.extend(Polygon::new(
                vec![south, point(stacks - 1, i + 1), point(stacks - 1, i)],
                metadata.clone(),
            ));
        }

        Ok(Mesh::from_polygons(polygons))
    }

    /// Truncated cone along +Z: radius `radius1` on `z = 0`, `radius2` on `z = height`.
    ///
    /// One of the radii may be zero, producing a cone.
    pub fn frustum(
        radius1: Real,
        radius2: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        GeometryError::check_positive("frustum height", height)?;
        GeometryError::check_segments("frustum segments", 3, segments)?;
        for (name, r) in [("frustum radius1", radius1), ("frustum radius2", radius2)] {
            if !r.is_finite() || r < 0.0 {
                return Err(GeometryError::NonPositive { name, value: r });
            }
        }
        if radius1.max(radius2) <= tolerance() {
            return Err(GeometryError::InvalidParameters(
                "frustum needs at least one non-zero radius".to_string(),
            ));
        }

        let has_bottom = radius1 > tolerance();
        let has_top = radius2 > tolerance();
        let slope = radius1 - radius2;

        let ring = |r: Real, z: Real, i: usize| {
            let theta = TAU * (i % segments) as Real / segments as Real;
            let (sin, cos) = theta.sin_cos();
            let normal = Vector3::new(cos * height, sin * height, slope).normalize();
            Vertex::new(Point3::new(r * cos, r * sin, z), normal)
        };

        let mut polygons = Vec::with_capacity(segments + 2);
        for i in 0..segments {
            let side = match (has_bottom, has_top) {
                (true, true) => vec![
                    ring(radius1, 0.0, i),
                    ring(radius1, 0.0, i + 1),
                    ring(radius2, height, i + 1),
                    ring(radius2, height, i),
                ],
                (true, false) => vec![
                    ring(radius1, 0.0, i),
                    ring(radius1, 0.0, i + 1),
                    ring(0.0, height, i),
                ],
                _ => vec![
                    ring(0.0, 0.0, i),
                    ring(radius2, height, i + 1),
                    ring(radius2, height, i),
                ],
            };
            polygons.extend(Polygon::new(side, metadata.clone()));
        }

        if has_bottom {
            let bottom = (0..segments)
                .rev()
                .map(|i| Vertex::new(ring(radius1, 0.0, i).pos, -Vector3::z()))
                .collect();
            polygons.extend(Polygon::new(bottom, metadata.clone()));
        }
        if has_top {
            let top = (0..segments)
                .map(|i| Vertex::new(ring(radius2, height, i).pos, Vector3::z()))
                .collect();
            polygons.extend(Polygon::new(top, metadata.clone()));
        }

        Ok(Mesh::from_polygons(polygons))
    }

    /// Cylinder of `radius` along +Z from `z = 0` to `z = height`.
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        GeometryError::check_positive("cylinder radius", radius)?;
        Self::frustum(radius, radius, height, segments, metadata)
    }
}
