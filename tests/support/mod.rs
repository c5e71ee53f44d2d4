//! Test support library
//! Provides various helper functions & utilities for tests.

use banshee::{
    float_types::{PI, Real},
    ghost::GhostParams,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Area of a regular `segments`-gon inscribed in a circle of `radius`.
pub fn ngon_area(radius: Real, segments: usize) -> Real {
    0.5 * segments as Real * radius * radius * (2.0 * PI / segments as Real).sin()
}

/// Volume of a frustum with regular polygonal ends, as the tessellated primitives build it.
pub fn ngon_frustum_volume(r1: Real, r2: Real, height: Real, segments: usize) -> Real {
    let (a1, a2) = (ngon_area(r1, segments), ngon_area(r2, segments));
    height / 3.0 * (a1 + a2 + (a1 * a2).sqrt())
}

/// Small tessellation so that Boolean tests stay fast.
pub fn low_res_params() -> GhostParams {
    GhostParams {
        num_sections: 4,
        ring_points: 16,
        sphere_segments: 12,
        sphere_stacks: 6,
        arm_segments: 8,
        loft_subdivisions: 1,
        ..GhostParams::default()
    }
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None).expect("test polygon must span a plane")
}
