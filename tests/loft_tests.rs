mod support;

use approx::assert_relative_eq;
use banshee::{
    GeometryError,
    float_types::Real,
    mesh::{
        Mesh,
        loft::{LoftOptions, Section},
    },
    traits::CSGOps,
};
use nalgebra::Point3;

use crate::support::{approx_eq, ngon_frustum_volume};

fn ring(z: Real, radius: Real, segments: usize) -> Section {
    Section::circle(Point3::new(0.0, 0.0, z), radius, segments).unwrap()
}

const RULED: LoftOptions = LoftOptions {
    solid: true,
    ruled: true,
    subdivisions: 0,
};

#[test]
fn ruled_loft_of_two_circles_is_a_frustum() {
    let sections = [ring(0.0, 1.0, 16), ring(3.0, 2.0, 16)];
    let loft: Mesh<()> = Mesh::loft(&sections, &RULED, None).unwrap();

    assert!(loft.is_manifold());
    assert_relative_eq!(
        loft.signed_volume(),
        ngon_frustum_volume(1.0, 2.0, 3.0, 16),
        epsilon = 1e-9
    );

    let bb = loft.bounding_box();
    assert!(approx_eq(bb.mins.z, 0.0, 1e-12));
    assert!(approx_eq(bb.maxs.z, 3.0, 1e-12));
    assert!(approx_eq(bb.maxs.x, 2.0, 1e-12));
}

#[test]
fn smooth_loft_of_linear_taper_matches_ruled() {
    let sections = [
        ring(0.0, 1.0, 12),
        ring(1.0, 1.5, 12),
        ring(2.0, 2.0, 12),
    ];
    let ruled: Mesh<()> = Mesh::loft(&sections, &RULED, None).unwrap();
    let smooth: Mesh<()> = Mesh::loft(&sections, &LoftOptions::default(), None).unwrap();

    assert!(smooth.polygons.len() > ruled.polygons.len());
    assert!(smooth.is_manifold());
    assert_relative_eq!(smooth.signed_volume(), ruled.signed_volume(), epsilon = 1e-9);
}

#[test]
fn smooth_loft_bulges_between_sections() {
    // Narrow, wide, narrow: the spline overshoots the straight rails
    let sections = [ring(0.0, 1.0, 12), ring(2.0, 3.0, 12), ring(4.0, 1.0, 12)];
    let ruled: Mesh<()> = Mesh::loft(&sections, &RULED, None).unwrap();
    let smooth: Mesh<()> = Mesh::loft(&sections, &LoftOptions::default(), None).unwrap();

    assert!(smooth.signed_volume() > ruled.signed_volume());
    // Sections themselves are interpolated exactly
    assert!(approx_eq(smooth.bounding_box().maxs.x, 3.0, 1e-9));
}

#[test]
fn sections_in_any_direction_or_winding_face_outward() {
    let downward = [ring(0.0, 2.0, 10), ring(-4.0, 1.0, 10)];
    let loft: Mesh<()> = Mesh::loft(&downward, &RULED, None).unwrap();
    assert!(loft.signed_volume() > 0.0);
    assert!(loft.is_manifold());

    let clockwise: Vec<Section> = [ring(0.0, 1.0, 10), ring(2.0, 1.0, 10)]
        .iter()
        .map(|s| Section::new(s.points().iter().rev().copied().collect()))
        .collect();
    let loft: Mesh<()> = Mesh::loft(&clockwise, &LoftOptions::default(), None).unwrap();
    assert!(loft.signed_volume() > 0.0);
    for poly in &loft.polygons {
        let v = poly.vertices[0].pos;
        let radial = Point3::new(v.x, v.y, 0.0).coords;
        // Side faces point away from the axis
        if poly.plane.normal().z.abs() < 1e-9 {
            assert!(poly.plane.normal().dot(&radial) > 0.0);
        }
    }
}

#[test]
fn mixed_winding_sections_are_aligned() {
    let ccw = [ring(0.0, 1.0, 16), ring(3.0, 2.0, 16)];
    let same: Mesh<()> = Mesh::loft(&ccw, &RULED, None).unwrap();

    // Second ring clockwise, still starting on +X
    let top = ccw[1].points();
    let clockwise = Section::new(
        std::iter::once(top[0])
            .chain(top[1..].iter().rev().copied())
            .collect(),
    );
    let mixed: Mesh<()> = Mesh::loft(&[ccw[0].clone(), clockwise], &RULED, None).unwrap();

    assert!(mixed.is_manifold());
    assert_relative_eq!(mixed.signed_volume(), same.signed_volume(), epsilon = 1e-9);
    assert_relative_eq!(
        mixed.signed_volume(),
        ngon_frustum_volume(1.0, 2.0, 3.0, 16),
        epsilon = 1e-9
    );
}

#[test]
fn wavy_section_radius_oscillates() {
    let wavy = Section::wavy_circle(Point3::new(0.0, 0.0, 5.0), 10.0, 2.0, 6, 64).unwrap();
    assert_eq!(wavy.len(), 64);

    let radii: Vec<Real> = wavy
        .points()
        .iter()
        .map(|p| (p.x * p.x + p.y * p.y).sqrt())
        .collect();
    assert!(radii.iter().all(|r| (8.0 - 1e-9..=12.0 + 1e-9).contains(r)));
    assert!(radii.iter().any(|r| *r > 11.9));
    assert!(radii.iter().any(|r| *r < 8.1));
    assert!(wavy.points().iter().all(|p| p.z == 5.0));
    // First point sits on +X where the wave crosses zero
    assert!(approx_eq(wavy.points()[0].x, 10.0, 1e-12));
}

#[test]
fn wavy_end_section_is_kept_exactly() {
    let hem = Section::wavy_circle(Point3::new(0.0, 0.0, 4.0), 5.0, 1.0, 5, 40).unwrap();
    let sections = [ring(0.0, 2.0, 40), ring(2.0, 3.5, 40), hem.clone()];
    let loft: Mesh<()> = Mesh::loft(&sections, &LoftOptions::default(), None).unwrap();

    assert!(loft.is_manifold());
    assert!(loft.signed_volume() > 0.0);
    let vertices = loft.vertices();
    for p in hem.points() {
        assert!(
            vertices.iter().any(|v| (v.pos - p).norm() < 1e-9),
            "hem point {p:?} missing"
        );
    }
}

#[test]
fn open_loft_has_no_caps() {
    let sections = [ring(0.0, 1.0, 8), ring(1.0, 1.0, 8)];
    let options = LoftOptions {
        solid: false,
        ..RULED
    };
    let skin: Mesh<()> = Mesh::loft(&sections, &options, None).unwrap();

    assert_eq!(skin.polygons.len(), 8 * 2);
    assert!(!skin.is_manifold());
    assert_eq!(skin.open_edge_count(), 16);
}

#[test]
fn loft_rejects_bad_sections() {
    let opts = LoftOptions::default();

    assert_eq!(
        Mesh::<()>::loft(&[ring(0.0, 1.0, 8)], &opts, None).unwrap_err(),
        GeometryError::TooFewSections(1)
    );
    assert_eq!(
        Mesh::<()>::loft(&[ring(0.0, 1.0, 8), ring(1.0, 1.0, 6)], &opts, None).unwrap_err(),
        GeometryError::MismatchedSections {
            index: 1,
            expected: 8,
            found: 6
        }
    );

    let collinear = Section::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ]);
    let triangle = Section::new(vec![
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ]);
    assert_eq!(
        Mesh::<()>::loft(&[collinear, triangle.clone()], &opts, None).unwrap_err(),
        GeometryError::DegenerateSection(0)
    );

    let pair = Section::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
    assert_eq!(
        Mesh::<()>::loft(&[triangle.clone(), pair], &opts, None).unwrap_err(),
        GeometryError::SectionTooSmall {
            index: 1,
            points: 2
        }
    );

    assert!(matches!(
        Mesh::<()>::loft(&[triangle.clone(), triangle], &opts, None),
        Err(GeometryError::InvalidParameters(_))
    ));
}

#[test]
fn section_constructors_validate() {
    assert!(matches!(
        Section::circle(Point3::origin(), 0.0, 8),
        Err(GeometryError::NonPositive { .. })
    ));
    assert!(matches!(
        Section::circle(Point3::origin(), 1.0, 2),
        Err(GeometryError::TooFewSegments { .. })
    ));
    assert!(matches!(
        Section::wavy_circle(Point3::origin(), 1.0, 1.0, 3, 16),
        Err(GeometryError::InvalidParameters(_))
    ));
}
