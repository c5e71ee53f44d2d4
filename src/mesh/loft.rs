//! Loft: a solid (or open skin) through a sequence of closed cross-sections.
//!
//! Sections are closed rings with the same number of points; point `k` of each
//! section lies on rail `k`. Between two sections the skin is either ruled
//! (straight rails) or follows a Catmull-Rom spline through all sections.

use crate::errors::GeometryError;
use crate::float_types::{Real, TAU, tolerance};
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// A closed ring of points, the cross-section of a loft.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    points: Vec<Point3<Real>>,
}

impl Section {
    /// Build a section from an ordered ring of points.
    ///
    /// A trailing point equal to the first one (an explicitly closed ring) is dropped.
    pub fn new(mut points: Vec<Point3<Real>>) -> Self {
        if points.len() > 3 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if (first - last).norm() <= tolerance() {
                    points.pop();
                }
            }
        }
        Section { points }
    }

    /// Circle of `radius` around `center` in the plane `z = center.z`,
    /// sampled counter-clockwise (seen from +Z) starting on +X.
    pub fn circle(
        center: Point3<Real>,
        radius: Real,
        segments: usize,
    ) -> Result<Self, GeometryError> {
        Self::wavy_circle(center, radius, 0.0, 0, segments)
    }

    /// Circle whose radius oscillates: `r(θ) = radius + amplitude · sin(frequency · θ)`.
    pub fn wavy_circle(
        center: Point3<Real>,
        radius: Real,
        amplitude: Real,
        frequency: u32,
        segments: usize,
    ) -> Result<Self, GeometryError> {
        GeometryError::check_positive("section radius", radius)?;
        GeometryError::check_segments("section points", 3, segments)?;
        if !amplitude.is_finite() || amplitude.abs() >= radius {
            return Err(GeometryError::InvalidParameters(format!(
                "wave amplitude {amplitude} must be smaller than the radius {radius}"
            )));
        }

        let points = (0..segments)
            .map(|k| {
                let theta = TAU * k as Real / segments as Real;
                let r = radius + amplitude * (frequency as Real * theta).sin();
                Point3::new(
                    center.x + r * theta.cos(),
                    center.y + r * theta.sin(),
                    center.z,
                )
            })
            .collect();

        Ok(Section { points })
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The same ring traversed the other way round, starting at the same point.
    pub fn rewound(&self) -> Section {
        let mut points = self.points.clone();
        if let Some(tail) = points.get_mut(1..) {
            tail.reverse();
        }
        Section { points }
    }

    /// Plane of best fit, oriented by the ring's winding.
    pub fn plane(&self) -> Option<Plane> {
        Plane::from_points(&self.points)
    }

    /// Average of the ring's points.
    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.points.len().max(1) as Real)
    }
}

/// How a loft connects its sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoftOptions {
    /// Close both ends with planar caps.
    pub solid: bool,
    /// Straight rails between sections instead of a smooth spline.
    pub ruled: bool,
    /// Rings inserted between adjacent sections when not ruled.
    pub subdivisions: usize,
}

impl Default for LoftOptions {
    fn default() -> Self {
        Self {
            solid: true,
            ruled: false,
            subdivisions: 2,
        }
    }
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2`.
fn catmull_rom(
    p0: &Point3<Real>,
    p1: &Point3<Real>,
    p2: &Point3<Real>,
    p3: &Point3<Real>,
    t: Real,
) -> Point3<Real> {
    let (p0, p1, p2, p3) = (p0.coords, p1.coords, p2.coords, p3.coords);
    let t2 = t * t;
    let t3 = t2 * t;
    Point3::from(
        (p1 * 2.0
            + (p2 - p0) * t
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
            * 0.5,
    )
}

/// Rings of the loft skin: the sections themselves, plus spline rings between them.
fn interpolate_rings(sections: &[Section], options: &LoftOptions) -> Vec<Vec<Point3<Real>>> {
    if options.ruled || options.subdivisions == 0 {
        return sections.iter().map(|s| s.points.clone()).collect();
    }

    let n = sections.len();
    let width = sections[0].len();
    // Phantom end sections, reflected so the spline leaves each end in a straight line
    let phantom = |a: &Section, b: &Section| -> Vec<Point3<Real>> {
        a.points
            .iter()
            .zip(&b.points)
            .map(|(pa, pb)| pa + (pa - pb))
            .collect()
    };
    let before = phantom(&sections[0], &sections[1]);
    let after = phantom(&sections[n - 1], &sections[n - 2]);
    let mut controls: Vec<&[Point3<Real>]> = Vec::with_capacity(n + 2);
    controls.push(&before);
    controls.extend(sections.iter().map(|s| s.points.as_slice()));
    controls.push(&after);

    let mut rings = Vec::with_capacity(n + (n - 1) * options.subdivisions);
    for s in 0..n - 1 {
        rings.push(sections[s].points.clone());
        let (r0, r1, r2, r3) = (controls[s], controls[s + 1], controls[s + 2], controls[s + 3]);
        for step in 1..=options.subdivisions {
            let t = step as Real / (options.subdivisions + 1) as Real;
            rings.push(
                (0..width)
                    .map(|k| catmull_rom(&r0[k], &r1[k], &r2[k], &r3[k], t))
                    .collect(),
            );
        }
    }
    rings.push(sections[n - 1].points.clone());
    rings
}

/// Triangulate a planar ring with ear clipping, facing `outward`.
fn cap_triangles<S: Clone + Send + Sync>(
    ring: &[Point3<Real>],
    plane: &Plane,
    outward: &Vector3<Real>,
    metadata: &Option<S>,
) -> Vec<Polygon<S>> {
    let normal = plane.normal();
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    let origin = ring[0];

    let coords: Vec<Coord<Real>> = ring
        .iter()
        .map(|p| {
            let d = p - origin;
            Coord {
                x: d.dot(&u),
                y: d.dot(&v),
            }
        })
        .collect();
    let triangulation = GeoPolygon::new(LineString::new(coords), vec![]).earcut_triangles_raw();

    triangulation
        .triangle_indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let mut pts = [
                ring[tri[0] % ring.len()],
                ring[tri[1] % ring.len()],
                ring[tri[2] % ring.len()],
            ];
            if (pts[1] - pts[0]).cross(&(pts[2] - pts[0])).dot(outward) < 0.0 {
                pts.swap(1, 2);
            }
            Polygon::triangle(pts, metadata.clone())
        })
        .collect()
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Loft through `sections` in order.
    ///
    /// All sections need the same number of points (at least three) and must
    /// enclose an area. Each ring wound clockwise with respect to the loft
    /// direction is reversed, keeping its first point, so that every face points
    /// outward and rail `k` still starts at point `k` of the first section. When `options.solid` is
    /// set both ends are capped (non-convex sections are fine) and the result
    /// has positive [`signed_volume`](Mesh::signed_volume).
    pub fn loft(
        sections: &[Section],
        options: &LoftOptions,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, GeometryError> {
        if sections.len() < 2 {
            return Err(GeometryError::TooFewSections(sections.len()));
        }
        let expected = sections[0].len();
        let mut planes = Vec::with_capacity(sections.len());
        for (index, section) in sections.iter().enumerate() {
            if section.len() < 3 {
                return Err(GeometryError::SectionTooSmall {
                    index,
                    points: section.len(),
                });
            }
            if section.len() != expected {
                return Err(GeometryError::MismatchedSections {
                    index,
                    expected,
                    found: section.len(),
                });
            }
            planes.push(section.plane().ok_or(GeometryError::DegenerateSection(index))?);
        }

        let first = sections[0].centroid();
        let last = sections[sections.len() - 1].centroid();
        let direction = last - first;
        if direction.norm() <= tolerance() {
            return Err(GeometryError::InvalidParameters(
                "loft sections start and end at the same place".to_string(),
            ));
        }

        let mut reversed = 0;
        let oriented: Vec<Section> = sections
            .iter()
            .zip(&planes)
            .map(|(section, plane)| {
                if plane.normal().dot(&direction) < 0.0 {
                    reversed += 1;
                    section.rewound()
                } else {
                    section.clone()
                }
            })
            .collect();
        let rings = interpolate_rings(&oriented, options);

        let width = expected;
        let mut polygons = Vec::with_capacity(2 * width * rings.len());
        for pair in rings.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for k in 0..width {
                let next = (k + 1) % width;
                polygons.extend(Polygon::triangle([a[k], a[next], b[next]], metadata.clone()));
                polygons.extend(Polygon::triangle([a[k], b[next], b[k]], metadata.clone()));
            }
        }

        let mut mesh = if options.solid {
            let last_index = sections.len() - 1;
            polygons.extend(cap_triangles(
                &rings[0],
                &planes[0],
                &-direction,
                &metadata,
            ));
            polygons.extend(cap_triangles(
                &rings[rings.len() - 1],
                &planes[last_index],
                &direction,
                &metadata,
            ));

            let mesh = Mesh::from_polygons(polygons);
            if mesh.signed_volume() < 0.0 {
                tracing::debug!("loft came out inside-out, flipping");
                mesh.inverse()
            } else {
                mesh
            }
        } else {
            Mesh::from_polygons(polygons)
        };

        mesh.renormalize();
        tracing::debug!(
            sections = sections.len(),
            rings = rings.len(),
            polygons = mesh.polygons.len(),
            reversed,
            "loft"
        );
        Ok(mesh)
    }
}
