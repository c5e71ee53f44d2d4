//! The banshee figure: a sphere head on a lofted, wavy-hemmed body with two
//! stubby cylinder arms.
//!
//! ```text
//!        z = -head_radius        head (sphere at the origin)
//!        z = 0                   neck ring, radius neck_radius
//!        ...                     num_sections - 1 circular rings
//!        z = 0.75 * body_height  arms (two cylinders each, along +Z)
//!        z = body_height         wavy hem, radius base_radius ± wave_amp
//! ```

use crate::errors::GeometryError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use crate::mesh::loft::{LoftOptions, Section};
use crate::traits::CSGOps;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the figure a polygon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Head,
    Body,
    Arm,
}

/// Which arm to build; `Left` sits on −X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn sign(self) -> Real {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// The parameter table of the figure.
///
/// Every field has a default, so a parameter file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostParams {
    pub head_radius: Real,
    pub body_height: Real,
    pub neck_radius: Real,
    pub base_radius: Real,
    pub wave_amp: Real,
    pub wave_freq: u32,
    pub seg_length: Real,
    pub arm_radius: Real,
    /// Body rings below the hem; the body has `num_sections + 1` sections.
    pub num_sections: usize,
    /// Points per body section.
    pub ring_points: usize,

    /// Display colour, RGB in `[0, 1]`.
    pub color: [Real; 3],
    /// Display transparency, `0` opaque to `1` invisible.
    pub transparency: Real,

    pub sphere_segments: usize,
    pub sphere_stacks: usize,
    pub arm_segments: usize,
    pub loft_ruled: bool,
    pub loft_subdivisions: usize,
}

impl Default for GhostParams {
    fn default() -> Self {
        Self {
            head_radius: 10.0,
            body_height: 40.0,
            neck_radius: 6.0,
            base_radius: 15.0,
            wave_amp: 2.0,
            wave_freq: 6,
            seg_length: 12.0,
            arm_radius: 2.0,
            num_sections: 12,
            ring_points: 64,
            color: [1.0, 1.0, 1.0],
            transparency: 0.5,
            sphere_segments: 48,
            sphere_stacks: 24,
            arm_segments: 32,
            loft_ruled: false,
            loft_subdivisions: 2,
        }
    }
}

impl GhostParams {
    /// Check every invariant the construction relies on.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("head_radius", self.head_radius),
            ("body_height", self.body_height),
            ("neck_radius", self.neck_radius),
            ("base_radius", self.base_radius),
            ("seg_length", self.seg_length),
            ("arm_radius", self.arm_radius),
        ] {
            GeometryError::check_positive(name, value)?;
        }

        GeometryError::check_segments("num_sections", 1, self.num_sections)?;
        GeometryError::check_segments("ring_points", 3, self.ring_points)?;
        GeometryError::check_segments("sphere_segments", 3, self.sphere_segments)?;
        GeometryError::check_segments("sphere_stacks", 2, self.sphere_stacks)?;
        GeometryError::check_segments("arm_segments", 3, self.arm_segments)?;

        if !self.wave_amp.is_finite() || self.wave_amp < 0.0 {
            return Err(GeometryError::InvalidParameters(format!(
                "wave_amp must be zero or positive, got {}",
                self.wave_amp
            )));
        }
        if self.wave_amp >= self.base_radius {
            return Err(GeometryError::InvalidParameters(format!(
                "wave_amp ({}) must be smaller than base_radius ({})",
                self.wave_amp, self.base_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(GeometryError::InvalidParameters(format!(
                "transparency must be in [0, 1], got {}",
                self.transparency
            )));
        }
        if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(GeometryError::InvalidParameters(format!(
                "color channels must be in [0, 1], got {:?}",
                self.color
            )));
        }
        Ok(())
    }

    /// X offset of both arm cylinders from the body axis.
    pub fn arm_offset(&self) -> Real {
        self.neck_radius + self.arm_radius
    }

    /// Height of the arm cylinders' bases.
    pub fn shoulder_height(&self) -> Real {
        self.body_height * 0.75
    }

    fn loft_options(&self) -> LoftOptions {
        LoftOptions {
            solid: true,
            ruled: self.loft_ruled,
            subdivisions: self.loft_subdivisions,
        }
    }
}

/// Sphere of `head_radius` centred at the origin.
pub fn build_head(params: &GhostParams) -> Result<Mesh<Part>, GeometryError> {
    Mesh::sphere(
        params.head_radius,
        params.sphere_segments,
        params.sphere_stacks,
        Some(Part::Head),
    )
}

/// Body cross-sections from the neck (z = 0) to the hem (z = body_height).
///
/// Radii grow linearly from `neck_radius` to `base_radius`; only the last
/// section carries the wave.
pub fn body_sections(params: &GhostParams) -> Result<Vec<Section>, GeometryError> {
    let n = params.num_sections;
    (0..=n)
        .map(|i| {
            let f = i as Real / n as Real;
            let center = Point3::new(0.0, 0.0, params.body_height * f);
            let radius = params.neck_radius + (params.base_radius - params.neck_radius) * f;
            if i == n {
                Section::wavy_circle(
                    center,
                    radius,
                    params.wave_amp,
                    params.wave_freq,
                    params.ring_points,
                )
            } else {
                Section::circle(center, radius, params.ring_points)
            }
        })
        .collect()
}

/// Solid loft through [`body_sections`].
pub fn build_body(params: &GhostParams) -> Result<Mesh<Part>, GeometryError> {
    let sections = body_sections(params)?;
    Mesh::loft(&sections, &params.loft_options(), Some(Part::Body))
}

/// One arm: an upper and a lower cylinder segment.
///
/// The upper segment starts at `(s·arm_offset, 0, shoulder_height)`, the lower
/// one at `(s·arm_offset, seg_length, shoulder_height)`; both run along +Z.
pub fn build_arm(params: &GhostParams, side: Side) -> Result<Mesh<Part>, GeometryError> {
    let segment = Mesh::cylinder(
        params.arm_radius,
        params.seg_length,
        params.arm_segments,
        Some(Part::Arm),
    )?;
    let x = side.sign() * params.arm_offset();
    let z = params.shoulder_height();

    let upper = segment.translate(x, 0.0, z);
    let lower = segment.translate(x, params.seg_length, z);
    Ok(upper.union(&lower))
}

/// Run the whole construction: head ∪ body, then each arm.
pub fn build_ghost(params: &GhostParams) -> Result<Mesh<Part>, GeometryError> {
    params.validate()?;

    let head = build_head(params)?;
    tracing::debug!(polygons = head.polygons.len(), "head built");

    let body = build_body(params)?;
    tracing::debug!(polygons = body.polygons.len(), "body lofted");

    let mut ghost = head.union(&body);
    tracing::info!(polygons = ghost.polygons.len(), "head and body joined");

    for side in [Side::Left, Side::Right] {
        let arm = build_arm(params, side)?;
        ghost = ghost.union(&arm);
        tracing::info!(?side, polygons = ghost.polygons.len(), "arm attached");
    }

    Ok(ghost)
}

/// Summary of a built figure, for logs and checks.
#[derive(Debug, Clone)]
pub struct GhostReport {
    pub polygons: usize,
    pub triangles: usize,
    pub bounds: Aabb,
    pub volume: Real,
    pub surface_area: Real,
    pub open_edges: usize,
    /// Polygons per part, in `Head`, `Body`, `Arm` order.
    pub part_polygons: [usize; 3],
}

impl GhostReport {
    pub fn new(mesh: &Mesh<Part>) -> Self {
        Self {
            polygons: mesh.polygons.len(),
            triangles: mesh.triangle_count(),
            bounds: mesh.bounding_box(),
            volume: mesh.volume(),
            surface_area: mesh.surface_area(),
            open_edges: mesh.open_edge_count(),
            part_polygons: [Part::Head, Part::Body, Part::Arm].map(|part| {
                mesh.polygons
                    .iter()
                    .filter(|p| p.metadata() == Some(&part))
                    .count()
            }),
        }
    }

    /// Every edge is shared by exactly two triangles.
    pub const fn is_manifold(&self) -> bool {
        self.open_edges == 0
    }
}

impl fmt::Display for GhostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = (self.bounds.mins, self.bounds.maxs);
        write!(
            f,
            "{} polygons ({} triangles), bounds [{:.2}, {:.2}, {:.2}]..[{:.2}, {:.2}, {:.2}], \
             volume {:.2}, area {:.2}, {} unmatched edges, \
             head/body/arm polygons {}/{}/{}",
            self.polygons,
            self.triangles,
            lo.x,
            lo.y,
            lo.z,
            hi.x,
            hi.y,
            hi.z,
            self.volume,
            self.surface_area,
            self.open_edges,
            self.part_polygons[0],
            self.part_polygons[1],
            self.part_polygons[2]
        )
    }
}
