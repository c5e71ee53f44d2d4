//! Validation and runtime errors

use crate::float_types::Real;
use std::path::PathBuf;

/// Problems detected while constructing geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A length-like parameter (radius, height, ...) is zero, negative or not finite
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: Real },

    /// A tessellation count is below the minimum the shape needs
    #[error("{name} must be at least {min}, got {value}")]
    TooFewSegments {
        name: &'static str,
        min: usize,
        value: usize,
    },

    /// Loft needs at least two sections to connect
    #[error("loft requires at least 2 sections, got {0}")]
    TooFewSections(usize),

    /// A section ring has fewer than three points
    #[error("section {index} has {points} points, at least 3 are required")]
    SectionTooSmall { index: usize, points: usize },

    /// Sections must share a point count so that rails can be matched
    #[error("section {index} has {found} points but section 0 has {expected}")]
    MismatchedSections {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A section ring encloses no area (collinear or coincident points)
    #[error("section {0} is degenerate: its points do not span a plane")]
    DegenerateSection(usize),

    /// A parameter combination that cannot produce a valid solid
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Everything that can stop a `banshee` run
#[derive(Debug, thiserror::Error)]
pub enum BansheeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse parameter file {path}: {source}")]
    Params {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("viewer failed: {0}")]
    Viewer(String),
}

impl GeometryError {
    /// `Ok` when `value` is finite and strictly positive.
    pub fn check_positive(name: &'static str, value: Real) -> Result<(), GeometryError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(GeometryError::NonPositive { name, value })
        }
    }

    /// `Ok` when `value >= min`.
    pub const fn check_segments(
        name: &'static str,
        min: usize,
        value: usize,
    ) -> Result<(), GeometryError> {
        if value >= min {
            Ok(())
        } else {
            Err(GeometryError::TooFewSegments { name, min, value })
        }
    }
}
