// Re-export parry for the f64 scalar
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Smallest meaningful difference between two `Real`s in this crate.
pub const EPSILON: Real = 1e-8;

/// Lazily-initialized tolerance used by plane classification and vertex welding.
/// Defaults to `1e-6`, but can be overridden:
///  1) **Build-time**: set env var `BANSHEE_TOLERANCE` (e.g. `BANSHEE_TOLERANCE=1e-5 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building any geometry
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_TOLERANCE: Real = 1e-6;

/// Returns the current tolerance.
/// If not set yet, it tries `BANSHEE_TOLERANCE` and falls back to `1e-6`.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided
        if let Some(environment_variable) = option_env!("BANSHEE_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Returns `false` when a tolerance was already in effect.
pub fn set_tolerance(value: Real) -> bool {
    TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok()
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
