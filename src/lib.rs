//! A procedural **ghost figure** ("banshee") built with Constructive Solid Geometry
//! on polygon meshes stored in [BSP](mesh::bsp) trees, and exported to STL.
//!
//! The kernel supplies the operations the figure needs: a UV [sphere](mesh::Mesh::sphere),
//! [cylinders](mesh::Mesh::cylinder), [lofting](mesh::Mesh::loft) through closed
//! cross-sections, Boolean [union](traits::CSGOps::union), and [STL](io::stl) export.
//! The [`ghost`] module strings them together.
//!
//! # Features
//! #### Default
//! - **viewer**: open an eframe window to inspect the result
//!
//! #### Optional
//! - **parallel**: use rayon for per-polygon transforms

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod display;
pub mod errors;
pub mod float_types;
pub mod ghost;
pub mod io;
pub mod mesh;
pub mod traits;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use errors::{BansheeError, GeometryError};
pub use mesh::Mesh;
pub use traits::CSGOps;
