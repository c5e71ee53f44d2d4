//! Last stage of a run: show the exported figure.

use crate::config::RunConfig;
use crate::errors::BansheeError;
use crate::ghost::Part;
use crate::mesh::Mesh;

/// What the display stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// A viewer window was opened and has been closed again
    Shown,
    /// `--no-display` was given
    Disabled,
    /// The crate was built without the `viewer` feature
    Unavailable,
}

/// Show `mesh` unless the run asked not to; every skip is logged.
pub fn display(mesh: &Mesh<Part>, config: &RunConfig) -> Result<DisplayOutcome, BansheeError> {
    if !config.display {
        tracing::info!("display disabled, skipping viewer");
        return Ok(DisplayOutcome::Disabled);
    }
    open_viewer(mesh, config)
}

#[cfg(feature = "viewer")]
fn open_viewer(mesh: &Mesh<Part>, config: &RunConfig) -> Result<DisplayOutcome, BansheeError> {
    use crate::viewer::{ViewStyle, show};

    let style = ViewStyle {
        color: config.params.color,
        transparency: config.params.transparency,
    };
    show(mesh, &config.solid_name, style)?;
    Ok(DisplayOutcome::Shown)
}

#[cfg(not(feature = "viewer"))]
fn open_viewer(_mesh: &Mesh<Part>, _config: &RunConfig) -> Result<DisplayOutcome, BansheeError> {
    tracing::warn!("built without the `viewer` feature, skipping display");
    Ok(DisplayOutcome::Unavailable)
}
