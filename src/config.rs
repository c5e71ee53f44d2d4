//! Run configuration: command line flags plus an optional RON parameter file.

use crate::errors::BansheeError;
use crate::ghost::GhostParams;
use crate::io::StlFormat;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Build a procedural ghost, export it to STL and show it
#[derive(Debug, Clone, Parser)]
#[command(name = "banshee", version, long_about = None)]
pub struct Cli {
    /// Read figure parameters from a RON file (unset fields keep their defaults)
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Write the mesh to FILE
    #[arg(short, long, value_name = "FILE", default_value = "banshee.stl")]
    pub output: PathBuf,

    /// Solid name written into the STL
    #[arg(long, default_value = "banshee")]
    pub name: String,

    /// Write binary STL instead of ASCII
    #[arg(long)]
    pub binary: bool,

    /// Skip the viewer window
    #[arg(long)]
    pub no_display: bool,
}

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub params: GhostParams,
    pub output: PathBuf,
    pub solid_name: String,
    pub format: StlFormat,
    /// Open the viewer after export.
    pub display: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            params: GhostParams::default(),
            output: PathBuf::from("banshee.stl"),
            solid_name: "banshee".to_string(),
            format: StlFormat::Ascii,
            display: true,
        }
    }
}

impl TryFrom<Cli> for RunConfig {
    type Error = BansheeError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let params = match &cli.params {
            Some(path) => load_params(path)?,
            None => GhostParams::default(),
        };

        Ok(RunConfig {
            params,
            output: cli.output,
            solid_name: cli.name,
            format: if cli.binary {
                StlFormat::Binary
            } else {
                StlFormat::Ascii
            },
            display: !cli.no_display,
        })
    }
}

impl RunConfig {
    /// Parse command line arguments (without the program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, BansheeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = std::iter::once(OsString::from("banshee")).chain(args.into_iter().map(Into::into));
        Self::try_from(Cli::try_parse_from(argv)?)
    }
}

/// Parse a [`GhostParams`] from RON text; missing fields take their defaults.
pub fn parse_params(text: &str, origin: &Path) -> Result<GhostParams, BansheeError> {
    ron::from_str(text).map_err(|source| BansheeError::Params {
        path: origin.to_path_buf(),
        source,
    })
}

/// Read and parse a RON parameter file.
pub fn load_params(path: &Path) -> Result<GhostParams, BansheeError> {
    let text = std::fs::read_to_string(path)?;
    let params = parse_params(&text, path)?;
    tracing::debug!(path = %path.display(), "parameters loaded");
    Ok(params)
}
