// main.rs
//
// Build the banshee figure, export it to STL, then show it.

use banshee::BansheeError;
use banshee::config::{Cli, RunConfig};
use banshee::display::display;
use banshee::ghost::{GhostReport, build_ghost};
use clap::Parser;

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banshee=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BansheeError> {
    let config = RunConfig::try_from(cli)?;

    let ghost = build_ghost(&config.params)?;
    let report = GhostReport::new(&ghost);
    tracing::info!("{report}");
    if !report.is_manifold() {
        tracing::warn!(
            open_edges = report.open_edges,
            "mesh is not edge-manifold, slicers may need to repair it"
        );
    }

    ghost.write_stl(&config.output, &config.solid_name, config.format)?;
    println!("✔ Exported {}", config.output.display());

    let outcome = display(&ghost, &config)?;
    tracing::debug!(?outcome, "display stage finished");
    Ok(())
}
