//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{InspectMap, Path, Zone};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for tactics maps and rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Summarize a map file: cells per layer, terrain, edges, links
    InspectMap(InspectMap),

    /// Find the cheapest path between two cells
    Path(Path),

    /// List every cell reachable within a movement budget
    Zone(Zone),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::InspectMap(cmd) => cmd.execute(),
        Command::Path(cmd) => cmd.execute(),
        Command::Zone(cmd) => cmd.execute(),
    }
}
