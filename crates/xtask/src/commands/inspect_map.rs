//! Summarize a map file.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::GridStore;

use crate::utils::MapArgs;

/// Summarize a map file
#[derive(Parser)]
pub struct InspectMap {
    #[command(flatten)]
    map: MapArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Counts per layer, terrain, edge kind, and link kind
    Summary,
    /// Pretty-printed debug format of the whole store
    Debug,
}

impl InspectMap {
    pub fn execute(self) -> Result<()> {
        let (grid, config) = self.map.load()?;

        println!(
            "{} {}",
            style("Map File:").bold().cyan(),
            self.map.map.display()
        );
        println!(
            "{} {} ft cells, {} ft layers, {}-cell chunks",
            style("Grid:").bold().cyan(),
            grid.config().cell_size_feet,
            grid.config().elevation_step_feet,
            grid.config().chunk_size
        );
        println!(
            "{} {} ft cardinal, {}/{} ft diagonals",
            style("Rules:").bold().cyan(),
            config.rules.cardinal_cost,
            config.rules.diagonal_cost,
            config.rules.diagonal_alternate_cost
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&grid),
            OutputFormat::Debug => println!("{:#?}", grid),
        }
        Ok(())
    }
}

fn print_summary(grid: &GridStore) {
    println!("{}", style("=== Map Summary ===").bold().green());
    println!();

    let mut layers: BTreeMap<i32, usize> = BTreeMap::new();
    let mut terrain: BTreeMap<String, usize> = BTreeMap::new();
    let mut blocked = 0;
    for (coord, cell) in grid.cells() {
        *layers.entry(coord.y).or_default() += 1;
        *terrain.entry(cell.terrain().to_string()).or_default() += 1;
        if !cell.is_walkable() {
            blocked += 1;
        }
    }

    println!("{}", style("Cells:").bold().yellow());
    println!("  Total: {}", grid.cell_count());
    println!("  Not walkable: {}", blocked);
    for (elevation, count) in &layers {
        println!("  Layer {}: {}", elevation, count);
    }
    println!();

    println!("{}", style("Terrain:").bold().yellow());
    for (kind, count) in &terrain {
        println!("  {}: {}", kind, count);
    }
    println!();

    let mut edges: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for (_, edge) in grid.edges() {
        let entry = edges.entry(edge.kind.to_string()).or_default();
        entry.0 += 1;
        if edge.blocks_movement {
            entry.1 += 1;
        }
    }
    println!("{}", style("Edges:").bold().yellow());
    for (kind, (total, blocking)) in &edges {
        println!("  {}: {} ({} block movement)", kind, total, blocking);
    }
    println!();

    println!("{}", style("Vertical Links:").bold().yellow());
    for link in grid.vertical_links() {
        println!(
            "  {} {} <-> {} ({} ft)",
            link.kind, link.lower, link.upper, link.cost_feet
        );
    }
    println!();
}
