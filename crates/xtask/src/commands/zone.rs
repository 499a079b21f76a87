//! List every cell reachable within a movement budget.
//!
//! The layer containing the origin is also drawn as a cost map.

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::{CellCoord, GridStore, MovementZone, Pathfinder};

use crate::utils::{MapArgs, ProfileArgs, parse_coord};

/// List every cell reachable within a movement budget
#[derive(Parser)]
pub struct Zone {
    #[command(flatten)]
    map: MapArgs,

    /// Origin cell as x,y,z
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    from: String,

    /// Budget in actions spent on Strides
    #[arg(long, default_value_t = 1)]
    actions: u8,

    /// Budget in feet, overriding --actions
    #[arg(long, value_name = "FEET")]
    budget: Option<u32>,

    #[command(flatten)]
    profile: ProfileArgs,

    /// Skip the cost map and print one line per cell
    #[arg(long)]
    list: bool,
}

impl Zone {
    pub fn execute(self) -> Result<()> {
        let (grid, config) = self.map.load()?;
        let origin = parse_coord(&self.from)?;
        let profile = self.profile.profile();
        let budget = self
            .budget
            .unwrap_or_else(|| profile.budget_for_actions(self.actions));

        let mut pathfinder = Pathfinder::new(config.rules);
        let zone = pathfinder.movement_zone(&grid, origin, &profile, budget);

        println!(
            "{} {} within {} ft ({} cells)",
            style("Zone:").bold().green(),
            origin,
            budget,
            zone.len()
        );
        println!();

        if self.list {
            print_list(&zone, profile.speed_feet);
        } else {
            print_layer(&grid, &zone);
        }
        Ok(())
    }
}

fn print_list(zone: &MovementZone, speed_feet: u32) {
    let mut cells: Vec<(CellCoord, u32)> = zone.cells().collect();
    cells.sort_by_key(|&(cell, cost)| (cost, cell.y, cell.z, cell.x));
    for (cell, cost) in cells {
        let actions = zone
            .actions_required(cell, speed_feet)
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        println!("  {:<16} {:>4} ft  {} action(s)", cell.to_string(), cost, actions);
    }
}

/// Draws the origin's layer: cost in feet for reachable cells, `.` for
/// unreachable floor, blank for missing cells.
fn print_layer(grid: &GridStore, zone: &MovementZone) {
    let elevation = zone.origin().y;
    let layer: Vec<CellCoord> = grid
        .cells()
        .map(|(coord, _)| coord)
        .filter(|coord| coord.y == elevation)
        .collect();
    let Some(min_x) = layer.iter().map(|c| c.x).min() else {
        println!("  (layer {} is empty)", elevation);
        return;
    };
    let max_x = layer.iter().map(|c| c.x).max().unwrap_or(min_x);
    let min_z = layer.iter().map(|c| c.z).min().unwrap_or(0);
    let max_z = layer.iter().map(|c| c.z).max().unwrap_or(min_z);

    for z in min_z..=max_z {
        let row: String = (min_x..=max_x)
            .map(|x| {
                let cell = CellCoord::new(x, elevation, z);
                if cell == zone.origin() {
                    format!("   {}", style("@").bold().cyan())
                } else if let Some(cost) = zone.cost_to(cell) {
                    format!("{:>4}", cost)
                } else if grid.has_cell(cell) {
                    format!("{:>4}", ".")
                } else {
                    "    ".to_string()
                }
            })
            .collect();
        println!("{}", row);
    }
}
