//! Find the cheapest path between two cells of a map file.

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::Pathfinder;

use crate::utils::{MapArgs, ProfileArgs, parse_coord};

/// Find the cheapest path between two cells
#[derive(Parser)]
pub struct Path {
    #[command(flatten)]
    map: MapArgs,

    /// Start cell as x,y,z
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    from: String,

    /// Goal cell as x,y,z
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    to: String,

    #[command(flatten)]
    profile: ProfileArgs,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Path {
    pub fn execute(self) -> Result<()> {
        let (grid, config) = self.map.load()?;
        let start = parse_coord(&self.from)?;
        let goal = parse_coord(&self.to)?;
        let profile = self.profile.profile();

        let mut pathfinder = Pathfinder::new(config.rules);
        let Some(path) = pathfinder.find_path(&grid, start, goal, &profile) else {
            if self.json {
                println!("null");
            } else {
                println!("{} {} -> {}", style("No path:").bold().red(), start, goal);
            }
            return Ok(());
        };

        if self.json {
            let json = serde_json::json!({
                "cost_feet": path.cost_feet,
                "cells": path.cells,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
            return Ok(());
        }

        println!(
            "{} {} -> {}",
            style("Path:").bold().green(),
            start,
            goal
        );
        println!("  Steps: {}", path.steps());
        println!("  Cost: {} ft", path.cost_feet);
        let strides = path.cost_feet.div_ceil(profile.speed_feet.max(1));
        println!("  Strides at {} ft: {}", profile.speed_feet, strides);
        println!();
        for (index, cell) in path.cells.iter().enumerate() {
            println!("  {:>3}  {}", index, cell);
        }
        Ok(())
    }
}
