//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use tactics_content::{ConfigLoader, MapLoader};
use tactics_core::{CellCoord, GameConfig, GridStore, MovementMode, MovementProfile};

/// Parse a cell coordinate written as `x,y,z`.
pub fn parse_coord(text: &str) -> Result<CellCoord> {
    let parts = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid coordinate '{}'", text))?;
    match parts.as_slice() {
        [x, y, z] => Ok(CellCoord::new(*x, *y, *z)),
        _ => Err(anyhow!("Coordinate '{}' must have the form x,y,z", text)),
    }
}

fn parse_mode(text: &str) -> Result<MovementMode, String> {
    text.parse()
        .map_err(|_| format!("unknown movement mode '{}' (walk, fly, swim, climb)", text))
}

/// Map file plus the optional rules config it should be read with.
#[derive(Args)]
pub struct MapArgs {
    /// Map layout (RON)
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Rules configuration (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl MapArgs {
    pub fn load(&self) -> Result<(GridStore, GameConfig)> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };
        let grid = MapLoader::load(&self.map)
            .with_context(|| format!("Failed to load map: {}", self.map.display()))?;
        warn_on_grid_mismatch(&self.map, &grid, &config);
        Ok((grid, config))
    }
}

fn warn_on_grid_mismatch(map: &Path, grid: &GridStore, config: &GameConfig) {
    if *grid.config() != config.grid {
        tracing::warn!(
            map = %map.display(),
            "map grid settings differ from the rules config; the map's settings are used"
        );
    }
}

/// How the mover moves.
#[derive(Args)]
pub struct ProfileArgs {
    /// Movement mode: walk, fly, swim, climb
    #[arg(long, default_value = "walk", value_parser = parse_mode)]
    pub mode: MovementMode,

    /// Speed in feet per Stride
    #[arg(long, default_value_t = MovementProfile::DEFAULT_SPEED_FEET)]
    pub speed: u32,

    /// Footprint edge length in cells
    #[arg(long, default_value_t = 1)]
    pub footprint: u8,

    /// Treat difficult terrain as normal
    #[arg(long)]
    pub ignore_difficult: bool,
}

impl ProfileArgs {
    pub fn profile(&self) -> MovementProfile {
        let profile = MovementProfile::walking(self.speed)
            .with_mode(self.mode)
            .with_footprint(self.footprint);
        if self.ignore_difficult {
            profile.ignoring_difficult_terrain()
        } else {
            profile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        assert_eq!(parse_coord("1, -2,3").unwrap(), CellCoord::new(1, -2, 3));
        assert!(parse_coord("1,2").is_err());
        assert!(parse_coord("a,b,c").is_err());
    }
}
