//! Rules configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Missing tables and keys fall back to the defaults, so a file only needs
/// to name what it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded rules config");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GameConfig) -> LoadResult<()> {
    if config.grid.cell_size_feet == 0 {
        anyhow::bail!("grid.cell_size_feet must be positive");
    }
    if config.grid.chunk_size == 0 {
        anyhow::bail!("grid.chunk_size must be positive");
    }
    if config.rules.cardinal_cost == 0 {
        anyhow::bail!("rules.cardinal_cost must be positive");
    }
    Ok(())
}
