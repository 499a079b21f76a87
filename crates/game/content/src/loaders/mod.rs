//! Content loaders for reading game data from files.
//!
//! Each loader has a `load(path)` entry point and a `parse(text)` twin so
//! that content embedded in tests or tools skips the filesystem.

pub mod config;
pub mod map;
pub mod weapons;

pub use config::ConfigLoader;
pub use map::MapLoader;
pub use weapons::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
