//! Data-driven content for the tactics core.
//!
//! Loaders for RON/TOML data files:
//! - Rules configuration (TOML)
//! - Grid layouts: floors, terrain, edges, vertical links (RON)
//! - Weapon catalogs (RON)
//!
//! Loaded content is handed to `tactics-core` by value; the core never reads files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader, WeaponLoader};
