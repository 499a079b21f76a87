//! Grid storage: cells, edges, and vertical links.
//!
//! The grid is closed-world: a coordinate with no stored cell is impassable.
//! [`GridStore`] is the only writer and versions every change so that the
//! pathfinder's zone cache can detect staleness cheaply.
mod cell;
mod coord;
mod edge;
mod link;
mod store;

pub use cell::{Cell, CellFlags, TerrainKind};
pub use coord::{CellCoord, ChunkCoord, distance_feet};
pub use edge::{Edge, EdgeKey, EdgeKind};
pub use link::{LinkKind, VerticalLink};
pub use store::GridStore;
