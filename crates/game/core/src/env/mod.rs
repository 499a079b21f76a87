//! Collaborators injected into the core.
//!
//! Randomness and occupancy are supplied by the caller so that every result is
//! reproducible under a seeded or scripted substitute.
mod occupancy;
mod rng;

pub use occupancy::{NoOccupancy, OccupancyOracle};
pub use rng::{DiceRoller, PcgDice, ScriptedDice, compute_seed};
