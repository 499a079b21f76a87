//! Shortest paths and movement zones over the grid.
//!
//! Both searches run over `(cell, diagonal parity)` states because the cost of
//! the next diagonal depends on how many diagonals the path has already taken.
//! A [`Pathfinder`] owns its scratch buffers and reuses them between calls; it
//! takes `&mut self` for every query and is therefore never re-entered.
mod astar;
mod heap;
mod heuristic;
mod neighbors;
mod zone;

use std::collections::{HashMap, HashSet};

pub use heap::MinHeap;
pub use heuristic::{GoalEstimate, heuristic};
pub use neighbors::{Step, is_passable, neighbors};
pub use zone::MovementZone;

use crate::config::RuleConstants;
use crate::grid::CellCoord;
use crate::movement::{DiagonalParity, MovementCostEvaluator, MovementProfile};

/// Search node: a cell plus the parity of diagonals taken to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchState {
    pub cell: CellCoord,
    pub parity: DiagonalParity,
}

impl SearchState {
    pub fn start(cell: CellCoord) -> Self {
        Self {
            cell,
            parity: DiagonalParity::Even,
        }
    }
}

/// A path from start to goal, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<CellCoord>,
    pub cost_feet: u32,
}

impl Path {
    pub fn start(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    pub fn destination(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Number of steps (cells minus one).
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ZoneCacheKey {
    grid_version: u64,
    origin: CellCoord,
    profile: MovementProfile,
    budget_feet: u32,
}

/// Reusable path and zone search engine.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    evaluator: MovementCostEvaluator,
    open: MinHeap<astar::OpenEntry>,
    frontier: MinHeap<(u32, SearchState)>,
    g_score: HashMap<SearchState, u32>,
    came_from: HashMap<SearchState, SearchState>,
    closed: HashSet<SearchState>,
    estimate: GoalEstimate,
    zone_cache: Option<(ZoneCacheKey, MovementZone)>,
}

impl Pathfinder {
    pub fn new(rules: RuleConstants) -> Self {
        Self::with_evaluator(MovementCostEvaluator::new(rules))
    }

    pub fn with_evaluator(evaluator: MovementCostEvaluator) -> Self {
        Self {
            evaluator,
            ..Self::default()
        }
    }

    pub fn evaluator(&self) -> &MovementCostEvaluator {
        &self.evaluator
    }

    /// Drops the cached movement zone.
    pub fn invalidate_zone_cache(&mut self) {
        self.zone_cache = None;
    }

    fn reset_buffers(&mut self) {
        self.open.clear();
        self.frontier.clear();
        self.g_score.clear();
        self.came_from.clear();
        self.closed.clear();
    }
}
