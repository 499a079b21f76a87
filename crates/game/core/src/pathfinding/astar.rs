use super::neighbors::{is_passable, neighbors};
use super::{Path, Pathfinder, SearchState};
use crate::env::OccupancyOracle;
use crate::grid::{CellCoord, GridStore};
use crate::movement::{MovementProfile, StepKind};
use crate::state::EntityId;

/// Open-set entry, ordered by `f`, then diagonal arrivals first, then `g`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct OpenEntry {
    f: u32,
    /// 0 for diagonal arrivals, 1 otherwise.
    arrival_rank: u8,
    g: u32,
    state: SearchState,
}

impl OpenEntry {
    fn new(g: u32, h: u32, arrival: Option<StepKind>, state: SearchState) -> Self {
        Self {
            f: g + h,
            arrival_rank: u8::from(!arrival.is_some_and(StepKind::is_diagonal)),
            g,
            state,
        }
    }
}

type Occupancy<'a> = Option<(&'a dyn OccupancyOracle, EntityId)>;

impl Pathfinder {
    /// Shortest path from `start` to `goal` for `profile`.
    ///
    /// Returns `None` when either end is impassable for the profile or no
    /// sequence of legal steps connects them.
    pub fn find_path(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
    ) -> Option<Path> {
        self.search(grid, start, goal, profile, None)
    }

    /// Like [`find_path`](Self::find_path), but every cell entered must be
    /// traversable for `mover` and the goal must be a legal stopping point.
    pub fn find_path_with_occupancy(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
        occupancy: &dyn OccupancyOracle,
        mover: EntityId,
    ) -> Option<Path> {
        self.search(grid, start, goal, profile, Some((occupancy, mover)))
    }

    fn search(
        &mut self,
        grid: &GridStore,
        start: CellCoord,
        goal: CellCoord,
        profile: &MovementProfile,
        occupancy: Occupancy<'_>,
    ) -> Option<Path> {
        if !is_passable(grid, profile, start) || !is_passable(grid, profile, goal) {
            tracing::debug!(%start, %goal, "path rejected: endpoint impassable");
            return None;
        }
        if let Some((oracle, mover)) = occupancy {
            if !oracle.can_stop(goal, mover) {
                tracing::debug!(%goal, %mover, "path rejected: goal is not a stopping point");
                return None;
            }
        }
        if start == goal {
            return Some(Path {
                cells: vec![start],
                cost_feet: 0,
            });
        }

        self.reset_buffers();
        self.estimate.prepare(&self.evaluator, grid, goal);
        let origin = SearchState::start(start);
        self.g_score.insert(origin, 0);
        let h = self.estimate.estimate(&self.evaluator, start, origin.parity);
        self.open.push(OpenEntry::new(0, h, None, origin));

        while !self.open.is_empty() {
            let entry = self.open.pop();
            let current = entry.state;
            // Stale entry; a cheaper route to this state was queued later.
            if self.g_score.get(&current).is_some_and(|&g| entry.g > g) {
                continue;
            }
            self.closed.insert(current);
            if current.cell == goal {
                let path = self.reconstruct(current, entry.g);
                tracing::debug!(
                    %start,
                    %goal,
                    cost = path.cost_feet,
                    expanded = self.closed.len(),
                    "path found"
                );
                return Some(path);
            }

            for step in neighbors(grid, profile, current.cell) {
                if occupancy.is_some_and(|(oracle, mover)| !oracle.can_traverse(step.to, mover)) {
                    continue;
                }
                let next = SearchState {
                    cell: step.to,
                    parity: current.parity.after(step.kind),
                };
                let Some(target) = grid.cell(step.to) else {
                    continue;
                };
                let g = entry.g
                    + self
                        .evaluator
                        .cost(target, step.kind, current.parity, profile);
                if self.g_score.get(&next).is_some_and(|&known| known <= g) {
                    continue;
                }
                self.g_score.insert(next, g);
                self.came_from.insert(next, current);
                let h = self.estimate.estimate(&self.evaluator, next.cell, next.parity);
                self.open.push(OpenEntry::new(g, h, Some(step.kind), next));
            }
        }

        tracing::debug!(%start, %goal, expanded = self.closed.len(), "no path");
        None
    }

    fn reconstruct(&self, goal: SearchState, cost_feet: u32) -> Path {
        let mut cells = vec![goal.cell];
        let mut current = goal;
        while let Some(&previous) = self.came_from.get(&current) {
            cells.push(previous.cell);
            current = previous;
        }
        cells.reverse();
        Path { cells, cost_feet }
    }
}
