use std::collections::HashMap;

use super::neighbors::neighbors;
use super::{Pathfinder, SearchState, ZoneCacheKey};
use crate::env::OccupancyOracle;
use crate::grid::{CellCoord, GridStore};
use crate::movement::MovementProfile;
use crate::state::EntityId;

/// Cells reachable from an origin within a feet budget, each with its minimum
/// cost over both diagonal parities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementZone {
    origin: CellCoord,
    budget_feet: u32,
    costs: HashMap<CellCoord, u32>,
}

impl MovementZone {
    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    pub fn budget_feet(&self) -> u32 {
        self.budget_feet
    }

    pub fn cost_to(&self, cell: CellCoord) -> Option<u32> {
        self.costs.get(&cell).copied()
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.costs.contains_key(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, u32)> + '_ {
        self.costs.iter().map(|(cell, cost)| (*cell, *cost))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Stride actions needed to reach `cell` at `speed_feet` per action.
    pub fn actions_required(&self, cell: CellCoord, speed_feet: u32) -> Option<u8> {
        let cost = self.cost_to(cell)?;
        if cost == 0 {
            return Some(0);
        }
        if speed_feet == 0 {
            return None;
        }
        u8::try_from(cost.div_ceil(speed_feet)).ok()
    }
}

impl Pathfinder {
    /// Every cell reachable from `origin` for at most `budget_feet`.
    ///
    /// The origin is always included at cost 0. The most recent result is
    /// cached by grid version, origin, profile, and budget.
    pub fn movement_zone(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget_feet: u32,
    ) -> MovementZone {
        let key = ZoneCacheKey {
            grid_version: grid.version(),
            origin,
            profile: *profile,
            budget_feet,
        };
        if let Some((cached_key, zone)) = &self.zone_cache {
            if *cached_key == key {
                tracing::debug!(%origin, budget_feet, "movement zone cache hit");
                return zone.clone();
            }
        }

        tracing::debug!(%origin, budget_feet, "movement zone cache miss");
        let zone = self.flood(grid, origin, profile, budget_feet, None);
        self.zone_cache = Some((key, zone.clone()));
        zone
    }

    /// Movement zone for `mover` given current occupancy.
    ///
    /// Expansion only crosses traversable cells and the result keeps only
    /// cells the mover can stop on (plus the origin). Never cached.
    pub fn movement_zone_with_occupancy(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget_feet: u32,
        occupancy: &dyn OccupancyOracle,
        mover: EntityId,
    ) -> MovementZone {
        let mut zone = self.flood(grid, origin, profile, budget_feet, Some((occupancy, mover)));
        zone.costs
            .retain(|&cell, _| cell == origin || occupancy.can_stop(cell, mover));
        zone
    }

    fn flood(
        &mut self,
        grid: &GridStore,
        origin: CellCoord,
        profile: &MovementProfile,
        budget_feet: u32,
        occupancy: Option<(&dyn OccupancyOracle, EntityId)>,
    ) -> MovementZone {
        self.reset_buffers();
        let start = SearchState::start(origin);
        self.g_score.insert(start, 0);
        self.frontier.push((0, start));

        while let Some((g, current)) = self.frontier.try_pop() {
            if self.g_score.get(&current).is_some_and(|&best| g > best) {
                continue;
            }
            for step in neighbors(grid, profile, current.cell) {
                if occupancy.is_some_and(|(oracle, mover)| !oracle.can_traverse(step.to, mover)) {
                    continue;
                }
                let Some(target) = grid.cell(step.to) else {
                    continue;
                };
                let cost = g + self
                    .evaluator
                    .cost(target, step.kind, current.parity, profile);
                if cost > budget_feet {
                    continue;
                }
                let next = SearchState {
                    cell: step.to,
                    parity: current.parity.after(step.kind),
                };
                if self.g_score.get(&next).is_some_and(|&known| known <= cost) {
                    continue;
                }
                self.g_score.insert(next, cost);
                self.frontier.push((cost, next));
            }
        }

        let mut costs = HashMap::with_capacity(self.g_score.len());
        for (state, &cost) in &self.g_score {
            costs
                .entry(state.cell)
                .and_modify(|best: &mut u32| *best = (*best).min(cost))
                .or_insert(cost);
        }
        costs.insert(origin, 0);
        tracing::debug!(%origin, budget_feet, cells = costs.len(), "movement zone computed");

        MovementZone {
            origin,
            budget_feet,
            costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, CellFlags, TerrainKind};
    use crate::state::{OccupancyMap, Team};

    fn plane(size: i32) -> GridStore {
        let mut grid = GridStore::default();
        grid.fill_plane(0, 0..=size - 1, 0..=size - 1, Cell::floor());
        grid
    }

    #[test]
    fn budget_bounds_the_zone() {
        let grid = plane(9);
        let mut finder = Pathfinder::default();
        let origin = CellCoord::new(4, 0, 4);
        let zone = finder.movement_zone(&grid, origin, &MovementProfile::default(), 5);
        // origin, four cardinals, four first diagonals
        assert_eq!(zone.len(), 9);
        assert_eq!(zone.cost_to(origin), Some(0));
        assert_eq!(zone.cost_to(CellCoord::new(5, 0, 5)), Some(5));
        assert!(!zone.contains(CellCoord::new(6, 0, 4)));
    }

    #[test]
    fn zone_cost_is_minimum_over_parities() {
        let grid = plane(9);
        let mut finder = Pathfinder::default();
        let zone = finder.movement_zone(&grid, CellCoord::ORIGIN, &MovementProfile::default(), 30);
        assert_eq!(zone.cost_to(CellCoord::new(2, 0, 2)), Some(15));
        assert_eq!(zone.cost_to(CellCoord::new(3, 0, 3)), Some(20));
        assert_eq!(zone.cost_to(CellCoord::new(4, 0, 4)), Some(30));
        assert_eq!(zone.actions_required(CellCoord::new(4, 0, 4), 25), Some(2));
    }

    #[test]
    fn cache_hits_until_grid_changes() {
        let mut grid = plane(5);
        let mut finder = Pathfinder::default();
        let profile = MovementProfile::default();
        let first = finder.movement_zone(&grid, CellCoord::ORIGIN, &profile, 10);
        let second = finder.movement_zone(&grid, CellCoord::ORIGIN, &profile, 10);
        assert_eq!(first, second);

        grid.set_cell(
            CellCoord::new(1, 0, 0),
            Cell::new(TerrainKind::Impassable, CellFlags::empty()),
        );
        let third = finder.movement_zone(&grid, CellCoord::ORIGIN, &profile, 10);
        assert!(!third.contains(CellCoord::new(1, 0, 0)));
        assert!(first.contains(CellCoord::new(1, 0, 0)));
    }

    #[test]
    fn origin_is_kept_even_when_impassable() {
        let grid = GridStore::default();
        let mut finder = Pathfinder::default();
        let zone = finder.movement_zone(&grid, CellCoord::ORIGIN, &MovementProfile::default(), 30);
        assert_eq!(zone.len(), 1);
        assert_eq!(zone.cost_to(CellCoord::ORIGIN), Some(0));
    }

    #[test]
    fn occupied_cells_are_crossed_but_not_kept() {
        let mut grid = GridStore::default();
        grid.fill_plane(0, 0..=3, 0..=0, Cell::floor());
        let hero = EntityId(1);
        let mut occupancy = OccupancyMap::new();
        occupancy.place(hero, CellCoord::ORIGIN, 1, Team(1));
        occupancy.place(EntityId(2), CellCoord::new(1, 0, 0), 1, Team(1));

        let mut finder = Pathfinder::default();
        let zone = finder.movement_zone_with_occupancy(
            &grid,
            CellCoord::ORIGIN,
            &MovementProfile::default(),
            15,
            &occupancy,
            hero,
        );
        assert!(zone.contains(CellCoord::ORIGIN));
        assert!(!zone.contains(CellCoord::new(1, 0, 0)));
        assert_eq!(zone.cost_to(CellCoord::new(2, 0, 0)), Some(10));
        assert_eq!(zone.cost_to(CellCoord::new(3, 0, 0)), Some(15));
    }
}
