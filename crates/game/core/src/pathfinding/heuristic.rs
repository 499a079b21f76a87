use crate::grid::{CellCoord, GridStore};
use crate::movement::{DiagonalParity, MovementCostEvaluator};

/// Obstacle-free optimal cost from `from` to `goal` given the current parity.
///
/// Takes `min(dx, dz)` diagonals and the remainder as cardinals. On an open
/// plane this equals the true shortest cost. Elevation and vertical links are
/// ignored; [`GoalEstimate`] adds them for the A* search.
pub fn heuristic(
    evaluator: &MovementCostEvaluator,
    from: CellCoord,
    parity: DiagonalParity,
    goal: CellCoord,
) -> u32 {
    let (dx, dz) = from.horizontal_delta(goal);
    let diagonals = dx.min(dz);
    let straights = dx.max(dz) - diagonals;
    straights * evaluator.rules().cardinal_cost + evaluator.diagonal_run_cost(diagonals, parity)
}

/// Parity-free lower bound on the cost of walking between two cells.
///
/// Every diagonal is priced at the cheapest of the two diagonal costs or two
/// cardinals, so no horizontal path between the cells can cost less.
fn floor_cost(evaluator: &MovementCostEvaluator, from: CellCoord, to: CellCoord) -> u32 {
    let rules = evaluator.rules();
    let (dx, dz) = from.horizontal_delta(to);
    let diagonals = dx.min(dz);
    let straights = dx.max(dz) - diagonals;
    let diagonal = rules
        .diagonal_cost
        .min(rules.diagonal_alternate_cost)
        .min(rules.cardinal_cost.saturating_mul(2));
    straights * rules.cardinal_cost + diagonals * diagonal
}

/// Admissible A* estimate towards one goal on a grid with vertical links.
///
/// A link may cost less than the horizontal distance it spans, so the plain
/// [`heuristic`] can overestimate. Each link end is kept as a portal with a
/// lower bound on its remaining cost to the goal, found by a Dijkstra pass
/// over the link ends. The estimate is the smaller of the plain heuristic and
/// the cheapest route through a portal. It is admissible but not always
/// consistent, so the search must be willing to reopen states.
#[derive(Clone, Debug, Default)]
pub struct GoalEstimate {
    goal: CellCoord,
    portals: Vec<(CellCoord, u32)>,
    settled: Vec<bool>,
}

impl GoalEstimate {
    /// Rebuilds the portal table for `goal`, reusing the buffers.
    pub fn prepare(
        &mut self,
        evaluator: &MovementCostEvaluator,
        grid: &GridStore,
        goal: CellCoord,
    ) {
        self.goal = goal;
        self.portals.clear();
        self.settled.clear();

        let links = grid.vertical_links();
        if links.is_empty() {
            return;
        }
        for link in links {
            for end in [link.lower, link.upper] {
                if !self.portals.iter().any(|&(cell, _)| cell == end) {
                    self.portals.push((end, floor_cost(evaluator, end, goal)));
                }
            }
        }
        self.settled.resize(self.portals.len(), false);

        // Dense Dijkstra: every portal reaches every other by walking, and
        // link ends additionally by their link.
        while let Some(next) = self.cheapest_unsettled() {
            self.settled[next] = true;
            let (cell, remaining) = self.portals[next];
            for index in 0..self.portals.len() {
                if self.settled[index] {
                    continue;
                }
                let other = self.portals[index].0;
                let link = links
                    .iter()
                    .filter(|link| link.other_end(other) == Some(cell))
                    .map(|link| link.cost_feet)
                    .min();
                let hop = link.map_or(floor_cost(evaluator, other, cell), |feet| {
                    feet.min(floor_cost(evaluator, other, cell))
                });
                let through = hop.saturating_add(remaining);
                if through < self.portals[index].1 {
                    self.portals[index].1 = through;
                }
            }
        }
        tracing::trace!(%goal, portals = self.portals.len(), "goal estimate prepared");
    }

    fn cheapest_unsettled(&self) -> Option<usize> {
        self.portals
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.settled[*index])
            .min_by_key(|(_, (_, remaining))| *remaining)
            .map(|(index, _)| index)
    }

    pub fn estimate(
        &self,
        evaluator: &MovementCostEvaluator,
        from: CellCoord,
        parity: DiagonalParity,
    ) -> u32 {
        let plain = heuristic(evaluator, from, parity, self.goal);
        self.portals
            .iter()
            .map(|&(cell, remaining)| floor_cost(evaluator, from, cell).saturating_add(remaining))
            .fold(plain, u32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConstants;
    use crate::grid::{Cell, LinkKind, VerticalLink};

    #[test]
    fn matches_alternating_diagonals() {
        let evaluator = MovementCostEvaluator::default();
        let goal = CellCoord::new(3, 0, 5);
        // 3 diagonals (5 + 10 + 5) and 2 cardinals
        assert_eq!(heuristic(&evaluator, CellCoord::ORIGIN, DiagonalParity::Even, goal), 30);
        // 10 + 5 + 10 and 2 cardinals
        assert_eq!(heuristic(&evaluator, CellCoord::ORIGIN, DiagonalParity::Odd, goal), 35);
        assert_eq!(heuristic(&evaluator, goal, DiagonalParity::Odd, goal), 0);
    }

    #[test]
    fn floor_cost_prices_every_diagonal_cheaply() {
        let evaluator = MovementCostEvaluator::default();
        assert_eq!(floor_cost(&evaluator, CellCoord::ORIGIN, CellCoord::new(3, 0, 5)), 25);

        let swapped = MovementCostEvaluator::new(RuleConstants {
            diagonal_cost: 10,
            diagonal_alternate_cost: 5,
            ..RuleConstants::default()
        });
        assert_eq!(floor_cost(&swapped, CellCoord::ORIGIN, CellCoord::new(2, 0, 2)), 10);
    }

    #[test]
    fn without_links_the_estimate_is_the_plain_heuristic() {
        let evaluator = MovementCostEvaluator::default();
        let mut grid = GridStore::default();
        grid.fill_plane(0, 0..=4, 0..=4, Cell::floor());
        let goal = CellCoord::new(4, 0, 2);

        let mut estimate = GoalEstimate::default();
        estimate.prepare(&evaluator, &grid, goal);
        for parity in [DiagonalParity::Even, DiagonalParity::Odd] {
            assert_eq!(
                estimate.estimate(&evaluator, CellCoord::ORIGIN, parity),
                heuristic(&evaluator, CellCoord::ORIGIN, parity, goal)
            );
        }
    }

    #[test]
    fn cheap_link_lowers_the_estimate() {
        let evaluator = MovementCostEvaluator::default();
        let mut grid = GridStore::default();
        grid.fill_plane(0, 0..=10, 0..=1, Cell::floor());
        let goal = CellCoord::new(10, 1, 0);
        grid.set_cell(goal, Cell::floor());
        grid.add_vertical_link(VerticalLink::new(
            CellCoord::new(0, 0, 1),
            goal,
            LinkKind::Jumpable,
            5,
        ));

        let mut estimate = GoalEstimate::default();
        estimate.prepare(&evaluator, &grid, goal);
        // one cardinal to the link, then the 5 ft link
        assert_eq!(estimate.estimate(&evaluator, CellCoord::ORIGIN, DiagonalParity::Even), 10);
        assert_eq!(heuristic(&evaluator, CellCoord::ORIGIN, DiagonalParity::Even, goal), 50);
    }
}
