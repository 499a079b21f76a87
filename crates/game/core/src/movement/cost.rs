use super::MovementProfile;
use crate::config::RuleConstants;
use crate::grid::{Cell, CellCoord, GridStore, TerrainKind};

/// Kind of a single step between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    Cardinal,
    Diagonal,
    /// Traversal of a vertical link with its fixed base cost.
    Vertical { cost_feet: u32 },
}

impl StepKind {
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::Diagonal)
    }
}

/// Number of diagonal steps taken so far along a path, modulo two.
///
/// `Even` means the next diagonal is the cheap one. Every query starts at
/// `Even`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DiagonalParity {
    #[default]
    Even,
    Odd,
}

impl DiagonalParity {
    pub fn flipped(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    /// Parity after taking `step`. Only diagonals flip it.
    pub fn after(self, step: StepKind) -> Self {
        if step.is_diagonal() { self.flipped() } else { self }
    }
}

/// Single source of truth for the feet cost of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementCostEvaluator {
    rules: RuleConstants,
}

impl MovementCostEvaluator {
    pub fn new(rules: RuleConstants) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleConstants {
        &self.rules
    }

    /// Cost of `step` before terrain is considered.
    pub fn base_cost(&self, step: StepKind, parity: DiagonalParity) -> u32 {
        match step {
            StepKind::Cardinal => self.rules.cardinal_cost,
            StepKind::Diagonal => match parity {
                DiagonalParity::Even => self.rules.diagonal_cost,
                DiagonalParity::Odd => self.rules.diagonal_alternate_cost,
            },
            StepKind::Vertical { cost_feet } => cost_feet,
        }
    }

    pub fn terrain_multiplier(&self, terrain: TerrainKind, profile: &MovementProfile) -> u32 {
        if profile.ignores_difficult_terrain {
            return 1;
        }
        match terrain {
            TerrainKind::Difficult => self.rules.difficult_multiplier,
            TerrainKind::GreaterDifficult => self.rules.greater_difficult_multiplier,
            TerrainKind::Normal | TerrainKind::Hazardous | TerrainKind::Impassable => 1,
        }
    }

    /// Feet spent entering `target` via `step` with the given parity.
    ///
    /// The terrain multiplier applies to every step kind, vertical included.
    pub fn cost(
        &self,
        target: Cell,
        step: StepKind,
        parity: DiagonalParity,
        profile: &MovementProfile,
    ) -> u32 {
        self.base_cost(step, parity) * self.terrain_multiplier(target.terrain(), profile)
    }

    /// Cost of `count` consecutive diagonals on plain terrain starting at `parity`.
    pub fn diagonal_run_cost(&self, count: u32, parity: DiagonalParity) -> u32 {
        let (first, second) = match parity {
            DiagonalParity::Even => (self.rules.diagonal_cost, self.rules.diagonal_alternate_cost),
            DiagonalParity::Odd => (self.rules.diagonal_alternate_cost, self.rules.diagonal_cost),
        };
        count.div_ceil(2) * first + (count / 2) * second
    }

    /// Re-prices an existing path, replaying parity from the first cell.
    ///
    /// Edge blocking is not re-checked. Returns `None` when two consecutive
    /// cells are neither adjacent nor joined by a vertical link, or a cell is
    /// missing from the grid.
    pub fn path_cost(
        &self,
        grid: &GridStore,
        cells: &[CellCoord],
        profile: &MovementProfile,
    ) -> Option<u32> {
        let mut parity = DiagonalParity::Even;
        let mut total = 0;
        for pair in cells.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let step = step_between(grid, from, to)?;
            let target = grid.cell(to)?;
            total += self.cost(target, step, parity, profile);
            parity = parity.after(step);
        }
        Some(total)
    }
}

fn step_between(grid: &GridStore, from: CellCoord, to: CellCoord) -> Option<StepKind> {
    if from.y == to.y {
        match from.horizontal_delta(to) {
            (1, 0) | (0, 1) => return Some(StepKind::Cardinal),
            (1, 1) => return Some(StepKind::Diagonal),
            _ => {}
        }
    }
    grid.links_at(from)
        .find(|link| link.other_end(from) == Some(to))
        .map(|link| StepKind::Vertical {
            cost_feet: link.cost_feet,
        })
}
