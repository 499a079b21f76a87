use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::grid::{CellCoord, GridStore};
use crate::movement::{MovementProfile, StepKind};

const CARDINALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// One legal move out of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub to: CellCoord,
    pub kind: StepKind,
}

pub type Steps = ArrayVec<Step, { GameConfig::MAX_NEIGHBORS }>;

/// Every cell of the footprint anchored at `anchor` exists and admits the
/// profile's movement mode.
pub fn is_passable(grid: &GridStore, profile: &MovementProfile, anchor: CellCoord) -> bool {
    profile.footprint_cells(anchor).all(|coord| {
        grid.cell(coord)
            .is_some_and(|cell| cell.is_traversable(profile.mode))
    })
}

/// A single horizontal step from `from` to `to` is legal on its own.
fn is_steppable(
    grid: &GridStore,
    profile: &MovementProfile,
    from: CellCoord,
    to: CellCoord,
) -> bool {
    is_passable(grid, profile, to) && !grid.blocks_movement(from, to)
}

/// Legal steps out of `from`.
///
/// A diagonal needs both cardinal corner cells to be steppable on their own
/// and none of the diagonal edge or the two corner-to-target edges may block.
pub fn neighbors(grid: &GridStore, profile: &MovementProfile, from: CellCoord) -> Steps {
    let mut steps = Steps::new();

    for (dx, dz) in CARDINALS {
        let to = from.offset(dx, dz);
        if is_steppable(grid, profile, from, to) {
            steps.push(Step {
                to,
                kind: StepKind::Cardinal,
            });
        }
    }

    for (dx, dz) in DIAGONALS {
        let to = from.offset(dx, dz);
        let corner_x = from.offset(dx, 0);
        let corner_z = from.offset(0, dz);
        let legal = is_steppable(grid, profile, from, corner_x)
            && is_steppable(grid, profile, from, corner_z)
            && is_passable(grid, profile, to)
            && !grid.blocks_movement(from, to)
            && !grid.blocks_movement(corner_x, to)
            && !grid.blocks_movement(corner_z, to);
        if legal {
            steps.push(Step {
                to,
                kind: StepKind::Diagonal,
            });
        }
    }

    for link in grid.links_at(from) {
        let Some(to) = link.other_end(from) else {
            continue;
        };
        if !is_passable(grid, profile, to) {
            continue;
        }
        let step = Step {
            to,
            kind: StepKind::Vertical {
                cost_feet: link.cost_feet,
            },
        };
        if steps.try_push(step).is_err() {
            tracing::warn!(%from, "too many vertical links; extra links ignored");
            break;
        }
    }

    steps
}
