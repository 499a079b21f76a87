use crate::grid::CellCoord;
use crate::state::EntityId;

/// Answers whether a mover may pass through or end on a cell.
///
/// `anchor` is the footprint anchor the mover would occupy; implementations
/// account for multi-cell footprints themselves.
pub trait OccupancyOracle {
    /// The mover may cross `anchor` on the way somewhere else.
    fn can_traverse(&self, anchor: CellCoord, mover: EntityId) -> bool;

    /// The mover may end its movement on `anchor`.
    fn can_stop(&self, anchor: CellCoord, mover: EntityId) -> bool;
}

/// Occupancy oracle for an empty battlefield.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOccupancy;

impl OccupancyOracle for NoOccupancy {
    fn can_traverse(&self, _anchor: CellCoord, _mover: EntityId) -> bool {
        true
    }

    fn can_stop(&self, _anchor: CellCoord, _mover: EntityId) -> bool {
        true
    }
}

impl<T: OccupancyOracle + ?Sized> OccupancyOracle for &T {
    fn can_traverse(&self, anchor: CellCoord, mover: EntityId) -> bool {
        (**self).can_traverse(anchor, mover)
    }

    fn can_stop(&self, anchor: CellCoord, mover: EntityId) -> bool {
        (**self).can_stop(anchor, mover)
    }
}
