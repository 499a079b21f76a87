use crate::grid::CellCoord;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    #[default]
    Walk,
    Fly,
    Swim,
    Climb,
}

/// How a creature moves. Used as part of the movement-zone cache key, so
/// equality and hashing are structural.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementProfile {
    pub mode: MovementMode,
    pub speed_feet: u32,
    /// Footprint edge length in cells (1 for medium, 2 for large, ...).
    pub footprint: u8,
    pub ignores_difficult_terrain: bool,
}

impl MovementProfile {
    pub const DEFAULT_SPEED_FEET: u32 = 25;

    pub const fn walking(speed_feet: u32) -> Self {
        Self {
            mode: MovementMode::Walk,
            speed_feet,
            footprint: 1,
            ignores_difficult_terrain: false,
        }
    }

    pub const fn with_mode(mut self, mode: MovementMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_footprint(mut self, footprint: u8) -> Self {
        self.footprint = footprint;
        self
    }

    pub const fn ignoring_difficult_terrain(mut self) -> Self {
        self.ignores_difficult_terrain = true;
        self
    }

    /// Feet available when spending `actions` on Stride.
    pub fn budget_for_actions(&self, actions: u8) -> u32 {
        self.speed_feet * u32::from(actions)
    }

    /// Cells covered when the footprint's anchor (min x, min z corner) sits
    /// on `anchor`.
    pub fn footprint_cells(&self, anchor: CellCoord) -> impl Iterator<Item = CellCoord> {
        let size = i32::from(self.footprint.max(1));
        (0..size).flat_map(move |dx| (0..size).map(move |dz| anchor.offset(dx, dz)))
    }
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self::walking(Self::DEFAULT_SPEED_FEET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_profiles_hash_identically() {
        let a = MovementProfile::walking(30).with_footprint(2);
        let b = MovementProfile::walking(30).with_footprint(2);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&MovementProfile::walking(30)));
    }

    #[test]
    fn large_footprint_covers_four_cells() {
        let profile = MovementProfile::walking(25).with_footprint(2);
        let cells: Vec<_> = profile.footprint_cells(CellCoord::new(1, 0, 1)).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(1, 0, 1),
                CellCoord::new(1, 0, 2),
                CellCoord::new(2, 0, 1),
                CellCoord::new(2, 0, 2),
            ]
        );
    }

    #[test]
    fn stride_budget_scales_with_actions() {
        assert_eq!(MovementProfile::walking(25).budget_for_actions(2), 50);
    }
}
