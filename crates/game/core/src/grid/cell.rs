use bitflags::bitflags;

use crate::movement::MovementMode;

bitflags! {
    /// Traversal and authoring markers attached to a cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CellFlags: u8 {
        const WALKABLE  = 1 << 0;
        const FLYABLE   = 1 << 1;
        const SWIMMABLE = 1 << 2;
        const LADDER    = 1 << 3;
        const STAIRS    = 1 << 4;
    }
}

/// Terrain classes that drive movement cost multipliers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Normal,
    Difficult,
    GreaterDifficult,
    /// Costs like normal terrain; the damage it deals is resolved elsewhere.
    Hazardous,
    Impassable,
}

impl TerrainKind {
    pub fn is_difficult(self) -> bool {
        matches!(self, Self::Difficult | Self::GreaterDifficult)
    }
}

/// Static description of one grid cell.
///
/// Fields are private so that the walkability invariant cannot be bypassed:
/// impassable terrain never carries [`CellFlags::WALKABLE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    terrain: TerrainKind,
    flags: CellFlags,
    cover: u8,
}

impl Cell {
    pub fn new(terrain: TerrainKind, mut flags: CellFlags) -> Self {
        if terrain == TerrainKind::Impassable {
            flags.remove(CellFlags::WALKABLE);
        }
        Self {
            terrain,
            flags,
            cover: 0,
        }
    }

    /// Plain walkable floor.
    pub fn floor() -> Self {
        Self::new(TerrainKind::Normal, CellFlags::WALKABLE)
    }

    pub fn with_cover(mut self, cover: u8) -> Self {
        self.cover = cover;
        self
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn flags(self) -> CellFlags {
        self.flags
    }

    pub fn cover(self) -> u8 {
        self.cover
    }

    pub fn is_walkable(self) -> bool {
        self.flags.contains(CellFlags::WALKABLE)
    }

    /// Whether a creature using `mode` may enter this cell at all.
    pub fn is_traversable(self, mode: MovementMode) -> bool {
        if self.terrain == TerrainKind::Impassable {
            return false;
        }
        let required = match mode {
            MovementMode::Walk => CellFlags::WALKABLE,
            MovementMode::Fly => CellFlags::WALKABLE | CellFlags::FLYABLE,
            MovementMode::Swim => CellFlags::SWIMMABLE,
            MovementMode::Climb => CellFlags::WALKABLE | CellFlags::LADDER,
        };
        self.flags.intersects(required)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impassable_strips_walkable() {
        let cell = Cell::new(
            TerrainKind::Impassable,
            CellFlags::WALKABLE | CellFlags::FLYABLE,
        );
        assert!(!cell.is_walkable());
        assert!(cell.flags().contains(CellFlags::FLYABLE));
        assert!(!cell.is_traversable(MovementMode::Fly));
    }

    #[test]
    fn traversal_depends_on_mode() {
        let water = Cell::new(TerrainKind::Normal, CellFlags::SWIMMABLE);
        assert!(water.is_traversable(MovementMode::Swim));
        assert!(!water.is_traversable(MovementMode::Walk));

        let ladder = Cell::new(TerrainKind::Normal, CellFlags::LADDER);
        assert!(ladder.is_traversable(MovementMode::Climb));
        assert!(!ladder.is_traversable(MovementMode::Walk));

        assert!(Cell::floor().is_traversable(MovementMode::Fly));
    }

    #[test]
    fn terrain_parses_from_snake_case() {
        assert_eq!(
            "greater_difficult".parse::<TerrainKind>(),
            Ok(TerrainKind::GreaterDifficult)
        );
        assert_eq!(TerrainKind::Hazardous.to_string(), "hazardous");
    }
}
