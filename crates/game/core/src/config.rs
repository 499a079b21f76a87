/// Rules configuration supplied at construction and never mutated by the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub grid: GridConfig,
    pub rules: RuleConstants,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active conditions per combatant.
    pub const MAX_CONDITIONS: usize = 16;
    /// Upper bound on neighbours produced for one search state
    /// (4 cardinal + 4 diagonal + vertical links).
    pub const MAX_NEIGHBORS: usize = 16;

    pub fn new(grid: GridConfig, rules: RuleConstants) -> Self {
        Self { grid, rules }
    }
}

/// Spatial layout of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Edge length of one cell in feet.
    pub cell_size_feet: u32,
    /// Height of one elevation layer in feet.
    pub elevation_step_feet: u32,
    /// Chunk edge length in cells (X/Z only).
    pub chunk_size: u32,
}

impl GridConfig {
    pub const DEFAULT_CELL_SIZE_FEET: u32 = 5;
    pub const DEFAULT_ELEVATION_STEP_FEET: u32 = 10;
    pub const DEFAULT_CHUNK_SIZE: u32 = 16;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_feet: Self::DEFAULT_CELL_SIZE_FEET,
            elevation_step_feet: Self::DEFAULT_ELEVATION_STEP_FEET,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Tunable rule constants for movement and action resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConstants {
    /// Feet spent on a cardinal step.
    pub cardinal_cost: u32,
    /// Feet spent on the first (odd-numbered) diagonal step.
    pub diagonal_cost: u32,
    /// Feet spent on every second diagonal step.
    pub diagonal_alternate_cost: u32,
    pub difficult_multiplier: u32,
    pub greater_difficult_multiplier: u32,
    /// Actions granted at the start of each turn.
    pub actions_per_turn: u8,
    /// DC of the check made when a prepared aid is triggered.
    pub aid_dc: i32,
    /// Range increments a ranged weapon may reach unless it says otherwise.
    pub max_range_increments: u32,
}

impl RuleConstants {
    pub const DEFAULT_CARDINAL_COST: u32 = 5;
    pub const DEFAULT_DIAGONAL_COST: u32 = 5;
    pub const DEFAULT_DIAGONAL_ALTERNATE_COST: u32 = 10;
    pub const DEFAULT_ACTIONS_PER_TURN: u8 = 3;
    pub const DEFAULT_AID_DC: i32 = 15;
    pub const DEFAULT_MAX_RANGE_INCREMENTS: u32 = 6;
}

impl Default for RuleConstants {
    fn default() -> Self {
        Self {
            cardinal_cost: Self::DEFAULT_CARDINAL_COST,
            diagonal_cost: Self::DEFAULT_DIAGONAL_COST,
            diagonal_alternate_cost: Self::DEFAULT_DIAGONAL_ALTERNATE_COST,
            difficult_multiplier: 2,
            greater_difficult_multiplier: 3,
            actions_per_turn: Self::DEFAULT_ACTIONS_PER_TURN,
            aid_dc: Self::DEFAULT_AID_DC,
            max_range_increments: Self::DEFAULT_MAX_RANGE_INCREMENTS,
        }
    }
}
