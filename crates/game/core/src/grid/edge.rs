use super::CellCoord;

/// Order-independent key for the boundary between two cells.
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)` always holds because the pair
/// is stored sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    low: CellCoord,
    high: CellCoord,
}

impl EdgeKey {
    pub fn new(a: CellCoord, b: CellCoord) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn cells(self) -> (CellCoord, CellCoord) {
        (self.low, self.high)
    }
}

/// Kinds of structures that can sit on a cell boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    Wall,
    Door,
    Window,
    ArrowSlit,
}

/// Boundary data. Movement and sight blocking are independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub kind: EdgeKind,
    pub blocks_movement: bool,
    pub blocks_sight: bool,
}

impl Edge {
    pub const fn new(kind: EdgeKind, blocks_movement: bool, blocks_sight: bool) -> Self {
        Self {
            kind,
            blocks_movement,
            blocks_sight,
        }
    }

    pub const fn wall() -> Self {
        Self::new(EdgeKind::Wall, true, true)
    }

    pub const fn door(open: bool) -> Self {
        Self::new(EdgeKind::Door, !open, !open)
    }

    pub const fn window() -> Self {
        Self::new(EdgeKind::Window, true, false)
    }

    pub const fn arrow_slit() -> Self {
        Self::new(EdgeKind::ArrowSlit, true, false)
    }
}
