use super::CellCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkKind {
    Stairs,
    Ladder,
    Ramp,
    Jumpable,
}

/// Explicit connection between two non-adjacent cells on different layers.
///
/// Links are authored once and never removed at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalLink {
    pub lower: CellCoord,
    pub upper: CellCoord,
    pub kind: LinkKind,
    /// Fixed feet cost of traversing the link in either direction.
    pub cost_feet: u32,
}

impl VerticalLink {
    pub const fn new(lower: CellCoord, upper: CellCoord, kind: LinkKind, cost_feet: u32) -> Self {
        Self {
            lower,
            upper,
            kind,
            cost_feet,
        }
    }

    /// The far end of the link when entered from `from`.
    pub fn other_end(&self, from: CellCoord) -> Option<CellCoord> {
        if from == self.lower {
            Some(self.upper)
        } else if from == self.upper {
            Some(self.lower)
        } else {
            None
        }
    }
}
