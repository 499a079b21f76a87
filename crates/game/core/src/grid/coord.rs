use std::fmt;

use crate::config::GridConfig;

/// Integer grid coordinate: `x` and `z` span the horizontal plane, `y` is the
/// elevation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate shifted on the horizontal plane.
    #[inline]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
            z: self.z + dz,
        }
    }

    /// Absolute horizontal deltas `(|dx|, |dz|)` between two coordinates.
    #[inline]
    pub fn horizontal_delta(self, other: Self) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.z.abs_diff(other.z))
    }

    /// Number of elevation layers between two coordinates.
    #[inline]
    pub fn elevation_delta(self, other: Self) -> u32 {
        self.y.abs_diff(other.y)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk coordinate used by incremental consumers such as mesh rebuilders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Maps a cell to its chunk. X/Z use floor division so that `-1` lands in
    /// chunk `-1`, not chunk `0`. Elevation passes through unchanged.
    pub fn containing(cell: CellCoord, chunk_size: u32) -> Self {
        let size = chunk_size.max(1) as i32;
        Self {
            x: cell.x.div_euclid(size),
            y: cell.y,
            z: cell.z.div_euclid(size),
        }
    }
}

/// Distance in feet between two cells under the alternating-diagonal rule.
///
/// Horizontal distance counts every second diagonal double. Vertical distance
/// is the elevation difference in feet; the larger of the two wins.
pub fn distance_feet(a: CellCoord, b: CellCoord, config: &GridConfig) -> u32 {
    let (dx, dz) = a.horizontal_delta(b);
    let diagonal = dx.min(dz);
    let straight = dx.max(dz) - diagonal;
    let horizontal = (straight + diagonal + diagonal / 2) * config.cell_size_feet;
    let vertical = a.elevation_delta(b) * config.elevation_step_feet;
    horizontal.max(vertical)
}
