//! Grid layout loader.
//!
//! Loads cells, edges, and vertical links from map RON files. Rectangular
//! floors are written first, then individual cell overrides, then edges and
//! links. Entity placement is handled by the caller.

use std::path::Path;

use serde::Deserialize;
use tactics_core::grid::LinkKind;
use tactics_core::{
    Cell, CellCoord, CellFlags, Edge, EdgeKind, GridConfig, GridStore, TerrainKind, VerticalLink,
};

use crate::loaders::{LoadResult, read_file};

type Coord = (i32, i32, i32);

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    #[serde(default)]
    grid: GridConfig,
    #[serde(default)]
    planes: Vec<PlaneRon>,
    #[serde(default)]
    cells: Vec<CellRon>,
    #[serde(default)]
    edges: Vec<EdgeRon>,
    #[serde(default)]
    links: Vec<LinkRon>,
}

/// Rectangle of identical cells on one elevation layer, bounds inclusive.
#[derive(Debug, Clone, Deserialize)]
struct PlaneRon {
    elevation: i32,
    x: (i32, i32),
    z: (i32, i32),
    #[serde(default)]
    terrain: TerrainKind,
    #[serde(default = "walkable")]
    flags: CellFlags,
}

#[derive(Debug, Clone, Deserialize)]
struct CellRon {
    at: Coord,
    #[serde(default)]
    terrain: TerrainKind,
    #[serde(default = "walkable")]
    flags: CellFlags,
    #[serde(default)]
    cover: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct EdgeRon {
    between: (Coord, Coord),
    kind: EdgeKind,
    /// Only meaningful for doors.
    #[serde(default)]
    open: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LinkRon {
    lower: Coord,
    upper: Coord,
    kind: LinkKind,
    cost_feet: u32,
}

fn walkable() -> CellFlags {
    CellFlags::WALKABLE
}

fn coord((x, y, z): Coord) -> CellCoord {
    CellCoord::new(x, y, z)
}

fn edge(kind: EdgeKind, open: bool) -> Edge {
    match kind {
        EdgeKind::Wall => Edge::wall(),
        EdgeKind::Door => Edge::door(open),
        EdgeKind::Window => Edge::window(),
        EdgeKind::ArrowSlit => Edge::arrow_slit(),
    }
}

/// Loader for grid layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a grid layout from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the layout
    ///
    /// # Returns
    ///
    /// Returns a populated [`GridStore`] with its dirty-chunk set drained.
    pub fn load(path: &Path) -> LoadResult<GridStore> {
        let content = read_file(path)?;
        let grid = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            cells = grid.cell_count(),
            links = grid.vertical_links().len(),
            "loaded map"
        );
        Ok(grid)
    }

    pub fn parse(content: &str) -> LoadResult<GridStore> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut grid = GridStore::new(data.grid);

        for plane in data.planes {
            if plane.x.0 > plane.x.1 || plane.z.0 > plane.z.1 {
                anyhow::bail!(
                    "Plane at elevation {} has inverted bounds x={:?} z={:?}",
                    plane.elevation,
                    plane.x,
                    plane.z
                );
            }
            grid.fill_plane(
                plane.elevation,
                plane.x.0..=plane.x.1,
                plane.z.0..=plane.z.1,
                Cell::new(plane.terrain, plane.flags),
            );
        }

        for cell in data.cells {
            grid.set_cell(
                coord(cell.at),
                Cell::new(cell.terrain, cell.flags).with_cover(cell.cover),
            );
        }

        for entry in data.edges {
            let (a, b) = (coord(entry.between.0), coord(entry.between.1));
            let (dx, dz) = a.horizontal_delta(b);
            if a.y != b.y || dx + dz != 1 {
                anyhow::bail!("Edge {} -> {} does not join two cardinal neighbours", a, b);
            }
            grid.set_edge(a, b, edge(entry.kind, entry.open));
        }

        for link in data.links {
            let (lower, upper) = (coord(link.lower), coord(link.upper));
            if lower.y >= upper.y {
                anyhow::bail!("Link {} -> {} must climb to a higher layer", lower, upper);
            }
            grid.add_vertical_link(VerticalLink::new(lower, upper, link.kind, link.cost_feet));
        }

        // Freshly loaded maps have nothing for incremental consumers to catch up on.
        grid.drain_dirty_chunks().for_each(drop);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOWER: &str = r#"
        (
            planes: [
                (elevation: 0, x: (0, 4), z: (0, 4)),
                (elevation: 1, x: (0, 1), z: (0, 1)),
            ],
            cells: [
                (at: (2, 0, 2), terrain: Difficult),
                (at: (3, 0, 3), terrain: Normal, flags: "WALKABLE | LADDER", cover: 2),
            ],
            edges: [
                (between: ((0, 0, 0), (1, 0, 0)), kind: Wall),
                (between: ((0, 0, 1), (1, 0, 1)), kind: Door, open: true),
            ],
            links: [
                (lower: (1, 0, 2), upper: (1, 1, 1), kind: Ladder, cost_feet: 15),
            ],
        )
    "#;

    #[test]
    fn builds_layers_edges_and_links() {
        let grid = MapLoader::parse(TOWER).unwrap();
        assert_eq!(grid.cell_count(), 25 + 4);
        assert!(!grid.has_dirty_chunks());

        let mud = grid.cell(CellCoord::new(2, 0, 2)).unwrap();
        assert_eq!(mud.terrain(), TerrainKind::Difficult);
        let rung = grid.cell(CellCoord::new(3, 0, 3)).unwrap();
        assert!(rung.flags().contains(CellFlags::LADDER));
        assert_eq!(rung.cover(), 2);

        assert!(grid.blocks_movement(CellCoord::new(0, 0, 0), CellCoord::new(1, 0, 0)));
        assert!(!grid.blocks_movement(CellCoord::new(0, 0, 1), CellCoord::new(1, 0, 1)));
        assert_eq!(grid.links_at(CellCoord::new(1, 1, 1)).count(), 1);
    }

    #[test]
    fn rejects_diagonal_edges() {
        let err = MapLoader::parse(
            "(planes: [(elevation: 0, x: (0, 1), z: (0, 1))], \
              edges: [(between: ((0, 0, 0), (1, 0, 1)), kind: Wall)])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("cardinal"));
    }

    #[test]
    fn rejects_malformed_ron() {
        let err = MapLoader::parse("(planes: [").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse map RON"));
    }
}
