use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use super::{Cell, CellCoord, ChunkCoord, Edge, EdgeKey, VerticalLink};
use crate::config::GridConfig;

/// Authoritative grid data: cells, edges, and vertical links.
///
/// Every write bumps [`version`](Self::version) so that derived caches can detect
/// staleness without hashing the grid, and marks the touched chunks dirty for
/// incremental consumers.
#[derive(Clone, Debug, Default)]
pub struct GridStore {
    config: GridConfig,
    cells: HashMap<CellCoord, Cell>,
    edges: HashMap<EdgeKey, Edge>,
    links: Vec<VerticalLink>,
    /// Cell -> indices into `links`, for both ends of every link.
    link_index: HashMap<CellCoord, Vec<usize>>,
    version: u64,
    dirty_chunks: HashSet<ChunkCoord>,
}

impl GridStore {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Monotonic write counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn has_cell(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Returns the cell at `coord`. Absent cells are fully impassable.
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.cells.get(&coord).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        self.cells.iter().map(|(coord, cell)| (*coord, *cell))
    }

    pub fn set_cell(&mut self, coord: CellCoord, cell: Cell) {
        self.cells.insert(coord, cell);
        self.touch(coord);
    }

    /// Writes `cell` to every coordinate of a rectangular plane.
    pub fn fill_plane(
        &mut self,
        elevation: i32,
        xs: RangeInclusive<i32>,
        zs: RangeInclusive<i32>,
        cell: Cell,
    ) {
        for x in xs {
            for z in zs.clone() {
                self.set_cell(CellCoord::new(x, elevation, z), cell);
            }
        }
    }

    pub fn edge(&self, a: CellCoord, b: CellCoord) -> Option<Edge> {
        self.edges.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, Edge)> + '_ {
        self.edges.iter().map(|(key, edge)| (*key, *edge))
    }

    pub fn set_edge(&mut self, a: CellCoord, b: CellCoord, edge: Edge) {
        self.edges.insert(EdgeKey::new(a, b), edge);
        self.touch(a);
        self.mark_dirty(b);
    }

    /// True when an edge exists between `a` and `b` and blocks movement.
    #[inline]
    pub fn blocks_movement(&self, a: CellCoord, b: CellCoord) -> bool {
        self.edges
            .get(&EdgeKey::new(a, b))
            .is_some_and(|edge| edge.blocks_movement)
    }

    /// Adds a link and indexes it from both ends. Links are never removed.
    pub fn add_vertical_link(&mut self, link: VerticalLink) {
        let index = self.links.len();
        self.links.push(link);
        self.link_index.entry(link.lower).or_default().push(index);
        if link.upper != link.lower {
            self.link_index.entry(link.upper).or_default().push(index);
        }
        self.touch(link.lower);
        self.mark_dirty(link.upper);
    }

    pub fn vertical_links(&self) -> &[VerticalLink] {
        &self.links
    }

    /// Links with an end at `coord`.
    pub fn links_at(&self, coord: CellCoord) -> impl Iterator<Item = &VerticalLink> + '_ {
        self.link_index
            .get(&coord)
            .into_iter()
            .flatten()
            .map(|&index| &self.links[index])
    }

    pub fn chunk_coordinate(&self, coord: CellCoord) -> ChunkCoord {
        ChunkCoord::containing(coord, self.config.chunk_size)
    }

    pub fn has_dirty_chunks(&self) -> bool {
        !self.dirty_chunks.is_empty()
    }

    /// Yields and clears the dirty chunk set. The set keeps its capacity, so
    /// steady-state draining does not allocate.
    pub fn drain_dirty_chunks(&mut self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.dirty_chunks.drain()
    }

    fn touch(&mut self, coord: CellCoord) {
        self.version += 1;
        self.mark_dirty(coord);
    }

    fn mark_dirty(&mut self, coord: CellCoord) {
        let chunk = self.chunk_coordinate(coord);
        self.dirty_chunks.insert(chunk);
    }
}
