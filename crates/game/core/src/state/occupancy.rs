use std::collections::HashMap;

use super::{Disposition, EntityId, Roster, Team};
use crate::env::OccupancyOracle;
use crate::grid::CellCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Occupant {
    anchor: CellCoord,
    size: u8,
    team: Team,
}

impl Occupant {
    fn cells(self) -> impl Iterator<Item = CellCoord> {
        footprint(self.anchor, self.size)
    }
}

fn footprint(anchor: CellCoord, size: u8) -> impl Iterator<Item = CellCoord> {
    let size = i32::from(size.max(1));
    (0..size).flat_map(move |dx| (0..size).map(move |dz| anchor.offset(dx, dz)))
}

/// Cell occupancy with multi-cell footprints and team dispositions.
///
/// Allies and neutrals can be passed through but not shared; enemies block.
#[derive(Clone, Debug, Default)]
pub struct OccupancyMap {
    cells: HashMap<CellCoord, EntityId>,
    occupants: HashMap<EntityId, Occupant>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from every living combatant.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut map = Self::new();
        for combatant in roster.iter().filter(|c| c.is_alive()) {
            map.place(combatant.id, combatant.position, combatant.size_cells, combatant.team);
        }
        map
    }

    /// Places `entity`, replacing any previous placement.
    pub fn place(&mut self, entity: EntityId, anchor: CellCoord, size: u8, team: Team) {
        self.remove(entity);
        let occupant = Occupant { anchor, size, team };
        for cell in occupant.cells() {
            self.cells.insert(cell, entity);
        }
        self.occupants.insert(entity, occupant);
    }

    pub fn remove(&mut self, entity: EntityId) {
        if let Some(previous) = self.occupants.remove(&entity) {
            for cell in previous.cells() {
                if self.cells.get(&cell) == Some(&entity) {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Moves a placed entity. Returns false when `entity` is not placed.
    pub fn move_to(&mut self, entity: EntityId, anchor: CellCoord) -> bool {
        let Some(occupant) = self.occupants.get(&entity).copied() else {
            return false;
        };
        self.place(entity, anchor, occupant.size, occupant.team);
        true
    }

    pub fn occupant_at(&self, cell: CellCoord) -> Option<EntityId> {
        self.cells.get(&cell).copied()
    }

    fn mover(&self, mover: EntityId) -> (u8, Option<Team>) {
        self.occupants
            .get(&mover)
            .map_or((1, None), |o| (o.size, Some(o.team)))
    }

    fn disposition(&self, mover_team: Option<Team>, other: EntityId) -> Disposition {
        match (mover_team, self.occupants.get(&other)) {
            (Some(mine), Some(theirs)) => mine.disposition_towards(theirs.team),
            _ => Disposition::Enemy,
        }
    }
}

impl OccupancyOracle for OccupancyMap {
    fn can_traverse(&self, anchor: CellCoord, mover: EntityId) -> bool {
        let (size, team) = self.mover(mover);
        footprint(anchor, size).all(|cell| match self.occupant_at(cell) {
            None => true,
            Some(other) if other == mover => true,
            Some(other) => self.disposition(team, other) != Disposition::Enemy,
        })
    }

    fn can_stop(&self, anchor: CellCoord, mover: EntityId) -> bool {
        let (size, _) = self.mover(mover);
        footprint(anchor, size).all(|cell| {
            self.occupant_at(cell)
                .is_none_or(|other| other == mover)
        })
    }
}
