use tactics_core::grid::LinkKind;
use tactics_core::{
    Cell, CellCoord, CellFlags, Combatant, Edge, EntityId, GridStore, MovementProfile,
    OccupancyMap, OccupancyOracle, Pathfinder, Roster, Team, TerrainKind, VerticalLink,
};

fn open_plane(size: i32) -> GridStore {
    let mut grid = GridStore::default();
    grid.fill_plane(0, 0..=size - 1, 0..=size - 1, Cell::floor());
    grid
}

#[test]
fn diagonal_path_alternates_costs() {
    let grid = open_plane(5);
    let mut pathfinder = Pathfinder::default();

    let path = pathfinder
        .find_path(
            &grid,
            CellCoord::new(0, 0, 0),
            CellCoord::new(2, 0, 2),
            &MovementProfile::default(),
        )
        .expect("open plane is connected");

    assert_eq!(path.cells.len(), 3);
    assert_eq!(path.cost_feet, 15);
    assert_eq!(path.start(), Some(CellCoord::new(0, 0, 0)));
    assert_eq!(path.destination(), Some(CellCoord::new(2, 0, 2)));
}

#[test]
fn walled_corner_forces_two_cardinals() {
    let mut grid = open_plane(3);
    grid.set_edge(CellCoord::new(0, 0, 0), CellCoord::new(1, 0, 0), Edge::wall());
    let mut pathfinder = Pathfinder::default();

    let path = pathfinder
        .find_path(
            &grid,
            CellCoord::new(0, 0, 0),
            CellCoord::new(1, 0, 1),
            &MovementProfile::default(),
        )
        .expect("detour around the corner exists");

    assert_eq!(
        path.cells,
        vec![
            CellCoord::new(0, 0, 0),
            CellCoord::new(0, 0, 1),
            CellCoord::new(1, 0, 1),
        ]
    );
    assert_eq!(path.cost_feet, 10);
}

#[test]
fn path_cost_replays_the_search_result() {
    let mut grid = open_plane(6);
    grid.set_cell(
        CellCoord::new(2, 0, 2),
        Cell::new(TerrainKind::Difficult, CellFlags::WALKABLE),
    );
    let profile = MovementProfile::default();
    let mut pathfinder = Pathfinder::default();

    let path = pathfinder
        .find_path(&grid, CellCoord::new(0, 0, 0), CellCoord::new(5, 0, 4), &profile)
        .expect("reachable");

    let replayed = pathfinder.evaluator().path_cost(&grid, &path.cells, &profile);
    assert_eq!(replayed, Some(path.cost_feet));
}

#[test]
fn cheap_links_are_taken_by_both_searches() {
    let mut grid = GridStore::default();
    grid.fill_plane(0, 0..=10, 0..=1, Cell::floor());
    let ledge = CellCoord::new(10, 1, 0);
    grid.set_cell(ledge, Cell::floor());
    // Both jumps span far more ground than their 5 ft cost.
    grid.add_vertical_link(VerticalLink::new(
        CellCoord::new(0, 0, 1),
        ledge,
        LinkKind::Jumpable,
        5,
    ));
    grid.add_vertical_link(VerticalLink::new(
        CellCoord::new(5, 0, 0),
        ledge,
        LinkKind::Jumpable,
        5,
    ));
    let profile = MovementProfile::default();
    let mut pathfinder = Pathfinder::default();

    let path = pathfinder
        .find_path(&grid, CellCoord::ORIGIN, ledge, &profile)
        .expect("ledge is linked");
    let zone = pathfinder.movement_zone(&grid, CellCoord::ORIGIN, &profile, 60);

    assert_eq!(zone.cost_to(ledge), Some(10));
    assert_eq!(Some(path.cost_feet), zone.cost_to(ledge));
    assert_eq!(path.cells, vec![CellCoord::ORIGIN, CellCoord::new(0, 0, 1), ledge]);

    // Walking back down the far link is cheaper than crossing the plane.
    let back = pathfinder
        .find_path(&grid, CellCoord::new(10, 0, 0), CellCoord::ORIGIN, &profile)
        .expect("plane is connected");
    let from_far_end = pathfinder.movement_zone(&grid, CellCoord::new(10, 0, 0), &profile, 60);
    assert_eq!(Some(back.cost_feet), from_far_end.cost_to(CellCoord::ORIGIN));
}

#[test]
fn grid_writes_invalidate_cached_zone() {
    let mut grid = open_plane(5);
    let profile = MovementProfile::default();
    let mut pathfinder = Pathfinder::default();

    let before = pathfinder.movement_zone(&grid, CellCoord::new(2, 0, 2), &profile, 5);
    assert!(before.contains(CellCoord::new(3, 0, 2)));

    grid.set_cell(
        CellCoord::new(3, 0, 2),
        Cell::new(TerrainKind::Impassable, CellFlags::empty()),
    );
    let after = pathfinder.movement_zone(&grid, CellCoord::new(2, 0, 2), &profile, 5);
    assert_eq!(before.len(), 9);
    // The blocked cell also cuts both diagonals that round it.
    assert!(!after.contains(CellCoord::new(3, 0, 2)));
    assert!(!after.contains(CellCoord::new(3, 0, 1)));
    assert_eq!(after.len(), 6);
}

#[test]
fn allies_are_passable_but_not_stoppable() {
    let grid = open_plane(5);
    let roster: Roster = [
        Combatant::builder(EntityId(1), Team(1))
            .position(CellCoord::new(0, 0, 2))
            .build(),
        Combatant::builder(EntityId(2), Team(1))
            .position(CellCoord::new(1, 0, 2))
            .build(),
    ]
    .into_iter()
    .collect();
    let occupancy = OccupancyMap::from_roster(&roster);
    let profile = MovementProfile::default();
    let mut pathfinder = Pathfinder::default();

    assert!(occupancy.can_traverse(CellCoord::new(1, 0, 2), EntityId(1)));
    assert!(!occupancy.can_stop(CellCoord::new(1, 0, 2), EntityId(1)));

    let zone = pathfinder.movement_zone_with_occupancy(
        &grid,
        CellCoord::new(0, 0, 2),
        &profile,
        10,
        &occupancy,
        EntityId(1),
    );
    assert!(zone.contains(CellCoord::new(0, 0, 2)));
    assert!(!zone.contains(CellCoord::new(1, 0, 2)));
    assert_eq!(zone.cost_to(CellCoord::new(2, 0, 2)), Some(10));

    let path = pathfinder
        .find_path_with_occupancy(
            &grid,
            CellCoord::new(0, 0, 2),
            CellCoord::new(2, 0, 2),
            &profile,
            &occupancy,
            EntityId(1),
        )
        .expect("ally can be walked through");
    assert_eq!(path.cost_feet, 10);
}

#[test]
fn enemy_seals_a_corridor_zone() {
    let mut grid = GridStore::default();
    grid.fill_plane(0, 0..=4, 0..=0, Cell::floor());
    let hero = EntityId(1);
    let mut occupancy = OccupancyMap::new();
    occupancy.place(hero, CellCoord::ORIGIN, 1, Team(1));
    occupancy.place(EntityId(2), CellCoord::new(1, 0, 0), 1, Team(2));
    let mut pathfinder = Pathfinder::default();

    assert!(!occupancy.can_traverse(CellCoord::new(1, 0, 0), hero));
    let zone = pathfinder.movement_zone_with_occupancy(
        &grid,
        CellCoord::ORIGIN,
        &MovementProfile::default(),
        20,
        &occupancy,
        hero,
    );

    assert_eq!(zone.len(), 1);
    assert_eq!(zone.cost_to(CellCoord::ORIGIN), Some(0));
    for x in 1..=4 {
        assert!(!zone.contains(CellCoord::new(x, 0, 0)));
    }
}
