use std::path::PathBuf;

use tactics_content::{ConfigLoader, MapLoader, WeaponLoader};
use tactics_core::state::WeaponTraits;
use tactics_core::{CellCoord, GameConfig, MovementProfile, Pathfinder};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn shipped_rules_match_defaults() {
    let config = ConfigLoader::load(&data_dir().join("rules.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn watchtower_platform_is_reached_by_ladder() {
    let grid = MapLoader::load(&data_dir().join("maps/watchtower.ron")).unwrap();
    let mut pathfinder = Pathfinder::default();

    let path = pathfinder
        .find_path(
            &grid,
            CellCoord::new(0, 0, 9),
            CellCoord::new(9, 1, 2),
            &MovementProfile::default(),
        )
        .expect("ladder connects the courtyard to the platform");

    let ladder = path
        .cells
        .windows(2)
        .position(|pair| pair == [CellCoord::new(9, 0, 4), CellCoord::new(9, 1, 3)]);
    assert!(ladder.is_some());
}

#[test]
fn shipped_weapons_load() {
    let weapons = WeaponLoader::load(&data_dir().join("weapons.ron")).unwrap();
    assert!(weapons["dagger"].traits.contains(WeaponTraits::THROWN));
    assert!(weapons["longbow"].is_ranged());
}
