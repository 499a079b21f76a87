//! Weapon catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tactics_core::state::{Weapon, WeaponTraits};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct WeaponCatalogRon {
    weapons: Vec<WeaponRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeaponRon {
    name: String,
    /// Damage dice as `(count, size)`.
    damage: (u8, u8),
    #[serde(default)]
    damage_bonus: i32,
    #[serde(default)]
    potency: i32,
    #[serde(default)]
    striking: u8,
    #[serde(default)]
    reach_feet: Option<u32>,
    #[serde(default)]
    range_increment_feet: Option<u32>,
    #[serde(default)]
    max_increments: Option<u32>,
    #[serde(default)]
    deadly: Option<u8>,
    #[serde(default)]
    traits: WeaponTraits,
}

impl WeaponRon {
    fn into_weapon(self) -> Weapon {
        let (count, size) = self.damage;
        let mut weapon = match self.range_increment_feet {
            Some(increment) => Weapon::ranged(self.name, count, size, increment),
            None => Weapon::melee(self.name, count, size),
        };
        weapon = weapon
            .with_damage_bonus(self.damage_bonus)
            .with_potency(self.potency)
            .with_striking(self.striking)
            .with_traits(self.traits);
        if let Some(reach) = self.reach_feet {
            weapon = weapon.with_reach(reach);
        }
        if let Some(deadly) = self.deadly {
            weapon = weapon.with_deadly(deadly);
        }
        weapon.max_increments = self.max_increments;
        weapon
    }
}

/// Loader for weapon catalogs from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load a weapon catalog from a RON file, keyed by weapon name.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the catalog
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Weapon>> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), weapons = catalog.len(), "loaded weapon catalog");
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Weapon>> {
        let catalog: WeaponCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut weapons = BTreeMap::new();
        for entry in catalog.weapons {
            let (count, size) = entry.damage;
            if count == 0 || size == 0 {
                anyhow::bail!("Weapon '{}' has no damage dice", entry.name);
            }
            let weapon = entry.into_weapon();
            if weapons.contains_key(&weapon.name) {
                anyhow::bail!("Duplicate weapon '{}' in catalog", weapon.name);
            }
            weapons.insert(weapon.name.clone(), weapon);
        }
        Ok(weapons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMORY: &str = r#"
        (
            weapons: [
                (name: "longsword", damage: (1, 8), potency: 1, striking: 1),
                (name: "dagger", damage: (1, 4), traits: "AGILE | FINESSE | THROWN"),
                (name: "pick", damage: (1, 6), deadly: Some(10)),
                (
                    name: "shortbow",
                    damage: (1, 6),
                    range_increment_feet: Some(60),
                    max_increments: Some(4),
                ),
                (name: "glaive", damage: (1, 8), reach_feet: Some(10)),
            ],
        )
    "#;

    #[test]
    fn parses_melee_and_ranged_entries() {
        let weapons = WeaponLoader::parse(ARMORY).unwrap();
        assert_eq!(weapons.len(), 5);

        let longsword = &weapons["longsword"];
        assert_eq!(longsword.damage_dice(), 2);
        assert_eq!(longsword.potency, 1);
        assert!(!longsword.is_ranged());

        assert!(weapons["dagger"].traits.contains(WeaponTraits::AGILE | WeaponTraits::THROWN));
        assert_eq!(weapons["pick"].deadly_die, Some(10));
        assert_eq!(weapons["glaive"].reach_feet, 10);

        let bow = &weapons["shortbow"];
        assert!(bow.is_ranged());
        assert_eq!(bow.range_increment_feet, Some(60));
        assert_eq!(bow.max_increments, Some(4));
    }

    #[test]
    fn rejects_duplicates() {
        let err = WeaponLoader::parse(
            r#"(weapons: [(name: "club", damage: (1, 6)), (name: "club", damage: (1, 4))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate weapon 'club'"));
    }

    #[test]
    fn rejects_diceless_weapons() {
        let err = WeaponLoader::parse(r#"(weapons: [(name: "stick", damage: (0, 6))])"#)
            .unwrap_err();
        assert!(err.to_string().contains("no damage dice"));
    }
}
