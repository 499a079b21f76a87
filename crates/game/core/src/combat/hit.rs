//! Attack roll and armor class composition.

use crate::rules::ConditionRules;
use crate::state::{Ability, Combatant};

/// Multiple-attack penalty for the next attack this turn.
///
/// # Formula
///
/// ```text
/// first attack:   0
/// second attack: -5 (agile -4)
/// later attacks: -10 (agile -8)
/// ```
pub fn multiple_attack_penalty(attacks_this_turn: u8, agile: bool) -> i32 {
    match (attacks_this_turn, agile) {
        (0, _) => 0,
        (1, false) => -5,
        (1, true) => -4,
        (_, false) => -10,
        (_, true) => -8,
    }
}

/// Range penalty for a ranged attack, or `None` beyond the maximum range.
///
/// # Formula
///
/// ```text
/// increments = (distance - 1) / increment
/// penalty    = -2 * increments
/// ```
///
/// The first increment is penalty free, including its far edge. Attacks
/// with `increments >= max_increments` are out of range.
pub fn range_penalty(distance_feet: u32, increment_feet: u32, max_increments: u32) -> Option<i32> {
    let increments = distance_feet.saturating_sub(1) / increment_feet.max(1);
    if increments >= max_increments {
        return None;
    }
    Some(-2 * increments as i32)
}

/// Armor class of `combatant` after condition penalties.
///
/// # Formula
///
/// ```text
/// 10 + min(dex, armor cap) + defense proficiency + armor bonus
///    + raised shield bonus - status penalty - circumstance penalty
/// ```
pub fn armor_class(combatant: &Combatant) -> i32 {
    let equipment = &combatant.equipment;
    let dexterity = combatant.ability_modifier(Ability::Dexterity);
    let (armor_bonus, dexterity) = match equipment.armor {
        Some(armor) => (
            armor.ac_bonus,
            armor.dex_cap.map_or(dexterity, |cap| dexterity.min(cap)),
        ),
        None => (0, dexterity),
    };
    let shield_bonus = equipment
        .shield
        .filter(|shield| shield.can_block())
        .map_or(0, |shield| shield.ac_bonus);

    10 + dexterity
        + combatant.proficiencies.defense.bonus(combatant.level)
        + armor_bonus
        + shield_bonus
        - ConditionRules::ac_penalty(combatant.conditions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AbilityScores, Armor, Equipment, EntityId, Shield, Team};

    #[test]
    fn agile_weapons_reduce_the_penalty() {
        assert_eq!(multiple_attack_penalty(0, false), 0);
        assert_eq!(multiple_attack_penalty(1, false), -5);
        assert_eq!(multiple_attack_penalty(1, true), -4);
        assert_eq!(multiple_attack_penalty(4, false), -10);
        assert_eq!(multiple_attack_penalty(2, true), -8);
    }

    #[test]
    fn first_increment_is_free() {
        assert_eq!(range_penalty(60, 60, 6), Some(0));
        assert_eq!(range_penalty(61, 60, 6), Some(-2));
        assert_eq!(range_penalty(360, 60, 6), Some(-10));
        assert_eq!(range_penalty(361, 60, 6), None);
    }

    #[test]
    fn armor_caps_dexterity_and_shield_counts_when_raised() {
        let mut equipment = Equipment::default();
        equipment.equip_armor(Armor::new(4, Some(1)));
        equipment.equip_shield(Shield::new(5, 20, 10).raised());
        let knight = Combatant::builder(EntityId(1), Team(1))
            .abilities(AbilityScores::new(16, 16, 12, 10, 10, 10))
            .equipment(equipment)
            .build();
        // 10 + 1 (capped) + 3 (trained, level 1) + 4 + 2
        assert_eq!(armor_class(&knight), 20);
    }
}
