//! Damage rolls and application.

use crate::env::DiceRoller;
use crate::state::{Combatant, Weapon};

/// A rolled weapon damage total with its parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Number of weapon dice rolled (striking runes included).
    pub dice: u32,
    pub die_size: u8,
    /// Sum of the weapon dice faces.
    pub dice_total: u32,
    /// Weapon damage bonus plus ability modifier.
    pub flat_bonus: i32,
    pub critical: bool,
    /// Extra die from the deadly trait, rolled only on a critical.
    pub deadly_total: u32,
    pub total: u32,
}

/// Roll weapon damage.
///
/// # Formula
///
/// ```text
/// base  = max(sum(dice x (1 + striking)) + flat bonus, 1)
/// total = base                          (hit)
/// total = base * 2 + deadly die         (critical)
/// ```
///
/// # Arguments
///
/// * `dice` - Injected roller
/// * `weapon` - Weapon supplying dice, striking, and deadly
/// * `ability_bonus` - Ability modifier added to damage (Strength for melee and thrown)
/// * `critical` - Whether the strike was a critical success
pub fn roll_weapon_damage<D: DiceRoller + ?Sized>(
    dice: &mut D,
    weapon: &Weapon,
    ability_bonus: i32,
    critical: bool,
) -> DamageRoll {
    let count = weapon.damage_dice();
    let dice_total = dice.roll_dice(count, u32::from(weapon.die_size));
    let flat_bonus = weapon.damage_bonus + ability_bonus;
    let base = (dice_total as i32 + flat_bonus).max(1) as u32;

    let (total, deadly_total) = if critical {
        let deadly = weapon
            .deadly_die
            .map_or(0, |size| dice.roll_die(u32::from(size)));
        (base * 2 + deadly, deadly)
    } else {
        (base, 0)
    };

    DamageRoll {
        dice: count,
        die_size: weapon.die_size,
        dice_total,
        flat_bonus,
        critical,
        deadly_total,
        total,
    }
}

/// HP change produced by [`apply_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageApplied {
    pub dealt: u32,
    pub remaining_hp: u32,
    /// HP reached zero with this application.
    pub defeated: bool,
}

/// Apply damage to current HP (clamped to 0).
pub fn apply_damage(target: &mut Combatant, amount: u32) -> DamageApplied {
    let was_alive = target.is_alive();
    let dealt = target.hp.reduce(amount);
    DamageApplied {
        dealt,
        remaining_hp: target.hp.current,
        defeated: was_alive && !target.is_alive(),
    }
}
