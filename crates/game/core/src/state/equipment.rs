//! Weapons, armor, and shields carried by a combatant.
//!
//! Equipment is plain data; the strike resolver reads it to compose attack
//! bonuses and damage, and the reaction service reads the shield state.

use bitflags::bitflags;

use super::ResourceMeter;

bitflags! {
    /// Weapon traits that change how strikes are resolved.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WeaponTraits: u8 {
        /// Reduced multiple-attack penalty (-4/-8).
        const AGILE   = 1 << 0;
        /// Melee attack may use Dexterity instead of Strength.
        const FINESSE = 1 << 1;
        /// Adds Strength to damage even when ranged.
        const THROWN  = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub dice_count: u8,
    pub die_size: u8,
    /// Flat item bonus to damage, added before the ability modifier.
    pub damage_bonus: i32,
    /// Item bonus to attack rolls.
    pub potency: i32,
    /// Striking rune tier: 0 none, 1 striking, 2 greater, 3 major.
    pub striking: u8,
    /// Melee reach in feet.
    pub reach_feet: u32,
    /// Present for ranged weapons.
    pub range_increment_feet: Option<u32>,
    /// Overrides the default maximum number of range increments.
    pub max_increments: Option<u32>,
    /// Die size of the deadly trait, when present.
    pub deadly_die: Option<u8>,
    pub traits: WeaponTraits,
}

impl Weapon {
    pub const DEFAULT_REACH_FEET: u32 = 5;

    pub fn melee(name: impl Into<String>, dice_count: u8, die_size: u8) -> Self {
        Self {
            name: name.into(),
            dice_count,
            die_size,
            damage_bonus: 0,
            potency: 0,
            striking: 0,
            reach_feet: Self::DEFAULT_REACH_FEET,
            range_increment_feet: None,
            max_increments: None,
            deadly_die: None,
            traits: WeaponTraits::empty(),
        }
    }

    pub fn ranged(name: impl Into<String>, dice_count: u8, die_size: u8, increment: u32) -> Self {
        Self {
            range_increment_feet: Some(increment),
            ..Self::melee(name, dice_count, die_size)
        }
    }

    pub fn with_potency(mut self, potency: i32) -> Self {
        self.potency = potency;
        self
    }

    pub fn with_striking(mut self, striking: u8) -> Self {
        self.striking = striking;
        self
    }

    pub fn with_damage_bonus(mut self, bonus: i32) -> Self {
        self.damage_bonus = bonus;
        self
    }

    pub fn with_deadly(mut self, die_size: u8) -> Self {
        self.deadly_die = Some(die_size);
        self
    }

    pub fn with_reach(mut self, reach_feet: u32) -> Self {
        self.reach_feet = reach_feet;
        self
    }

    pub fn with_traits(mut self, traits: WeaponTraits) -> Self {
        self.traits |= traits;
        self
    }

    pub fn is_ranged(&self) -> bool {
        self.range_increment_feet.is_some()
    }

    /// Weapon dice are multiplied by `1 + striking`.
    pub fn damage_dice(&self) -> u32 {
        u32::from(self.dice_count) * (1 + u32::from(self.striking))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    /// Item bonus to AC, including potency runes.
    pub ac_bonus: i32,
    /// Maximum Dexterity modifier applied to AC.
    pub dex_cap: Option<i32>,
}

impl Armor {
    pub const fn new(ac_bonus: i32, dex_cap: Option<i32>) -> Self {
        Self { ac_bonus, dex_cap }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    /// Circumstance bonus to AC while raised.
    pub ac_bonus: i32,
    pub hardness: u32,
    pub hp: ResourceMeter,
    pub broken_threshold: u32,
    pub raised: bool,
}

impl Shield {
    pub fn new(hardness: u32, max_hp: u32, broken_threshold: u32) -> Self {
        Self {
            ac_bonus: 2,
            hardness,
            hp: ResourceMeter::full(max_hp),
            broken_threshold,
            raised: false,
        }
    }

    pub fn raised(mut self) -> Self {
        self.raised = true;
        self
    }

    pub fn is_broken(&self) -> bool {
        self.hp.current <= self.broken_threshold
    }

    /// Raised and not broken.
    pub fn can_block(&self) -> bool {
        self.raised && !self.is_broken()
    }
}

/// Equipment slots of a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    pub shield: Option<Shield>,
}

impl Equipment {
    /// Equips a weapon, returning the previously equipped one if any.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Equips armor, returning the previously equipped armor if any.
    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.armor.replace(armor)
    }

    /// Equips a shield, returning the previously equipped shield if any.
    pub fn equip_shield(&mut self, shield: Shield) -> Option<Shield> {
        self.shield.replace(shield)
    }

    /// Raises the equipped shield. Returns false when no usable shield is held.
    pub fn raise_shield(&mut self) -> bool {
        match self.shield.as_mut() {
            Some(shield) if !shield.is_broken() => {
                shield.raised = true;
                true
            }
            _ => false,
        }
    }

    pub fn lower_shield(&mut self) {
        if let Some(shield) = self.shield.as_mut() {
            shield.raised = false;
        }
    }
}
