//! Strike resolution.
//!
//! Legality checks, attack roll composition, damage rolls, and damage
//! application. Everything here takes combatants by reference and dice by
//! injection; the only mutating entry points are [`perform_strike`],
//! [`apply_damage`], and [`shield_block`].
//!
//! # Core Functions
//!
//! - `StrikeResolver::resolve_strike`: legality, attack roll, degree, damage
//! - `armor_class`: AC composition including condition penalties
//! - `roll_weapon_damage`: weapon dice, striking runes, critical doubling, deadly
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `shield_block`: hardness reduction and shield damage

pub mod damage;
pub mod hit;
pub mod shield;
pub mod strike;

pub use damage::{DamageApplied, DamageRoll, apply_damage, roll_weapon_damage};
pub use hit::{armor_class, multiple_attack_penalty, range_penalty};
pub use shield::{ShieldBlockOutcome, shield_block};
pub use strike::{StrikeFailure, StrikeResolver, StrikeResult, perform_strike};
