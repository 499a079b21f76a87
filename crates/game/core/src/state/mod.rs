//! Entity-side data consumed by the rules engine.
//!
//! The rules services read combatants through a [`Roster`] and mutate
//! conditions only through their own entry points; everything else here is
//! plain data.
mod abilities;
mod combatant;
mod common;
mod conditions;
mod equipment;
mod occupancy;

pub use abilities::{Ability, AbilityScores, Proficiencies, ProficiencyRank, Save, Skill};
pub use combatant::{ActionEconomy, Combatant, CombatantBuilder, Roster};
pub use common::{Disposition, EntityId, ResourceMeter, Team};
pub use conditions::{ActiveCondition, ActiveConditions, ConditionKind};
pub use equipment::{Armor, Equipment, Shield, Weapon, WeaponTraits};
pub use occupancy::OccupancyMap;
