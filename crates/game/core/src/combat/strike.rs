//! Strike legality and resolution.

use super::damage::{DamageRoll, roll_weapon_damage};
use super::hit::{armor_class, multiple_attack_penalty, range_penalty};
use crate::config::{GameConfig, GridConfig};
use crate::env::DiceRoller;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{CellCoord, distance_feet};
use crate::rules::{CheckResult, CheckSource, ConditionRules, DegreeOfSuccess};
use crate::state::{Ability, Combatant, EntityId, Roster, Weapon, WeaponTraits};

/// Reasons a strike cannot be attempted. No dice are rolled for any of them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeFailure {
    #[error("combatant {0} not found")]
    UnknownCombatant(EntityId),

    #[error("attacker {0} is dead")]
    AttackerDead(EntityId),

    #[error("target {0} is dead")]
    TargetDead(EntityId),

    #[error("{attacker} and {target} are on the same team")]
    SameTeam { attacker: EntityId, target: EntityId },

    #[error("melee strike across elevations {attacker} and {target}")]
    ElevationMismatch { attacker: i32, target: i32 },

    #[error("target is {distance_feet} ft away, reach is {reach_feet} ft")]
    OutOfReach { distance_feet: u32, reach_feet: u32 },

    #[error("target is {distance_feet} ft away, maximum range is {max_range_feet} ft")]
    OutOfRange {
        distance_feet: u32,
        max_range_feet: u32,
    },
}

impl GameError for StrikeFailure {
    fn severity(&self) -> ErrorSeverity {
        use StrikeFailure::*;
        match self {
            // positions change between turns
            ElevationMismatch { .. } | OutOfReach { .. } | OutOfRange { .. } => {
                ErrorSeverity::Recoverable
            }
            AttackerDead(_) | TargetDead(_) | SameTeam { .. } => ErrorSeverity::Validation,
            UnknownCombatant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StrikeFailure::*;
        match self {
            UnknownCombatant(_) => "STRIKE_UNKNOWN_COMBATANT",
            AttackerDead(_) => "STRIKE_ATTACKER_DEAD",
            TargetDead(_) => "STRIKE_TARGET_DEAD",
            SameTeam { .. } => "STRIKE_SAME_TEAM",
            ElevationMismatch { .. } => "STRIKE_ELEVATION_MISMATCH",
            OutOfReach { .. } => "STRIKE_OUT_OF_REACH",
            OutOfRange { .. } => "STRIKE_OUT_OF_RANGE",
        }
    }
}

/// Outcome of a legal strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeResult {
    pub attacker: EntityId,
    pub target: EntityId,
    /// Attack roll against the target's AC.
    pub check: CheckResult,
    pub distance_feet: u32,
    pub multiple_attack_penalty: i32,
    pub range_penalty: i32,
    /// Present on success and critical success.
    pub damage: Option<DamageRoll>,
}

impl StrikeResult {
    pub fn is_hit(&self) -> bool {
        self.check.is_success()
    }
}

/// Resolves strikes between combatants.
#[derive(Clone, Copy, Debug)]
pub struct StrikeResolver {
    grid: GridConfig,
    max_range_increments: u32,
}

impl Default for StrikeResolver {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

fn unarmed() -> Weapon {
    Weapon::melee("fist", 1, 4).with_traits(WeaponTraits::AGILE)
}

/// Shortest alternating-diagonal distance between two square footprints.
fn footprint_distance(attacker: &Combatant, target: &Combatant, grid: &GridConfig) -> u32 {
    let cells = |anchor: CellCoord, size: u8| {
        let size = i32::from(size.max(1));
        (0..size).flat_map(move |dx| (0..size).map(move |dz| anchor.offset(dx, dz)))
    };
    cells(attacker.position, attacker.size_cells)
        .flat_map(|a| {
            cells(target.position, target.size_cells).map(move |b| distance_feet(a, b, grid))
        })
        .min()
        .unwrap_or(0)
}

impl StrikeResolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            grid: config.grid,
            max_range_increments: config.rules.max_range_increments,
        }
    }

    /// Checks legality, rolls the attack against AC, and rolls damage on a hit.
    ///
    /// When `require_same_elevation` is set, melee strikes between different
    /// elevation layers are rejected. The attacker's multiple-attack penalty is
    /// read but not advanced; see [`perform_strike`].
    pub fn resolve_strike<D: DiceRoller + ?Sized>(
        &self,
        attacker: &Combatant,
        target: &Combatant,
        require_same_elevation: bool,
        dice: &mut D,
    ) -> Result<StrikeResult, StrikeFailure> {
        if !attacker.is_alive() {
            return Err(StrikeFailure::AttackerDead(attacker.id));
        }
        if !target.is_alive() {
            return Err(StrikeFailure::TargetDead(target.id));
        }
        if attacker.team == target.team {
            return Err(StrikeFailure::SameTeam {
                attacker: attacker.id,
                target: target.id,
            });
        }

        let fist;
        let weapon = match attacker.weapon() {
            Some(weapon) => weapon,
            None => {
                fist = unarmed();
                &fist
            }
        };

        let distance = footprint_distance(attacker, target, &self.grid);
        let range = match weapon.range_increment_feet {
            Some(increment) => {
                let max_increments = weapon.max_increments.unwrap_or(self.max_range_increments);
                range_penalty(distance, increment, max_increments).ok_or(
                    StrikeFailure::OutOfRange {
                        distance_feet: distance,
                        max_range_feet: increment * max_increments,
                    },
                )?
            }
            None => {
                if require_same_elevation && attacker.position.y != target.position.y {
                    return Err(StrikeFailure::ElevationMismatch {
                        attacker: attacker.position.y,
                        target: target.position.y,
                    });
                }
                if distance > weapon.reach_feet {
                    return Err(StrikeFailure::OutOfReach {
                        distance_feet: distance,
                        reach_feet: weapon.reach_feet,
                    });
                }
                0
            }
        };

        let map = multiple_attack_penalty(
            attacker.economy.attacks_this_turn,
            weapon.traits.contains(WeaponTraits::AGILE),
        );
        let modifier = attacker.strike_bonus() + map + range
            - ConditionRules::attack_penalty(attacker.conditions());
        let natural = dice.roll_d20();
        let check = CheckResult::new(CheckSource::Strike, natural, modifier, armor_class(target));

        let damage = check.is_success().then(|| {
            let adds_strength = !weapon.is_ranged() || weapon.traits.contains(WeaponTraits::THROWN);
            let ability = if adds_strength {
                attacker.ability_modifier(Ability::Strength)
            } else {
                0
            };
            roll_weapon_damage(
                dice,
                weapon,
                ability,
                check.degree == DegreeOfSuccess::CriticalSuccess,
            )
        });

        tracing::debug!(
            attacker = %attacker.id,
            target = %target.id,
            natural,
            total = check.total,
            ac = check.dc,
            degree = %check.degree,
            damage = damage.map(|d| d.total),
            "strike resolved"
        );

        Ok(StrikeResult {
            attacker: attacker.id,
            target: target.id,
            check,
            distance_feet: distance,
            multiple_attack_penalty: map,
            range_penalty: range,
            damage,
        })
    }
}

/// Resolves a strike between roster members and records the attack for the
/// multiple-attack penalty. Damage is not applied, so reactions such as
/// Shield Block can run first.
pub fn perform_strike<D: DiceRoller + ?Sized>(
    resolver: &StrikeResolver,
    dice: &mut D,
    roster: &mut Roster,
    attacker: EntityId,
    target: EntityId,
    require_same_elevation: bool,
) -> Result<StrikeResult, StrikeFailure> {
    let result = {
        let striker = roster
            .get(attacker)
            .ok_or(StrikeFailure::UnknownCombatant(attacker))?;
        let defender = roster
            .get(target)
            .ok_or(StrikeFailure::UnknownCombatant(target))?;
        resolver.resolve_strike(striker, defender, require_same_elevation, dice)?
    };
    if let Some(striker) = roster.get_mut(attacker) {
        striker.economy.record_attack();
    }
    Ok(result)
}
