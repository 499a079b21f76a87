//! The single mutation surface for conditions, plus penalty stacking rules.

use crate::config::RuleConstants;
use crate::state::{ActiveCondition, ActiveConditions, ConditionKind, EntityId, Roster};

/// Kind of change recorded by a [`ConditionDelta`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionChange {
    Added,
    ValueChanged,
    DurationChanged,
    Removed,
}

/// Immutable record of one condition change, for the caller to publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionDelta {
    pub entity: EntityId,
    pub kind: ConditionKind,
    pub change: ConditionChange,
    pub old_value: u8,
    pub new_value: u8,
    pub old_rounds: Option<u8>,
    pub new_rounds: Option<u8>,
}

/// Applies, removes, and ticks conditions on roster members.
///
/// Unknown entities are ignored. Every change is appended to the caller's
/// delta buffer in the order it happened.
#[derive(Clone, Copy, Debug)]
pub struct ConditionService {
    actions_per_turn: u8,
}

impl Default for ConditionService {
    fn default() -> Self {
        Self::new(&RuleConstants::default())
    }
}

/// Longer of two durations; `None` is indefinite and wins.
fn longer(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}

impl ConditionService {
    pub fn new(rules: &RuleConstants) -> Self {
        Self {
            actions_per_turn: rules.actions_per_turn,
        }
    }

    /// Adds `kind` or raises an existing instance.
    ///
    /// Re-application never lowers a value. Boolean conditions always carry 1;
    /// a valued condition applied with 0 is a no-op.
    pub fn apply(
        &self,
        roster: &mut Roster,
        entity: EntityId,
        kind: ConditionKind,
        value: u8,
        rounds: Option<u8>,
        out: &mut Vec<ConditionDelta>,
    ) {
        let value = if kind.is_valued() { value } else { 1 };
        if value == 0 {
            return;
        }
        let Some(combatant) = roster.get_mut(entity) else {
            return;
        };
        let conditions = combatant.conditions_mut();

        if let Some(existing) = conditions.get_mut(kind) {
            let old = *existing;
            existing.value = old.value.max(value);
            existing.remaining_rounds = longer(old.remaining_rounds, rounds);
            let change = if existing.value != old.value {
                ConditionChange::ValueChanged
            } else if existing.remaining_rounds != old.remaining_rounds {
                ConditionChange::DurationChanged
            } else {
                return;
            };
            record(out, entity, change, Some(old), Some(*existing), kind);
            return;
        }

        let condition = ActiveCondition {
            kind,
            value,
            remaining_rounds: rounds,
        };
        if !conditions.push(condition) {
            tracing::warn!(%entity, %kind, "condition list full; condition dropped");
            return;
        }
        record(out, entity, ConditionChange::Added, None, Some(condition), kind);
    }

    /// Removes every instance of `kind`.
    pub fn remove(
        &self,
        roster: &mut Roster,
        entity: EntityId,
        kind: ConditionKind,
        out: &mut Vec<ConditionDelta>,
    ) {
        let Some(combatant) = roster.get_mut(entity) else {
            return;
        };
        for removed in combatant.conditions_mut().remove_all(kind) {
            record(out, entity, ConditionChange::Removed, Some(removed), None, kind);
        }
    }

    /// Start of `entity`'s turn: restores the action economy, then loses
    /// the Slowed and Stunned values in actions, floored at zero. Stunned is
    /// cleared entirely once it has been paid.
    pub fn tick_start_turn(
        &self,
        roster: &mut Roster,
        entity: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) {
        let Some(combatant) = roster.get_mut(entity) else {
            return;
        };
        combatant.economy.reset(self.actions_per_turn);

        let slowed = combatant.conditions().value(ConditionKind::Slowed);
        let stunned = combatant.conditions().value(ConditionKind::Stunned);
        let economy = &mut combatant.economy;
        economy.actions = economy.actions.saturating_sub(slowed.saturating_add(stunned));

        if stunned == 0 {
            return;
        }
        for removed in combatant.conditions_mut().remove_all(ConditionKind::Stunned) {
            record(out, entity, ConditionChange::Removed, Some(removed), None, removed.kind);
        }
    }

    /// End of `entity`'s turn: auto-decrementing conditions drop by one and
    /// timed conditions lose a round; either reaching zero removes the
    /// condition.
    pub fn tick_end_turn(
        &self,
        roster: &mut Roster,
        entity: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) {
        let Some(combatant) = roster.get_mut(entity) else {
            return;
        };
        let conditions = combatant.conditions_mut();

        for kind in conditions.kinds() {
            let Some(current) = conditions.get_mut(kind) else {
                continue;
            };
            let old = *current;
            let value = if kind.auto_decrements() {
                old.value.saturating_sub(1)
            } else {
                old.value
            };
            let rounds = old.remaining_rounds.map(|r| r.saturating_sub(1));

            if value == 0 || rounds == Some(0) {
                for removed in conditions.remove_all(kind) {
                    record(out, entity, ConditionChange::Removed, Some(removed), None, kind);
                }
                continue;
            }

            current.value = value;
            current.remaining_rounds = rounds;
            let change = if value != old.value {
                ConditionChange::ValueChanged
            } else if rounds != old.remaining_rounds {
                ConditionChange::DurationChanged
            } else {
                continue;
            };
            let new = *current;
            record(out, entity, change, Some(old), Some(new), kind);
        }
    }
}

fn record(
    out: &mut Vec<ConditionDelta>,
    entity: EntityId,
    change: ConditionChange,
    old: Option<ActiveCondition>,
    new: Option<ActiveCondition>,
    kind: ConditionKind,
) {
    let delta = ConditionDelta {
        entity,
        kind,
        change,
        old_value: old.map_or(0, |c| c.value),
        new_value: new.map_or(0, |c| c.value),
        old_rounds: old.and_then(|c| c.remaining_rounds),
        new_rounds: new.and_then(|c| c.remaining_rounds),
    };
    tracing::trace!(?delta, "condition delta");
    out.push(delta);
}

/// Penalty stacking.
///
/// Status penalties (Frightened, Sickened) do not stack: the larger applies.
/// Circumstance penalties to AC (Off-Guard, Prone) collapse to a single -2.
/// Values are returned as positive magnitudes to subtract.
pub struct ConditionRules;

impl ConditionRules {
    pub const CIRCUMSTANCE_PENALTY: i32 = 2;

    pub fn status_penalty(conditions: &ActiveConditions) -> i32 {
        let frightened = conditions.value(ConditionKind::Frightened);
        let sickened = conditions.value(ConditionKind::Sickened);
        i32::from(frightened.max(sickened))
    }

    pub fn circumstance_ac_penalty(conditions: &ActiveConditions) -> i32 {
        if conditions.has(ConditionKind::OffGuard) || conditions.has(ConditionKind::Prone) {
            Self::CIRCUMSTANCE_PENALTY
        } else {
            0
        }
    }

    /// Penalty to attack rolls. Prone attackers take an extra -2.
    pub fn attack_penalty(conditions: &ActiveConditions) -> i32 {
        let prone = if conditions.has(ConditionKind::Prone) {
            Self::CIRCUMSTANCE_PENALTY
        } else {
            0
        };
        Self::status_penalty(conditions) + prone
    }

    pub fn ac_penalty(conditions: &ActiveConditions) -> i32 {
        Self::status_penalty(conditions) + Self::circumstance_ac_penalty(conditions)
    }

    /// Penalty to skill checks, saves, and perception.
    pub fn check_penalty(conditions: &ActiveConditions) -> i32 {
        Self::status_penalty(conditions)
    }

    /// Penalty to DCs derived from this combatant's modifiers.
    pub fn dc_penalty(conditions: &ActiveConditions) -> i32 {
        Self::status_penalty(conditions)
    }
}
