use super::{
    CheckResult, CheckSource, ConditionDelta, ConditionRules, ConditionService, DegreeOfSuccess,
    roll_check,
};
use crate::combat::multiple_attack_penalty;
use crate::env::DiceRoller;
use crate::state::{ConditionKind, EntityId, Roster, Save, Skill};

/// Strength of a grapple hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoldState {
    Grabbed,
    Restrained,
}

impl HoldState {
    pub fn condition(self) -> ConditionKind {
        match self {
            Self::Grabbed => ConditionKind::Grabbed,
            Self::Restrained => ConditionKind::Restrained,
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Grabbed => Self::Restrained,
            Self::Restrained => Self::Grabbed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrappleRelation {
    pub grappler: EntityId,
    pub target: EntityId,
    pub hold: HoldState,
    /// Grappler end-of-turn ticks left before the hold lapses.
    pub turns_remaining: u8,
}

/// Active grapples, at most one per grappler and one per target.
///
/// The hold condition on the target is applied and removed through the
/// [`ConditionService`], so its deltas land in the same buffer.
#[derive(Clone, Debug, Default)]
pub struct GrappleService {
    conditions: ConditionService,
    relations: Vec<GrappleRelation>,
}

impl GrappleService {
    /// A successful grapple lasts until the end of the grappler's next turn.
    pub const DEFAULT_DURATION_TURNS: u8 = 2;

    pub fn new(conditions: ConditionService) -> Self {
        Self {
            conditions,
            relations: Vec::new(),
        }
    }

    pub fn relations(&self) -> &[GrappleRelation] {
        &self.relations
    }

    pub fn relation_of(&self, grappler: EntityId) -> Option<&GrappleRelation> {
        self.relations.iter().find(|r| r.grappler == grappler)
    }

    pub fn holder_of(&self, target: EntityId) -> Option<EntityId> {
        self.relations
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.grappler)
    }

    /// Creates or refreshes the hold of `grappler` on `target`.
    ///
    /// Relations touching either party are released first. The target ends
    /// with exactly the condition matching `hold`.
    pub fn apply_or_refresh(
        &mut self,
        roster: &mut Roster,
        grappler: EntityId,
        target: EntityId,
        hold: HoldState,
        turns: u8,
        out: &mut Vec<ConditionDelta>,
    ) {
        if grappler == target || !roster.contains(grappler) || !roster.contains(target) {
            return;
        }

        let conflicting: Vec<GrappleRelation> = self
            .relations
            .iter()
            .filter(|r| {
                (r.grappler == grappler || r.target == target)
                    && !(r.grappler == grappler && r.target == target)
            })
            .copied()
            .collect();
        for relation in conflicting {
            self.release(roster, relation, out);
        }

        if let Some(existing) = self
            .relations
            .iter_mut()
            .find(|r| r.grappler == grappler && r.target == target)
        {
            existing.hold = hold;
            existing.turns_remaining = turns;
        } else {
            self.relations.push(GrappleRelation {
                grappler,
                target,
                hold,
                turns_remaining: turns,
            });
        }

        self.conditions
            .remove(roster, target, hold.other().condition(), out);
        self.conditions
            .apply(roster, target, hold.condition(), 1, None, out);
        tracing::debug!(%grappler, %target, %hold, turns, "grapple applied");
    }

    /// Releases the hold of `grappler` on `target`, if that exact pair exists.
    pub fn release_exact(
        &mut self,
        roster: &mut Roster,
        grappler: EntityId,
        target: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) -> bool {
        let found = self
            .relations
            .iter()
            .find(|r| r.grappler == grappler && r.target == target)
            .copied();
        match found {
            Some(relation) => {
                self.release(roster, relation, out);
                true
            }
            None => false,
        }
    }

    /// Releases every hold on `target`. Returns how many were released.
    pub fn release_by_target(
        &mut self,
        roster: &mut Roster,
        target: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) -> usize {
        self.release_where(roster, out, |r| r.target == target)
    }

    /// End of `entity`'s turn: its holds lose a turn and lapse at zero.
    pub fn on_turn_ended(
        &mut self,
        roster: &mut Roster,
        entity: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) -> usize {
        for relation in self.relations.iter_mut().filter(|r| r.grappler == entity) {
            relation.turns_remaining = relation.turns_remaining.saturating_sub(1);
        }
        self.release_where(roster, out, |r| r.grappler == entity && r.turns_remaining == 0)
    }

    /// A moving grappler lets go; a moving target does not break the hold.
    pub fn on_entity_moved(
        &mut self,
        roster: &mut Roster,
        entity: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) -> usize {
        self.release_where(roster, out, |r| r.grappler == entity)
    }

    /// Athletics check against the target's Fortitude DC.
    ///
    /// Critical success restrains, success grabs, failure releases an existing
    /// hold on the target, and critical failure also knocks the grappler prone.
    /// Counts as an attack for the multiple-attack penalty. Returns `None` when
    /// either combatant is unknown or dead.
    pub fn attempt_grapple<D: DiceRoller + ?Sized>(
        &mut self,
        dice: &mut D,
        roster: &mut Roster,
        grappler: EntityId,
        target: EntityId,
        out: &mut Vec<ConditionDelta>,
    ) -> Option<CheckResult> {
        if grappler == target {
            return None;
        }
        let attacker = roster.get(grappler).filter(|c| c.is_alive())?;
        let defender = roster.get(target).filter(|c| c.is_alive())?;

        let modifier = attacker.skill_bonus(Skill::Athletics)
            - ConditionRules::attack_penalty(attacker.conditions())
            + multiple_attack_penalty(attacker.economy.attacks_this_turn, false);
        let dc = 10 + defender.save_bonus(Save::Fortitude)
            - ConditionRules::dc_penalty(defender.conditions());
        let result = roll_check(dice, CheckSource::Skill(Skill::Athletics), modifier, dc);

        if let Some(attacker) = roster.get_mut(grappler) {
            attacker.economy.record_attack();
        }

        match result.degree {
            DegreeOfSuccess::CriticalSuccess => self.apply_or_refresh(
                roster,
                grappler,
                target,
                HoldState::Restrained,
                Self::DEFAULT_DURATION_TURNS,
                out,
            ),
            DegreeOfSuccess::Success => self.apply_or_refresh(
                roster,
                grappler,
                target,
                HoldState::Grabbed,
                Self::DEFAULT_DURATION_TURNS,
                out,
            ),
            DegreeOfSuccess::Failure => {
                self.release_exact(roster, grappler, target, out);
            }
            DegreeOfSuccess::CriticalFailure => {
                self.release_exact(roster, grappler, target, out);
                self.conditions
                    .apply(roster, grappler, ConditionKind::Prone, 1, None, out);
            }
        }
        Some(result)
    }

    fn release_where(
        &mut self,
        roster: &mut Roster,
        out: &mut Vec<ConditionDelta>,
        predicate: impl Fn(&GrappleRelation) -> bool,
    ) -> usize {
        let matching: Vec<GrappleRelation> =
            self.relations.iter().filter(|r| predicate(*r)).copied().collect();
        for relation in &matching {
            self.release(roster, *relation, out);
        }
        matching.len()
    }

    fn release(
        &mut self,
        roster: &mut Roster,
        relation: GrappleRelation,
        out: &mut Vec<ConditionDelta>,
    ) {
        self.relations.retain(|r| *r != relation);
        self.conditions.remove(roster, relation.target, relation.hold.condition(), out);
        tracing::debug!(
            grappler = %relation.grappler,
            target = %relation.target,
            "grapple released"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::rules::ConditionChange;
    use crate::state::{Combatant, Team};

    const A: EntityId = EntityId(1);
    const B: EntityId = EntityId(2);
    const T: EntityId = EntityId(3);

    fn roster() -> Roster {
        [
            Combatant::builder(A, Team(1)).build(),
            Combatant::builder(B, Team(1)).build(),
            Combatant::builder(T, Team(2)).build(),
        ]
        .into_iter()
        .collect()
    }

    fn has(roster: &Roster, id: EntityId, kind: ConditionKind) -> bool {
        roster.get(id).unwrap().conditions().has(kind)
    }

    #[test]
    fn second_grappler_replaces_first() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        service.apply_or_refresh(&mut roster, A, T, HoldState::Grabbed, 2, &mut out);
        service.apply_or_refresh(&mut roster, B, T, HoldState::Grabbed, 2, &mut out);
        assert_eq!(service.relations().len(), 1);
        assert_eq!(service.holder_of(T), Some(B));
        assert!(has(&roster, T, ConditionKind::Grabbed));
    }

    #[test]
    fn grappler_switching_targets_frees_the_first() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        service.apply_or_refresh(&mut roster, A, T, HoldState::Grabbed, 2, &mut out);
        service.apply_or_refresh(&mut roster, A, B, HoldState::Grabbed, 2, &mut out);
        assert!(!has(&roster, T, ConditionKind::Grabbed));
        assert!(has(&roster, B, ConditionKind::Grabbed));
    }

    #[test]
    fn hold_expires_on_grappler_turn_end() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        service.apply_or_refresh(&mut roster, A, T, HoldState::Grabbed, 2, &mut out);
        assert_eq!(service.on_turn_ended(&mut roster, T, &mut out), 0);
        assert_eq!(service.on_turn_ended(&mut roster, A, &mut out), 0);
        assert_eq!(service.on_turn_ended(&mut roster, A, &mut out), 1);
        assert!(!has(&roster, T, ConditionKind::Grabbed));
    }

    #[test]
    fn only_grappler_movement_breaks_the_hold() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        service.apply_or_refresh(&mut roster, A, T, HoldState::Restrained, 2, &mut out);
        assert_eq!(service.on_entity_moved(&mut roster, T, &mut out), 0);
        assert_eq!(service.on_entity_moved(&mut roster, A, &mut out), 1);
        assert!(!has(&roster, T, ConditionKind::Restrained));
    }

    #[test]
    fn critical_grapple_restrains() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        let mut dice = ScriptedDice::new([20]);
        let result = service
            .attempt_grapple(&mut dice, &mut roster, A, T, &mut out)
            .unwrap();
        assert_eq!(result.degree, DegreeOfSuccess::CriticalSuccess);
        assert!(has(&roster, T, ConditionKind::Restrained));
        assert_eq!(roster.get(A).unwrap().economy.attacks_this_turn, 1);
        assert_eq!(out.last().map(|d| d.change), Some(ConditionChange::Added));
    }

    #[test]
    fn fumbled_grapple_knocks_grappler_prone() {
        let mut service = GrappleService::default();
        let mut roster = roster();
        let mut out = Vec::new();
        let mut dice = ScriptedDice::new([1]);
        let result = service
            .attempt_grapple(&mut dice, &mut roster, A, T, &mut out)
            .unwrap();
        assert_eq!(result.degree, DegreeOfSuccess::CriticalFailure);
        assert!(has(&roster, A, ConditionKind::Prone));
        assert!(service.relations().is_empty());
    }
}
