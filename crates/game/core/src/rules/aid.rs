use std::collections::{BTreeMap, HashMap};

use super::{CheckResult, CheckSource, ConditionRules, DegreeOfSuccess, roll_check};
use crate::config::RuleConstants;
use crate::env::DiceRoller;
use crate::state::{EntityId, ProficiencyRank, Roster, Skill};

/// Aid readied by a helper for one ally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreparedAid {
    pub helper: EntityId,
    pub ally: EntityId,
    /// Skill used for the aid check; `None` aids an attack with the helper's
    /// strike bonus.
    pub skill: Option<Skill>,
    /// Helper's turn counter when the aid was prepared.
    pub prepared_on_turn: u32,
}

/// Result of consuming a prepared aid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AidOutcome {
    pub helper: EntityId,
    pub check: CheckResult,
    /// Bonus (or penalty) to add to the ally's pending check.
    pub bonus: i32,
}

/// Tracks prepared aid, one record per ally.
#[derive(Clone, Debug)]
pub struct AidService {
    dc: i32,
    prepared: BTreeMap<EntityId, PreparedAid>,
    turn_counters: HashMap<EntityId, u32>,
}

impl Default for AidService {
    fn default() -> Self {
        Self::new(&RuleConstants::default())
    }
}

impl AidService {
    pub fn new(rules: &RuleConstants) -> Self {
        Self {
            dc: rules.aid_dc,
            prepared: BTreeMap::new(),
            turn_counters: HashMap::new(),
        }
    }

    /// Readies aid from `helper` for `ally`, replacing any aid already
    /// prepared for that ally.
    pub fn prepare_aid(&mut self, helper: EntityId, ally: EntityId, skill: Option<Skill>) {
        if helper == ally {
            return;
        }
        let prepared_on_turn = self.turn_counters.get(&helper).copied().unwrap_or(0);
        let aid = PreparedAid {
            helper,
            ally,
            skill,
            prepared_on_turn,
        };
        if let Some(previous) = self.prepared.insert(ally, aid) {
            tracing::debug!(%ally, replaced = %previous.helper, "prepared aid replaced");
        }
    }

    pub fn has_prepared_aid_for_ally(&self, ally: EntityId) -> bool {
        self.prepared.contains_key(&ally)
    }

    pub fn prepared_for(&self, ally: EntityId) -> Option<&PreparedAid> {
        self.prepared.get(&ally)
    }

    /// Advances `helper`'s turn counter and expires aid it prepared on an
    /// earlier turn. Returns the number of expired records.
    pub fn notify_turn_started(&mut self, helper: EntityId) -> usize {
        let counter = self.turn_counters.entry(helper).or_insert(0);
        *counter += 1;
        let now = *counter;

        let before = self.prepared.len();
        self.prepared
            .retain(|_, aid| aid.helper != helper || aid.prepared_on_turn >= now);
        let expired = before - self.prepared.len();
        if expired > 0 {
            tracing::debug!(%helper, expired, "prepared aid expired");
        }
        expired
    }

    /// Rolls the aid prepared for `ally`, spending the helper's reaction.
    ///
    /// Returns `None` and keeps the record when no aid is prepared or the
    /// helper cannot react (unknown, dead, or reaction spent).
    pub fn try_consume_aid_for_check<D: DiceRoller + ?Sized>(
        &mut self,
        dice: &mut D,
        roster: &mut Roster,
        ally: EntityId,
    ) -> Option<AidOutcome> {
        let aid = *self.prepared.get(&ally)?;
        let helper = roster
            .get_mut(aid.helper)
            .filter(|c| c.is_alive() && c.economy.reaction_available)?;

        let (modifier, rank, source) = match aid.skill {
            Some(skill) => (
                helper.skill_bonus(skill) - ConditionRules::check_penalty(helper.conditions()),
                helper.proficiencies.skill(skill),
                CheckSource::Skill(skill),
            ),
            None => (
                helper.strike_bonus() - ConditionRules::attack_penalty(helper.conditions()),
                helper.proficiencies.attack,
                CheckSource::Strike,
            ),
        };
        let check = roll_check(dice, source, modifier, self.dc);
        helper.economy.spend_reaction();
        self.prepared.remove(&ally);

        let bonus = aid_bonus(check.degree, rank);
        tracing::debug!(helper = %aid.helper, %ally, degree = %check.degree, bonus, "aid consumed");
        Some(AidOutcome {
            helper: aid.helper,
            check,
            bonus,
        })
    }
}

fn aid_bonus(degree: DegreeOfSuccess, rank: ProficiencyRank) -> i32 {
    match degree {
        DegreeOfSuccess::CriticalSuccess => match rank {
            ProficiencyRank::Legendary => 4,
            ProficiencyRank::Master => 3,
            _ => 2,
        },
        DegreeOfSuccess::Success => 1,
        DegreeOfSuccess::Failure => 0,
        DegreeOfSuccess::CriticalFailure => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::state::{Combatant, Proficiencies, Team};

    const HELPER: EntityId = EntityId(1);
    const ALLY: EntityId = EntityId(2);

    fn roster(rank: ProficiencyRank) -> Roster {
        [
            Combatant::builder(HELPER, Team(1))
                .proficiencies(Proficiencies::trained().with_skill(Skill::Athletics, rank))
                .build(),
            Combatant::builder(ALLY, Team(1)).build(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn later_preparation_replaces() {
        let mut aid = AidService::default();
        aid.prepare_aid(HELPER, ALLY, Some(Skill::Athletics));
        aid.prepare_aid(EntityId(3), ALLY, None);
        assert_eq!(aid.prepared_for(ALLY).map(|a| a.helper), Some(EntityId(3)));
    }

    #[test]
    fn critical_aid_scales_with_proficiency() {
        let mut aid = AidService::default();
        let mut roster = roster(ProficiencyRank::Master);
        aid.prepare_aid(HELPER, ALLY, Some(Skill::Athletics));
        let mut dice = ScriptedDice::new([20]);
        let outcome = aid
            .try_consume_aid_for_check(&mut dice, &mut roster, ALLY)
            .unwrap();
        assert_eq!(outcome.check.degree, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(outcome.bonus, 3);
        assert!(!aid.has_prepared_aid_for_ally(ALLY));
        assert!(!roster.get(HELPER).unwrap().economy.reaction_available);
    }

    #[test]
    fn spent_reaction_keeps_the_record() {
        let mut aid = AidService::default();
        let mut roster = roster(ProficiencyRank::Trained);
        roster.get_mut(HELPER).unwrap().economy.spend_reaction();
        aid.prepare_aid(HELPER, ALLY, None);
        let mut dice = ScriptedDice::new([10]);
        assert!(aid.try_consume_aid_for_check(&mut dice, &mut roster, ALLY).is_none());
        assert!(aid.has_prepared_aid_for_ally(ALLY));
        assert_eq!(dice.rolls_made(), 0);
    }

    #[test]
    fn degrees_map_to_bonuses() {
        assert_eq!(aid_bonus(DegreeOfSuccess::CriticalSuccess, ProficiencyRank::Legendary), 4);
        assert_eq!(aid_bonus(DegreeOfSuccess::CriticalSuccess, ProficiencyRank::Expert), 2);
        assert_eq!(aid_bonus(DegreeOfSuccess::Success, ProficiencyRank::Untrained), 1);
        assert_eq!(aid_bonus(DegreeOfSuccess::CriticalFailure, ProficiencyRank::Trained), -1);
    }
}
