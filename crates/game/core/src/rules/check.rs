//! d20 checks and degrees of success.

use std::cmp::Ordering;

use super::ConditionRules;
use crate::env::DiceRoller;
use crate::state::{Combatant, Save, Skill};

/// Outcome band of a check, ordered from worst to best.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegreeOfSuccess {
    CriticalFailure,
    Failure,
    Success,
    CriticalSuccess,
}

impl DegreeOfSuccess {
    /// One step better, capped at critical success.
    pub fn upgraded(self) -> Self {
        match self {
            Self::CriticalFailure => Self::Failure,
            Self::Failure => Self::Success,
            Self::Success | Self::CriticalSuccess => Self::CriticalSuccess,
        }
    }

    /// One step worse, floored at critical failure.
    pub fn downgraded(self) -> Self {
        match self {
            Self::CriticalSuccess => Self::Success,
            Self::Success => Self::Failure,
            Self::Failure | Self::CriticalFailure => Self::CriticalFailure,
        }
    }

    pub fn is_success(self) -> bool {
        self >= Self::Success
    }
}

/// Classifies `total` against `dc`, then shifts one step for a natural 20 or 1.
pub fn resolve_degree(total: i32, natural: u32, dc: i32) -> DegreeOfSuccess {
    let margin = total - dc;
    let degree = if margin >= 10 {
        DegreeOfSuccess::CriticalSuccess
    } else if margin >= 0 {
        DegreeOfSuccess::Success
    } else if margin <= -10 {
        DegreeOfSuccess::CriticalFailure
    } else {
        DegreeOfSuccess::Failure
    };

    match natural {
        20 => degree.upgraded(),
        1 => degree.downgraded(),
        _ => degree,
    }
}

/// What a check was rolled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckSource {
    Skill(Skill),
    Save(Save),
    Perception,
    Strike,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckResult {
    pub source: CheckSource,
    pub natural: u32,
    pub modifier: i32,
    pub total: i32,
    pub dc: i32,
    pub degree: DegreeOfSuccess,
}

impl CheckResult {
    pub fn new(source: CheckSource, natural: u32, modifier: i32, dc: i32) -> Self {
        let total = natural as i32 + modifier;
        Self {
            source,
            natural,
            modifier,
            total,
            dc,
            degree: resolve_degree(total, natural, dc),
        }
    }

    /// Re-resolves the same natural roll with an extra bonus (aid, for one).
    pub fn with_bonus(self, bonus: i32) -> Self {
        Self::new(self.source, self.natural, self.modifier + bonus, self.dc)
    }

    pub fn is_success(&self) -> bool {
        self.degree.is_success()
    }
}

/// Rolls a d20 and adds `modifier`.
pub fn roll_check<D: DiceRoller + ?Sized>(
    dice: &mut D,
    source: CheckSource,
    modifier: i32,
    dc: i32,
) -> CheckResult {
    let natural = dice.roll_d20();
    CheckResult::new(source, natural, modifier, dc)
}

/// Skill check with the combatant's skill bonus less its status penalty.
pub fn roll_skill_check<D: DiceRoller + ?Sized>(
    dice: &mut D,
    combatant: &Combatant,
    skill: Skill,
    dc: i32,
) -> CheckResult {
    let modifier =
        combatant.skill_bonus(skill) - ConditionRules::check_penalty(combatant.conditions());
    roll_check(dice, CheckSource::Skill(skill), modifier, dc)
}

pub fn roll_save<D: DiceRoller + ?Sized>(
    dice: &mut D,
    combatant: &Combatant,
    save: Save,
    dc: i32,
) -> CheckResult {
    let modifier =
        combatant.save_bonus(save) - ConditionRules::check_penalty(combatant.conditions());
    roll_check(dice, CheckSource::Save(save), modifier, dc)
}

pub fn roll_perception<D: DiceRoller + ?Sized>(
    dice: &mut D,
    combatant: &Combatant,
    dc: i32,
) -> CheckResult {
    let modifier =
        combatant.perception_bonus() - ConditionRules::check_penalty(combatant.conditions());
    roll_check(dice, CheckSource::Perception, modifier, dc)
}

/// One side of an opposed check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpposedRoll {
    pub natural: u32,
    pub modifier: i32,
    pub total: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpposedOutcome {
    FirstWins,
    SecondWins,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpposedResult {
    pub first: OpposedRoll,
    pub second: OpposedRoll,
    /// `first.total - second.total`.
    pub margin: i32,
    pub outcome: OpposedOutcome,
}

/// Rolls both sides independently, first side first. The sign of the margin
/// decides the outcome.
pub fn roll_opposed_check<D: DiceRoller + ?Sized>(
    dice: &mut D,
    first_modifier: i32,
    second_modifier: i32,
) -> OpposedResult {
    let mut roll = |modifier: i32| {
        let natural = dice.roll_d20();
        OpposedRoll {
            natural,
            modifier,
            total: natural as i32 + modifier,
        }
    };
    let first = roll(first_modifier);
    let second = roll(second_modifier);
    let margin = first.total - second.total;
    let outcome = match margin.cmp(&0) {
        Ordering::Greater => OpposedOutcome::FirstWins,
        Ordering::Less => OpposedOutcome::SecondWins,
        Ordering::Equal => OpposedOutcome::Tie,
    };
    OpposedResult {
        first,
        second,
        margin,
        outcome,
    }
}
