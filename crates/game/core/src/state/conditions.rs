//! Active conditions on a combatant.
//!
//! Reads are public; writes are crate-private so that every change flows
//! through [`ConditionService`](crate::rules::ConditionService) and produces a
//! delta record.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Condition types known to the rules engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionKind {
    // ========================================================================
    // Valued
    // ========================================================================
    Frightened,
    Sickened,
    Stunned,
    Slowed,
    Wounded,
    Dying,
    Doomed,

    // ========================================================================
    // Boolean
    // ========================================================================
    OffGuard,
    Prone,
    Grabbed,
    Restrained,
    Immobilized,
    Unconscious,
    Blinded,
}

impl ConditionKind {
    /// Whether the condition carries a magnitude.
    pub fn is_valued(self) -> bool {
        matches!(
            self,
            Self::Frightened
                | Self::Sickened
                | Self::Stunned
                | Self::Slowed
                | Self::Wounded
                | Self::Dying
                | Self::Doomed
        )
    }

    /// Whether the value drops by one at the end of the owner's turn.
    pub fn auto_decrements(self) -> bool {
        matches!(self, Self::Frightened | Self::Sickened)
    }
}

/// A single active condition.
///
/// Boolean conditions always carry `value == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveCondition {
    pub kind: ConditionKind,
    pub value: u8,
    /// Rounds left before the condition lapses; `None` is indefinite.
    pub remaining_rounds: Option<u8>,
}

/// Bounded list of active conditions, at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveConditions {
    entries: ArrayVec<ActiveCondition, { GameConfig::MAX_CONDITIONS }>,
}

impl ActiveConditions {
    pub fn has(&self, kind: ConditionKind) -> bool {
        self.entries.iter().any(|c| c.kind == kind)
    }

    pub fn get(&self, kind: ConditionKind) -> Option<&ActiveCondition> {
        self.entries.iter().find(|c| c.kind == kind)
    }

    /// Value of `kind`, or 0 when absent.
    pub fn value(&self, kind: ConditionKind) -> u8 {
        self.get(kind).map_or(0, |c| c.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveCondition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get_mut(&mut self, kind: ConditionKind) -> Option<&mut ActiveCondition> {
        self.entries.iter_mut().find(|c| c.kind == kind)
    }

    /// Appends a new entry. Returns false when the list is full.
    pub(crate) fn push(&mut self, condition: ActiveCondition) -> bool {
        self.entries.try_push(condition).is_ok()
    }

    /// Removes every entry of `kind`, returning the removed entries in order.
    pub(crate) fn remove_all(
        &mut self,
        kind: ConditionKind,
    ) -> ArrayVec<ActiveCondition, { GameConfig::MAX_CONDITIONS }> {
        let mut removed = ArrayVec::new();
        self.entries.retain(|c| {
            if c.kind == kind {
                removed.push(*c);
                false
            } else {
                true
            }
        });
        removed
    }

    pub(crate) fn kinds(&self) -> ArrayVec<ConditionKind, { GameConfig::MAX_CONDITIONS }> {
        self.entries.iter().map(|c| c.kind).collect()
    }
}
