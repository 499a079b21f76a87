use crate::state::{Combatant, EntityId, Roster};

/// Moment in action resolution at which reactions are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionTrigger {
    /// A strike has hit `target` and damage is about to be applied.
    PostHit { attacker: EntityId, target: EntityId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReactionKind {
    ShieldBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReactionOption {
    pub reactor: EntityId,
    pub kind: ReactionKind,
}

/// Read-only scan for reactions a trigger makes available.
pub struct ReactionService;

impl ReactionService {
    /// Eligible reactions in initiative order.
    ///
    /// Shield Block is self-only, so at most one option is ever returned.
    pub fn collect_eligible_reactions(
        roster: &Roster,
        initiative: &[EntityId],
        trigger: ReactionTrigger,
    ) -> Vec<ReactionOption> {
        let ReactionTrigger::PostHit { target, .. } = trigger;

        let mut options: Vec<ReactionOption> = initiative
            .iter()
            .filter(|&&id| id == target)
            .filter_map(|&id| roster.get(id))
            .filter(|c| can_shield_block(c))
            .map(|c| ReactionOption {
                reactor: c.id,
                kind: ReactionKind::ShieldBlock,
            })
            .collect();

        if options.len() > 1 {
            tracing::warn!(
                %target,
                found = options.len(),
                "more than one self-only reaction found; keeping the first"
            );
            options.truncate(1);
        }
        options
    }
}

fn can_shield_block(combatant: &Combatant) -> bool {
    combatant.is_alive()
        && combatant.economy.reaction_available
        && combatant
            .equipment
            .shield
            .is_some_and(|shield| shield.can_block())
}
