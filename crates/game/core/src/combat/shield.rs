use crate::state::Combatant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShieldBlockOutcome {
    /// Damage absorbed by the shield's hardness.
    pub prevented: u32,
    /// Damage still dealt to the defender.
    pub remaining: u32,
    /// Damage dealt to the shield itself.
    pub shield_damage: u32,
    /// The block left the shield broken.
    pub broken: bool,
}

/// Shield Block reaction against `incoming` damage.
///
/// Hardness absorbs damage; the defender and the shield each take the rest.
/// Spends the defender's reaction. A shield that breaks is lowered. Returns
/// `None`, changing nothing, when the defender has no reaction or no raised,
/// unbroken shield.
pub fn shield_block(defender: &mut Combatant, incoming: u32) -> Option<ShieldBlockOutcome> {
    if !defender.economy.reaction_available {
        return None;
    }
    let shield = defender
        .equipment
        .shield
        .as_mut()
        .filter(|shield| shield.can_block())?;

    let prevented = incoming.min(shield.hardness);
    let remaining = incoming - prevented;
    let shield_damage = shield.hp.reduce(remaining);
    let broken = shield.is_broken();
    if broken {
        shield.raised = false;
        tracing::debug!(defender = %defender.id, "shield broken");
    }
    defender.economy.spend_reaction();

    Some(ShieldBlockOutcome {
        prevented,
        remaining,
        shield_damage,
        broken,
    })
}
