use std::collections::BTreeMap;

use super::{
    Ability, AbilityScores, ActiveConditions, Equipment, EntityId, Proficiencies, ResourceMeter,
    Save, Skill, Team, Weapon, WeaponTraits,
};
use crate::grid::CellCoord;

/// Per-turn action budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEconomy {
    pub actions: u8,
    pub reaction_available: bool,
    /// Attack-trait actions taken this turn; drives the multiple-attack penalty.
    pub attacks_this_turn: u8,
}

impl ActionEconomy {
    pub fn fresh(actions: u8) -> Self {
        Self {
            actions,
            reaction_available: true,
            attacks_this_turn: 0,
        }
    }

    pub(crate) fn reset(&mut self, actions: u8) {
        *self = Self::fresh(actions);
    }

    /// Spends `cost` actions. Returns false, spending nothing, when short.
    pub fn spend_actions(&mut self, cost: u8) -> bool {
        if self.actions < cost {
            return false;
        }
        self.actions -= cost;
        true
    }

    pub fn spend_reaction(&mut self) -> bool {
        std::mem::replace(&mut self.reaction_available, false)
    }

    pub fn record_attack(&mut self) {
        self.attacks_this_turn = self.attacks_this_turn.saturating_add(1);
    }
}

impl Default for ActionEconomy {
    fn default() -> Self {
        Self::fresh(3)
    }
}

/// Rules-relevant data of one combatant.
///
/// Conditions are read through [`conditions`](Self::conditions) and changed only
/// by the rules services.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub team: Team,
    pub level: u8,
    /// Anchor cell (min x, min z corner of the footprint).
    pub position: CellCoord,
    pub size_cells: u8,
    pub hp: ResourceMeter,
    pub abilities: AbilityScores,
    pub proficiencies: Proficiencies,
    pub equipment: Equipment,
    pub economy: ActionEconomy,
    conditions: ActiveConditions,
}

impl Combatant {
    pub fn builder(id: EntityId, team: Team) -> CombatantBuilder {
        CombatantBuilder::new(id, team)
    }

    pub fn conditions(&self) -> &ActiveConditions {
        &self.conditions
    }

    pub(crate) fn conditions_mut(&mut self) -> &mut ActiveConditions {
        &mut self.conditions
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.equipment.weapon.as_ref()
    }

    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Skill bonus before condition penalties.
    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        self.ability_modifier(skill.key_ability())
            + self.proficiencies.skill(skill).bonus(self.level)
    }

    /// Saving throw bonus before condition penalties.
    pub fn save_bonus(&self, save: Save) -> i32 {
        self.ability_modifier(save.key_ability()) + self.proficiencies.save(save).bonus(self.level)
    }

    /// Perception bonus before condition penalties.
    pub fn perception_bonus(&self) -> i32 {
        self.ability_modifier(Ability::Wisdom) + self.proficiencies.perception.bonus(self.level)
    }

    /// Ability modifier added to attack rolls with `weapon`.
    ///
    /// Ranged weapons use Dexterity; finesse melee weapons use the better of
    /// Strength and Dexterity.
    pub fn attack_ability_modifier(&self, weapon: &Weapon) -> i32 {
        let strength = self.ability_modifier(Ability::Strength);
        let dexterity = self.ability_modifier(Ability::Dexterity);
        if weapon.is_ranged() {
            dexterity
        } else if weapon.traits.contains(WeaponTraits::FINESSE) {
            strength.max(dexterity)
        } else {
            strength
        }
    }

    /// Attack bonus with the equipped weapon before penalties: proficiency,
    /// ability, and potency. Unarmed combatants use proficiency and Strength.
    pub fn strike_bonus(&self) -> i32 {
        let proficiency = self.proficiencies.attack.bonus(self.level);
        match self.weapon() {
            Some(weapon) => proficiency + self.attack_ability_modifier(weapon) + weapon.potency,
            None => proficiency + self.ability_modifier(Ability::Strength),
        }
    }
}

/// Builder for constructing combatants.
pub struct CombatantBuilder {
    combatant: Combatant,
}

impl CombatantBuilder {
    fn new(id: EntityId, team: Team) -> Self {
        Self {
            combatant: Combatant {
                id,
                team,
                level: 1,
                position: CellCoord::ORIGIN,
                size_cells: 1,
                hp: ResourceMeter::full(20),
                abilities: AbilityScores::default(),
                proficiencies: Proficiencies::trained(),
                equipment: Equipment::default(),
                economy: ActionEconomy::default(),
                conditions: ActiveConditions::default(),
            },
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.combatant.level = level;
        self
    }

    pub fn position(mut self, position: CellCoord) -> Self {
        self.combatant.position = position;
        self
    }

    pub fn size_cells(mut self, size: u8) -> Self {
        self.combatant.size_cells = size;
        self
    }

    pub fn hp(mut self, current: u32, maximum: u32) -> Self {
        self.combatant.hp = ResourceMeter::new(current, maximum);
        self
    }

    pub fn abilities(mut self, abilities: AbilityScores) -> Self {
        self.combatant.abilities = abilities;
        self
    }

    pub fn proficiencies(mut self, proficiencies: Proficiencies) -> Self {
        self.combatant.proficiencies = proficiencies;
        self
    }

    pub fn equipment(mut self, equipment: Equipment) -> Self {
        self.combatant.equipment = equipment;
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.combatant.equipment.weapon = Some(weapon);
        self
    }

    pub fn build(self) -> Combatant {
        self.combatant
    }
}

/// All combatants of an encounter, keyed by handle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: BTreeMap<EntityId, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a combatant, returning the one it replaced.
    pub fn insert(&mut self, combatant: Combatant) -> Option<Combatant> {
        self.combatants.insert(combatant.id, combatant)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        self.combatants.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        Self {
            combatants: iter.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProficiencyRank;

    #[test]
    fn finesse_uses_better_ability() {
        let fighter = Combatant::builder(EntityId(1), Team(1))
            .abilities(AbilityScores::new(12, 18, 10, 10, 10, 10))
            .build();
        let rapier = Weapon::melee("rapier", 1, 6).with_traits(WeaponTraits::FINESSE);
        let club = Weapon::melee("club", 1, 6);
        assert_eq!(fighter.attack_ability_modifier(&rapier), 4);
        assert_eq!(fighter.attack_ability_modifier(&club), 1);
    }

    #[test]
    fn strike_bonus_includes_potency() {
        let fighter = Combatant::builder(EntityId(1), Team(1))
            .level(3)
            .abilities(AbilityScores::new(16, 10, 10, 10, 10, 10))
            .proficiencies(Proficiencies::trained().with_attack(ProficiencyRank::Expert))
            .weapon(Weapon::melee("longsword", 1, 8).with_potency(1))
            .build();
        // expert 4 + level 3 + str 3 + potency 1
        assert_eq!(fighter.strike_bonus(), 11);
    }

    #[test]
    fn reaction_is_spent_once() {
        let mut economy = ActionEconomy::default();
        assert!(economy.spend_reaction());
        assert!(!economy.spend_reaction());
        assert!(economy.spend_actions(2));
        assert!(!economy.spend_actions(2));
        assert_eq!(economy.actions, 1);
    }
}
