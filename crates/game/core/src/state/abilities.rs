//! Ability scores, skills, saves, and proficiency ranks.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// The six ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// `floor((score - 10) / 2)`; 9 gives -1, not 0.
    pub fn modifier(&self, ability: Ability) -> i32 {
        (self.score(ability) - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Proficiency ranks, ordered from worst to best.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum ProficiencyRank {
    #[default]
    Untrained,
    Trained,
    Expert,
    Master,
    Legendary,
}

impl ProficiencyRank {
    /// Untrained adds nothing; otherwise `2 x rank + level`.
    pub fn bonus(self, level: u8) -> i32 {
        let tier = match self {
            Self::Untrained => return 0,
            Self::Trained => 1,
            Self::Expert => 2,
            Self::Master => 3,
            Self::Legendary => 4,
        };
        2 * tier + i32::from(level)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Acrobatics,
    Arcana,
    Athletics,
    Crafting,
    Deception,
    Diplomacy,
    Intimidation,
    Medicine,
    Nature,
    Occultism,
    Performance,
    Religion,
    Society,
    Stealth,
    Survival,
    Thievery,
}

impl Skill {
    pub fn key_ability(self) -> Ability {
        match self {
            Self::Acrobatics | Self::Stealth | Self::Thievery => Ability::Dexterity,
            Self::Athletics => Ability::Strength,
            Self::Arcana | Self::Crafting | Self::Occultism | Self::Society => {
                Ability::Intelligence
            }
            Self::Medicine | Self::Nature | Self::Religion | Self::Survival => Ability::Wisdom,
            Self::Deception | Self::Diplomacy | Self::Intimidation | Self::Performance => {
                Ability::Charisma
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Save {
    Fortitude,
    Reflex,
    Will,
}

impl Save {
    pub fn key_ability(self) -> Ability {
        match self {
            Self::Fortitude => Ability::Constitution,
            Self::Reflex => Ability::Dexterity,
            Self::Will => Ability::Wisdom,
        }
    }
}

/// Proficiency ranks held by a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proficiencies {
    pub perception: ProficiencyRank,
    pub fortitude: ProficiencyRank,
    pub reflex: ProficiencyRank,
    pub will: ProficiencyRank,
    /// Weapon attacks.
    pub attack: ProficiencyRank,
    /// Armor class.
    pub defense: ProficiencyRank,
    skills: BTreeMap<Skill, ProficiencyRank>,
}

impl Proficiencies {
    /// Trained in perception, saves, attacks, and defense; no skills.
    pub fn trained() -> Self {
        Self {
            perception: ProficiencyRank::Trained,
            fortitude: ProficiencyRank::Trained,
            reflex: ProficiencyRank::Trained,
            will: ProficiencyRank::Trained,
            attack: ProficiencyRank::Trained,
            defense: ProficiencyRank::Trained,
            skills: BTreeMap::new(),
        }
    }

    pub fn with_skill(mut self, skill: Skill, rank: ProficiencyRank) -> Self {
        self.skills.insert(skill, rank);
        self
    }

    pub fn with_attack(mut self, rank: ProficiencyRank) -> Self {
        self.attack = rank;
        self
    }

    pub fn skill(&self, skill: Skill) -> ProficiencyRank {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn save(&self, save: Save) -> ProficiencyRank {
        match save {
            Save::Fortitude => self.fortitude,
            Save::Reflex => self.reflex,
            Save::Will => self.will,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_round_down() {
        let scores = AbilityScores::new(18, 9, 10, 11, 7, 20);
        assert_eq!(scores.modifier(Ability::Strength), 4);
        assert_eq!(scores.modifier(Ability::Dexterity), -1);
        assert_eq!(scores.modifier(Ability::Constitution), 0);
        assert_eq!(scores.modifier(Ability::Intelligence), 0);
        assert_eq!(scores.modifier(Ability::Wisdom), -2);
        assert_eq!(scores.modifier(Ability::Charisma), 5);
    }

    #[test]
    fn proficiency_bonus_adds_level_when_trained() {
        assert_eq!(ProficiencyRank::Untrained.bonus(5), 0);
        assert_eq!(ProficiencyRank::Trained.bonus(1), 3);
        assert_eq!(ProficiencyRank::Legendary.bonus(20), 28);
    }

    #[test]
    fn unknown_skill_is_untrained() {
        let profs = Proficiencies::trained().with_skill(Skill::Athletics, ProficiencyRank::Expert);
        assert_eq!(profs.skill(Skill::Athletics), ProficiencyRank::Expert);
        assert_eq!(profs.skill(Skill::Stealth), ProficiencyRank::Untrained);
    }
}
