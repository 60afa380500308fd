//! Modifiable character attributes carried by weapons, armor and pickups

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Attribute block shared by characters, weapons and modified items.
///
/// Equality is exact on every field, including `damage_amount`. Two weapon
/// instances of the same kind are only considered the same instance when all
/// of their stats match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    /// Damage reduction
    pub armor: i32,
    /// Melee/physical damage bonus
    pub physical_attack: i32,
    /// Health and resilience
    pub fortitude: i32,
    /// Speed and evasion
    pub agility: i32,
    /// Spell damage bonus
    pub magic_attack: i32,
    /// Flat damage dealt per hit
    pub damage_amount: f32,
}

impl CharacterStats {
    /// Create a zeroed stat block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set armor
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    /// Set physical attack
    pub fn with_physical_attack(mut self, value: i32) -> Self {
        self.physical_attack = value;
        self
    }

    /// Set fortitude
    pub fn with_fortitude(mut self, value: i32) -> Self {
        self.fortitude = value;
        self
    }

    /// Set agility
    pub fn with_agility(mut self, value: i32) -> Self {
        self.agility = value;
        self
    }

    /// Set magic attack
    pub fn with_magic_attack(mut self, value: i32) -> Self {
        self.magic_attack = value;
        self
    }

    /// Set damage amount
    pub fn with_damage(mut self, amount: f32) -> Self {
        self.damage_amount = amount;
        self
    }

    /// Sum a set of stat blocks, e.g. everything a character has equipped
    pub fn total<'a>(stats: impl IntoIterator<Item = &'a CharacterStats>) -> Self {
        stats.into_iter().fold(Self::default(), |acc, s| acc + *s)
    }
}

impl AddAssign for CharacterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.armor += rhs.armor;
        self.physical_attack += rhs.physical_attack;
        self.fortitude += rhs.fortitude;
        self.agility += rhs.agility;
        self.magic_attack += rhs.magic_attack;
        self.damage_amount += rhs.damage_amount;
    }
}

impl Add for CharacterStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}
