//! Damage types and tick information produced by spells

use serde::{Deserialize, Serialize};

/// Opaque id of an actor in the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Types of spell damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Physical damage
    Physical,
    /// Fire damage
    Fire,
    /// Frost damage
    Frost,
    /// Lightning damage
    Lightning,
    /// Poison damage
    Poison,
    /// Arcane damage
    Arcane,
}

impl Default for DamageType {
    fn default() -> Self {
        Self::Physical
    }
}

/// One damage application, handed to the host's health system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: f32,
    /// Type of damage
    pub damage_type: DamageType,
    /// Actor that caused the damage
    pub source: ActorId,
    /// Actor receiving the damage
    pub target: ActorId,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32, damage_type: DamageType, source: ActorId, target: ActorId) -> Self {
        Self {
            amount,
            damage_type,
            source,
            target,
        }
    }

    /// Sum of the amounts in `ticks`
    pub fn total<'a>(ticks: impl IntoIterator<Item = &'a DamageInfo>) -> f32 {
        ticks.into_iter().map(|d| d.amount).sum()
    }
}
