//! Damage-over-time projectile spell
//!
//! The spell launches a capsule along the caster's forward vector. The first
//! valid actor the capsule overlaps gets a [`DotEffect`] attached, and the
//! capsule returns to the caster ready for the next launch.

use crate::damage::{ActorId, DamageInfo, DamageType};
use crate::error::{Result, SpellError};
use serde::{Deserialize, Serialize};

/// Most ticks a single effect may deliver over its lifetime
pub const MAX_DOT_TICKS: f32 = 10_000.0;

/// Damage-over-time spell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotSpellConfig {
    /// Launch speed of the capsule
    pub speed: f32,
    /// Damage dealt per tick
    pub damage_amount: f32,
    /// Type of damage dealt
    pub damage_type: DamageType,
    /// Seconds the effect stays on its target
    pub lifetime: f32,
    /// Seconds between ticks
    pub tick_interval: f32,
}

impl Default for DotSpellConfig {
    fn default() -> Self {
        Self {
            speed: 1500.0,
            damage_amount: 5.0,
            damage_type: DamageType::Poison,
            lifetime: 5.0,
            tick_interval: 1.0,
        }
    }
}

impl DotSpellConfig {
    /// Set launch speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set damage per tick and its type
    pub fn with_damage(mut self, amount: f32, damage_type: DamageType) -> Self {
        self.damage_amount = amount;
        self.damage_type = damage_type;
        self
    }

    /// Set effect lifetime
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Set tick interval
    pub fn with_tick_interval(mut self, interval: f32) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Reject values the state machine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            return Err(SpellError::invalid_config("tick_interval must be positive"));
        }
        if !self.lifetime.is_finite() || self.lifetime < 0.0 {
            return Err(SpellError::invalid_config("lifetime must not be negative"));
        }
        if self.lifetime / self.tick_interval > MAX_DOT_TICKS {
            return Err(SpellError::invalid_config(format!(
                "lifetime {} at tick_interval {} exceeds {} ticks",
                self.lifetime, self.tick_interval, MAX_DOT_TICKS
            )));
        }
        if !self.damage_amount.is_finite() || self.damage_amount < 0.0 {
            return Err(SpellError::invalid_config("damage_amount must not be negative"));
        }
        if !self.speed.is_finite() {
            return Err(SpellError::invalid_config("speed must be finite"));
        }
        Ok(())
    }
}

/// Impulse the host applies to the detached capsule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchImpulse {
    /// Impulse vector (forward x speed)
    pub impulse: [f32; 3],
}

/// Projectile spell that attaches a damage-over-time effect on hit
#[derive(Debug, Clone)]
pub struct DamageOverTimeSpell {
    owner: ActorId,
    config: DotSpellConfig,
    fired: bool,
    hits: Vec<ActorId>,
}

impl DamageOverTimeSpell {
    /// Create a spell owned by `owner`
    pub fn new(owner: ActorId, config: DotSpellConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            owner,
            config,
            fired: false,
            hits: Vec::new(),
        })
    }

    /// Caster of the spell
    pub fn owner(&self) -> ActorId {
        self.owner
    }

    /// Configuration
    pub fn config(&self) -> &DotSpellConfig {
        &self.config
    }

    /// Whether the capsule is in flight
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Detach the capsule and fire it along `forward`
    pub fn launch(&mut self, forward: [f32; 3]) -> Result<LaunchImpulse> {
        if self.fired {
            return Err(SpellError::AlreadyLaunched);
        }
        self.fired = true;
        self.hits.clear();

        let speed = self.config.speed;
        log::debug!("Spell of {:?} launched at speed {}", self.owner, speed);
        Ok(LaunchImpulse {
            impulse: forward.map(|axis| axis * speed),
        })
    }

    /// Handle the capsule overlapping `other`.
    ///
    /// Returns the effect to attach on the first valid hit of a flight.
    pub fn on_overlap(&mut self, other: Option<ActorId>) -> Option<DotEffect> {
        if !self.fired {
            return None;
        }
        let target = other?;
        if target == self.owner || self.hits.contains(&target) {
            return None;
        }
        self.hits.push(target);

        let effect = DotEffect::new(self.owner, target, &self.config);
        self.return_capsule();
        Some(effect)
    }

    /// Reattach the capsule to the caster
    pub fn return_capsule(&mut self) {
        self.fired = false;
    }
}

/// Damage-over-time effect attached to a target
#[derive(Debug, Clone)]
pub struct DotEffect {
    source: ActorId,
    target: ActorId,
    amount: f32,
    damage_type: DamageType,
    lifetime: f32,
    tick_interval: f32,
    elapsed: f32,
    ticks_dealt: u32,
}

impl DotEffect {
    fn new(source: ActorId, target: ActorId, config: &DotSpellConfig) -> Self {
        Self {
            source,
            target,
            amount: config.damage_amount,
            damage_type: config.damage_type,
            lifetime: config.lifetime,
            tick_interval: config.tick_interval,
            elapsed: 0.0,
            ticks_dealt: 0,
        }
    }

    /// Actor the effect is attached to
    pub fn target(&self) -> ActorId {
        self.target
    }

    /// Damage per tick
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Seconds left before expiry
    pub fn remaining(&self) -> f32 {
        (self.lifetime - self.elapsed).max(0.0)
    }

    /// Whether the lifetime has run out
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }

    /// Advance by `dt` seconds and return the ticks that fell due
    pub fn update(&mut self, dt: f32) -> Vec<DamageInfo> {
        if self.is_expired() {
            return Vec::new();
        }

        // NaN and negative steps advance nothing
        let end = (self.elapsed + dt.max(0.0)).min(self.lifetime);
        let due = (end / self.tick_interval).floor() as u32;
        let count = due.saturating_sub(self.ticks_dealt);
        self.ticks_dealt = self.ticks_dealt.max(due);
        self.elapsed = end;

        let tick = DamageInfo::new(self.amount, self.damage_type, self.source, self.target);
        let ticks = vec![tick; count as usize];

        if self.is_expired() {
            log::debug!("Damage over time on {:?} expired", self.target);
        }
        ticks
    }
}
