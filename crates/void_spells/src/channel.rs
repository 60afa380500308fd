//! Channelled spell: active for as long as the caster keeps casting

use crate::damage::{ActorId, DamageInfo, DamageType};
use crate::error::{Result, SpellError};
use serde::{Deserialize, Serialize};

/// Most damage pulses a single update may deliver
pub const MAX_PULSES_PER_STEP: f32 = 1_000.0;

/// Channelled spell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSpellConfig {
    /// Damage dealt to each overlapping target per pulse
    pub damage_amount: f32,
    /// Type of damage dealt
    pub damage_type: DamageType,
    /// Seconds between damage pulses
    pub damage_interval: f32,
    /// Whether the spell has a blast effect at all
    pub has_blast: bool,
    /// Seconds of casting before the blast effect switches on
    pub blast_activation_time: f32,
    /// Longest frame a single update advances; longer frames are clamped
    pub max_step: f32,
}

impl Default for ChannelSpellConfig {
    fn default() -> Self {
        Self {
            damage_amount: 2.0,
            damage_type: DamageType::Arcane,
            damage_interval: 0.25,
            has_blast: true,
            blast_activation_time: 0.5,
            max_step: 1.0,
        }
    }
}

impl ChannelSpellConfig {
    /// Set damage per pulse and its type
    pub fn with_damage(mut self, amount: f32, damage_type: DamageType) -> Self {
        self.damage_amount = amount;
        self.damage_type = damage_type;
        self
    }

    /// Set pulse interval
    pub fn with_damage_interval(mut self, interval: f32) -> Self {
        self.damage_interval = interval;
        self
    }

    /// Configure the blast effect
    pub fn with_blast(mut self, activation_time: f32) -> Self {
        self.has_blast = true;
        self.blast_activation_time = activation_time;
        self
    }

    /// Set the longest frame a single update advances
    pub fn with_max_step(mut self, step: f32) -> Self {
        self.max_step = step;
        self
    }

    /// Remove the blast effect
    pub fn without_blast(mut self) -> Self {
        self.has_blast = false;
        self
    }

    /// Reject values the state machine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.damage_interval.is_finite() || self.damage_interval <= 0.0 {
            return Err(SpellError::invalid_config("damage_interval must be positive"));
        }
        if !self.max_step.is_finite() || self.max_step <= 0.0 {
            return Err(SpellError::invalid_config("max_step must be positive"));
        }
        if self.max_step / self.damage_interval > MAX_PULSES_PER_STEP {
            return Err(SpellError::invalid_config(format!(
                "max_step {} at damage_interval {} exceeds {} pulses per update",
                self.max_step, self.damage_interval, MAX_PULSES_PER_STEP
            )));
        }
        if !self.blast_activation_time.is_finite() || self.blast_activation_time < 0.0 {
            return Err(SpellError::invalid_config(
                "blast_activation_time must not be negative",
            ));
        }
        if !self.damage_amount.is_finite() {
            return Err(SpellError::invalid_config("damage_amount must be finite"));
        }
        Ok(())
    }
}

/// What happened during one [`ChannelSpell::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelTick {
    /// The blast effect switched on during this update
    pub blast_activated: bool,
    /// Damage dealt during this update
    pub damage: Vec<DamageInfo>,
}

/// Spell that stays active while the caster channels it
#[derive(Debug, Clone)]
pub struct ChannelSpell {
    caster: ActorId,
    config: ChannelSpellConfig,
    casting: bool,
    collision_active: bool,
    blast_timer: Option<f32>,
    blast_active: bool,
    until_pulse: f32,
}

impl ChannelSpell {
    /// Create an idle spell
    pub fn new(caster: ActorId, config: ChannelSpellConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            caster,
            until_pulse: config.damage_interval,
            config,
            casting: false,
            collision_active: false,
            blast_timer: None,
            blast_active: false,
        })
    }

    /// Check if casting
    pub fn is_casting(&self) -> bool {
        self.casting
    }

    /// Check if the collision volume is active
    pub fn is_collision_active(&self) -> bool {
        self.collision_active
    }

    /// Check if the blast effect is active
    pub fn is_blast_active(&self) -> bool {
        self.blast_active
    }

    /// Seconds until the blast switches on, if armed
    pub fn blast_countdown(&self) -> Option<f32> {
        self.blast_timer
    }

    /// Start channelling
    pub fn begin_casting(&mut self) -> Result<()> {
        if self.casting {
            return Err(SpellError::AlreadyCasting);
        }
        self.casting = true;
        self.collision_active = true;
        self.until_pulse = self.config.damage_interval;

        if self.config.has_blast {
            self.blast_timer = Some(self.config.blast_activation_time);
        }
        log::debug!("{:?} began channelling", self.caster);
        Ok(())
    }

    /// Stop channelling
    pub fn end_casting(&mut self) -> Result<()> {
        if !self.casting {
            return Err(SpellError::NotCasting);
        }
        self.casting = false;
        self.collision_active = false;
        self.blast_timer = None;
        self.blast_active = false;
        log::debug!("{:?} stopped channelling", self.caster);
        Ok(())
    }

    /// Advance by `dt` seconds, clamped to the configured max step.
    /// `overlapping` lists the actors currently inside the collision volume.
    pub fn update(&mut self, dt: f32, overlapping: &[ActorId]) -> ChannelTick {
        let mut tick = ChannelTick::default();
        if !self.casting {
            return tick;
        }
        // NaN and negative steps advance nothing
        let dt = dt.max(0.0).min(self.config.max_step);

        if let Some(remaining) = self.blast_timer {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.blast_timer = None;
                self.blast_active = true;
                tick.blast_activated = true;
            } else {
                self.blast_timer = Some(remaining);
            }
        }

        self.until_pulse -= dt;
        if self.until_pulse > 0.0 {
            return tick;
        }
        let interval = self.config.damage_interval;
        let pulses = (-self.until_pulse / interval).floor() as u32 + 1;
        self.until_pulse += pulses as f32 * interval;

        for _ in 0..pulses {
            tick.damage.extend(
                overlapping
                    .iter()
                    .filter(|&&target| target != self.caster)
                    .map(|&target| {
                        DamageInfo::new(
                            self.config.damage_amount,
                            self.config.damage_type,
                            self.caster,
                            target,
                        )
                    }),
            );
        }
        tick
    }
}
