//! Void Spells - Spell State Machines
//!
//! Engine-independent logic for two spell archetypes. Physics, overlap
//! detection and visual effects stay with the host, which feeds overlap
//! events and frame times in and applies the damage that comes out.
//!
//! # Features
//!
//! - Damage-over-time projectile that attaches an effect on first hit
//! - Channelled spell with a delayed blast and periodic area damage
//!
//! # Example
//!
//! ```ignore
//! use void_spells::prelude::*;
//!
//! let mut spell = DamageOverTimeSpell::new(ActorId(1), DotSpellConfig::default())?;
//! let launch = spell.launch([1.0, 0.0, 0.0])?;
//! if let Some(mut effect) = spell.on_overlap(Some(ActorId(2))) {
//!     for damage in effect.update(1.0) {
//!         // apply damage
//!     }
//! }
//! ```

pub mod channel;
pub mod damage;
pub mod dot;
pub mod error;

pub mod prelude {
    pub use crate::channel::{ChannelSpell, ChannelSpellConfig, ChannelTick};
    pub use crate::damage::{ActorId, DamageInfo, DamageType};
    pub use crate::dot::{DamageOverTimeSpell, DotEffect, DotSpellConfig, LaunchImpulse};
    pub use crate::error::{Result, SpellError};
}

pub use prelude::*;
