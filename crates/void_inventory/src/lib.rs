//! Void Inventory - Stacking, Equipment and Drop Handling
//!
//! This crate owns a character's carried items as a bounded ledger of stacks.
//!
//! # Features
//!
//! - Injected item catalog with JSON loading
//! - Stack ledger with a configurable entry capacity and max stack size
//! - Stacking engine that tops off partial stacks before opening new ones
//! - Overflow spill of unplaceable units into the world
//! - Weapon slots with a pluggable weapon factory
//! - Two-phase requests (admission, then application) behind an authority lock
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use void_inventory::prelude::*;
//!
//! let catalog = ItemDatabase::new()
//!     .with_item(ItemDefinition::new("potion", "Potion").stackable());
//! let spawner = SpawnQueue::new();
//!
//! let mut inventory = Inventory::new(
//!     InventoryConfig::default(),
//!     Arc::new(catalog),
//!     Box::new(spawner.clone()),
//! )?;
//! inventory.add_item("potion", 5)?;
//! ```

pub mod authority;
pub mod catalog;
pub mod config;
pub mod equipment;
pub mod error;
pub mod inventory;
pub mod item;
pub mod ledger;
pub mod overflow;
pub mod request;
pub mod stacking;
pub mod stats;
pub mod world;

pub mod prelude {
    pub use crate::authority::InventoryAuthority;
    pub use crate::catalog::{ItemCatalog, ItemDatabase};
    pub use crate::config::InventoryConfig;
    pub use crate::equipment::{
        equip_weapon, loadout_stats, unequip_slot, BoundWeapon, WeaponFactory, WeaponHandle,
        WeaponInstance, WeaponPool, WeaponSlot,
    };
    pub use crate::error::{InventoryError, Result};
    pub use crate::inventory::{Inventory, InventoryEvent};
    pub use crate::item::{ItemCategory, ItemDefinition, StackEntry};
    pub use crate::ledger::StackLedger;
    pub use crate::request::{InventoryRequest, RequestOutcome};
    pub use crate::stacking::AddOutcome;
    pub use crate::stats::CharacterStats;
    pub use crate::world::{SpawnQueue, SpawnRequest, WorldSpawner};
}

pub use prelude::*;
