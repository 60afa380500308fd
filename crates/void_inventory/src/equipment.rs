//! Equipment binder: weapon slots and their link to ledger entries
//!
//! Weapon instances are created and destroyed by a host-provided
//! [`WeaponFactory`]. Slots are host state; the binder only borrows them for
//! the duration of a call. A slot is linked to a ledger entry purely by
//! matching item id and stats.

use crate::error::{InventoryError, Result};
use crate::inventory::{Inventory, InventoryEvent};
use crate::stats::CharacterStats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque handle to a live weapon instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponHandle(pub u64);

/// Weapon produced by a factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponInstance {
    /// Handle of the live instance
    pub handle: WeaponHandle,
    /// Item the instance represents
    pub item_id: String,
}

/// Creates and destroys live weapon instances
pub trait WeaponFactory {
    /// Instantiate a weapon of the given kind
    fn instantiate(&mut self, kind: &str) -> Option<WeaponInstance>;

    /// Destroy a live weapon
    fn destroy(&mut self, handle: WeaponHandle);

    /// Write stats onto a live weapon
    fn apply_stats(&mut self, handle: WeaponHandle, stats: &CharacterStats);
}

/// Weapon currently held by a slot
#[derive(Debug, Clone, PartialEq)]
pub struct BoundWeapon {
    /// Live instance handle
    pub handle: WeaponHandle,
    /// Item the weapon represents
    pub item_id: String,
    /// Stats applied to the weapon
    pub stats: CharacterStats,
}

/// Attachment point that holds at most one weapon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponSlot {
    socket: String,
    weapon: Option<BoundWeapon>,
}

impl WeaponSlot {
    /// Create an empty slot attached to `socket`
    pub fn new(socket: impl Into<String>) -> Self {
        Self {
            socket: socket.into(),
            weapon: None,
        }
    }

    /// Socket name
    pub fn socket(&self) -> &str {
        &self.socket
    }

    /// Bound weapon, if any
    pub fn weapon(&self) -> Option<&BoundWeapon> {
        self.weapon.as_ref()
    }

    /// Check if slot is occupied
    pub fn is_occupied(&self) -> bool {
        self.weapon.is_some()
    }

    /// Whether the bound weapon is the given item with exactly these stats
    pub fn holds(&self, item_id: &str, stats: &CharacterStats) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|w| w.item_id == item_id && w.stats == *stats)
    }
}

/// Tear down whatever the slot holds. Calling it on an empty slot does nothing.
pub fn unequip_slot(factory: &mut dyn WeaponFactory, slot: &mut WeaponSlot) -> Option<BoundWeapon> {
    let weapon = slot.weapon.take()?;
    factory.destroy(weapon.handle);
    log::debug!(
        "Destroyed weapon '{}' ({:?}) on socket '{}'",
        weapon.item_id,
        weapon.handle,
        slot.socket
    );
    Some(weapon)
}

/// Put a new weapon of `kind` into `slot`, tearing down any current weapon
/// first, and apply `stats` to it.
pub fn equip_weapon(
    factory: &mut dyn WeaponFactory,
    slot: Option<&mut WeaponSlot>,
    kind: Option<&str>,
    stats: CharacterStats,
) -> Result<WeaponHandle> {
    let slot = slot.ok_or(InventoryError::MissingArgument("weapon slot"))?;
    let kind = kind.ok_or(InventoryError::MissingArgument("weapon kind"))?;

    unequip_slot(factory, slot);

    let instance = factory
        .instantiate(kind)
        .ok_or_else(|| InventoryError::WeaponUnavailable(kind.to_string()))?;
    factory.apply_stats(instance.handle, &stats);
    log::debug!(
        "Equipped '{}' ({:?}) on socket '{}'",
        instance.item_id,
        instance.handle,
        slot.socket
    );

    slot.weapon = Some(BoundWeapon {
        handle: instance.handle,
        item_id: instance.item_id,
        stats,
    });
    Ok(instance.handle)
}

/// Combined stats of every bound weapon
pub fn loadout_stats(slots: &[WeaponSlot]) -> CharacterStats {
    CharacterStats::total(slots.iter().filter_map(|s| s.weapon()).map(|w| &w.stats))
}

impl Inventory {
    /// Admission check for [`Inventory::unequip_by_slot_index`]
    pub fn can_unequip(&self, index: usize) -> bool {
        index < self.ledger.len()
    }

    /// Release the weapon slot holding the entry at `index`.
    ///
    /// The first slot whose weapon matches the entry's id and stats is torn
    /// down and the entry marked unequipped. Returns `false` without changing
    /// anything when no slot matches.
    pub fn unequip_by_slot_index(
        &mut self,
        index: usize,
        slots: &mut [WeaponSlot],
        factory: &mut dyn WeaponFactory,
    ) -> Result<bool> {
        let entry = self.ledger.entry(index)?;
        let item_id = entry.item_id.clone();
        let equipped = entry.equipped;
        let stats = entry.effective_stats(self.catalog.lookup(&item_id));

        let Some(slot) = slots.iter_mut().find(|s| s.holds(&item_id, &stats)) else {
            log::debug!("No weapon slot holds ledger entry {} ('{}')", index, item_id);
            return Ok(false);
        };
        let Some(weapon) = unequip_slot(factory, slot) else {
            return Ok(false);
        };

        // An identical entry may be the one actually bound to the slot
        let released = if equipped {
            index
        } else {
            self.find_bound_entry(&weapon).unwrap_or(index)
        };
        self.ledger.entry_mut(released)?.equipped = false;
        self.events.push(InventoryEvent::Unequipped {
            index: released,
            item_id,
        });
        Ok(true)
    }

    /// Equip the weapon entry at `index` into `slots[slot_index]`.
    ///
    /// Whatever entry the slot held before is marked unequipped, and the entry
    /// is released from any other slot it was bound to.
    pub fn equip_from_ledger(
        &mut self,
        index: usize,
        slots: &mut [WeaponSlot],
        slot_index: usize,
        factory: &mut dyn WeaponFactory,
    ) -> Result<WeaponHandle> {
        let entry = self.ledger.entry(index)?;
        let catalog = Arc::clone(&self.catalog);
        let definition = catalog
            .lookup(&entry.item_id)
            .ok_or_else(|| InventoryError::UnknownItem(entry.item_id.clone()))?;
        if !definition.equippable {
            return Err(InventoryError::NotEquippable(definition.id.clone()));
        }
        let kind = definition
            .weapon_kind
            .as_deref()
            .ok_or(InventoryError::MissingArgument("weapon kind"))?;
        if slot_index >= slots.len() {
            return Err(InventoryError::MissingArgument("weapon slot"));
        }
        let stats = entry.effective_stats(Some(definition));
        let already_equipped = entry.equipped;

        if already_equipped {
            self.unequip_by_slot_index(index, slots, factory)?;
        }

        let slot = &mut slots[slot_index];
        if let Some(previous) = slot.weapon().cloned() {
            if let Some(held) = self.find_bound_entry(&previous) {
                self.ledger.entry_mut(held)?.equipped = false;
                self.events.push(InventoryEvent::Unequipped {
                    index: held,
                    item_id: previous.item_id,
                });
            }
        }

        let handle = equip_weapon(factory, Some(slot), Some(kind), stats)?;
        self.ledger.entry_mut(index)?.equipped = true;
        self.events.push(InventoryEvent::Equipped {
            index,
            item_id: definition.id.clone(),
        });
        Ok(handle)
    }

    /// First equipped entry matching a bound weapon
    fn find_bound_entry(&self, weapon: &BoundWeapon) -> Option<usize> {
        self.ledger.iter().position(|e| {
            e.equipped
                && e.item_id == weapon.item_id
                && e.effective_stats(self.catalog.lookup(&e.item_id)) == weapon.stats
        })
    }
}

#[derive(Debug, Clone)]
struct LiveWeapon {
    item_id: String,
    stats: CharacterStats,
}

/// Reference weapon factory: maps weapon kinds to items and tracks live
/// instances by handle.
#[derive(Debug, Default)]
pub struct WeaponPool {
    kinds: HashMap<String, String>,
    live: HashMap<WeaponHandle, LiveWeapon>,
    next_handle: u64,
}

impl WeaponPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the item a weapon kind represents
    pub fn register_kind(&mut self, kind: impl Into<String>, item_id: impl Into<String>) {
        self.kinds.insert(kind.into(), item_id.into());
    }

    /// Builder-style register
    pub fn with_kind(mut self, kind: impl Into<String>, item_id: impl Into<String>) -> Self {
        self.register_kind(kind, item_id);
        self
    }

    /// Whether the handle refers to a live weapon
    pub fn is_live(&self, handle: WeaponHandle) -> bool {
        self.live.contains_key(&handle)
    }

    /// Number of live weapons
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Stats written onto a live weapon
    pub fn stats_of(&self, handle: WeaponHandle) -> Option<&CharacterStats> {
        self.live.get(&handle).map(|w| &w.stats)
    }

    /// Item a live weapon represents
    pub fn item_of(&self, handle: WeaponHandle) -> Option<&str> {
        self.live.get(&handle).map(|w| w.item_id.as_str())
    }
}

impl WeaponFactory for WeaponPool {
    fn instantiate(&mut self, kind: &str) -> Option<WeaponInstance> {
        let item_id = self.kinds.get(kind)?.clone();
        self.next_handle += 1;
        let handle = WeaponHandle(self.next_handle);
        self.live.insert(
            handle,
            LiveWeapon {
                item_id: item_id.clone(),
                stats: CharacterStats::default(),
            },
        );
        Some(WeaponInstance { handle, item_id })
    }

    fn destroy(&mut self, handle: WeaponHandle) {
        if self.live.remove(&handle).is_none() {
            log::warn!("Destroy requested for unknown weapon {:?}", handle);
        }
    }

    fn apply_stats(&mut self, handle: WeaponHandle, stats: &CharacterStats) {
        if let Some(weapon) = self.live.get_mut(&handle) {
            weapon.stats = *stats;
        }
    }
}
