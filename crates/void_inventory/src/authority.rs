//! Authoritative inventory: admits and applies requests under a single lock

use crate::equipment::{WeaponFactory, WeaponSlot};
use crate::error::{InventoryError, Result};
use crate::inventory::Inventory;
use crate::request::{InventoryRequest, RequestOutcome};
use parking_lot::Mutex;

/// Server-side owner of an inventory.
///
/// Each request is admitted and applied while the lock is held, so readers
/// never observe a multi-entry add half done.
#[derive(Debug)]
pub struct InventoryAuthority {
    inventory: Mutex<Inventory>,
}

impl InventoryAuthority {
    /// Take ownership of an inventory
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Mutex::new(inventory),
        }
    }

    /// Admit and apply a request
    pub fn submit(&self, request: InventoryRequest) -> Result<RequestOutcome> {
        self.inventory.lock().apply(request)
    }

    /// Admit and apply an unequip request
    pub fn submit_unequip(
        &self,
        index: usize,
        slots: &mut [WeaponSlot],
        factory: &mut dyn WeaponFactory,
    ) -> Result<bool> {
        let mut inventory = self.inventory.lock();
        if !inventory.can_unequip(index) {
            let len = inventory.ledger().len();
            log::debug!("Rejected unequip of ledger entry {} (length {})", index, len);
            return Err(InventoryError::IndexOutOfRange { index, len });
        }
        inventory.unequip_by_slot_index(index, slots, factory)
    }

    /// Read a consistent snapshot
    pub fn read<R>(&self, f: impl FnOnce(&Inventory) -> R) -> R {
        f(&self.inventory.lock())
    }

    /// Give the inventory back
    pub fn into_inner(self) -> Inventory {
        self.inventory.into_inner()
    }
}
