//! Stacking engine: distributes incoming units over existing and new entries
//!
//! Stackable items always top off the first partial stack before a new stack
//! is opened, and every new stack is re-checked against capacity. Whatever
//! the ledger cannot hold is handed to the overflow handler, so a successful
//! add never loses a unit.

use crate::error::{InventoryError, Result};
use crate::inventory::{Inventory, InventoryEvent};
use crate::item::{ItemDefinition, StackEntry};
use crate::overflow;
use crate::stats::CharacterStats;
use std::sync::Arc;

/// How an add request was distributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Units now held by the ledger
    pub stored: u32,
    /// Units materialized in the world because the ledger was full
    pub spilled: u32,
}

impl AddOutcome {
    /// Whether every unit found room in the ledger
    pub fn fully_stored(&self) -> bool {
        self.spilled == 0
    }
}

impl Inventory {
    /// Add units of a plain item
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> Result<AddOutcome> {
        self.add_units(item_id, quantity, None)
    }

    /// Add units that carry instance-specific stats (e.g. a dropped, enchanted
    /// weapon being picked back up). Modified units only share stacks with
    /// entries holding identical stats.
    pub fn add_modified_item(
        &mut self,
        item_id: &str,
        quantity: u32,
        stats: CharacterStats,
    ) -> Result<AddOutcome> {
        self.add_units(item_id, quantity, Some(stats))
    }

    /// Check whether an add request may proceed. Never mutates.
    ///
    /// A full ledger still admits a stackable item when a partial stack of it
    /// can absorb at least one unit.
    pub fn check_add(
        &self,
        item_id: &str,
        quantity: u32,
        stats: Option<&CharacterStats>,
    ) -> Result<()> {
        if quantity == 0 {
            return Err(InventoryError::invalid_quantity(item_id, quantity));
        }
        let definition = self
            .catalog
            .lookup(item_id)
            .ok_or_else(|| InventoryError::UnknownItem(item_id.to_string()))?;

        if self.ledger.is_full() {
            let absorbable = definition.stacks()
                && self
                    .ledger
                    .find_partial(item_id, stats, self.config.max_stack_size)
                    .is_some();
            if !absorbable {
                return Err(InventoryError::capacity_exhausted(item_id, quantity));
            }
        }
        Ok(())
    }

    /// Grow the entry at `index`.
    ///
    /// Whatever the entry cannot hold goes to the first partial stack of the
    /// same item, then into new stacks while capacity allows, then spills.
    pub fn increase_quantity(&mut self, index: usize, amount: u32) -> Result<AddOutcome> {
        let entry = self.ledger.entry(index)?;
        if amount == 0 {
            return Err(InventoryError::invalid_quantity(&entry.item_id, amount));
        }

        let catalog = Arc::clone(&self.catalog);
        let definition = catalog
            .lookup(&entry.item_id)
            .ok_or_else(|| InventoryError::UnknownItem(entry.item_id.clone()))?;
        if !definition.stacks() {
            return Err(InventoryError::NotStackable(definition.id.clone()));
        }

        let stats = entry.stats;
        let leftover = self.top_off(index, &definition.id, amount);
        let partial = self
            .ledger
            .find_partial(&definition.id, stats.as_ref(), self.config.max_stack_size);
        let rest = self.fill_stacks(definition, partial, stats, leftover);
        self.refresh_encumbrance();
        Ok(AddOutcome {
            stored: amount - rest.spilled,
            spilled: rest.spilled,
        })
    }

    fn add_units(
        &mut self,
        item_id: &str,
        quantity: u32,
        stats: Option<CharacterStats>,
    ) -> Result<AddOutcome> {
        self.check_add(item_id, quantity, stats.as_ref())?;

        let catalog = Arc::clone(&self.catalog);
        let definition = catalog
            .lookup(item_id)
            .ok_or_else(|| InventoryError::UnknownItem(item_id.to_string()))?;

        let outcome = if definition.stacks() {
            let partial =
                self.ledger
                    .find_partial(item_id, stats.as_ref(), self.config.max_stack_size);
            self.fill_stacks(definition, partial, stats, quantity)
        } else {
            // Plain units get one entry each; a modified instance keeps all of
            // its units together under its stats.
            let chunk = if stats.is_some() { quantity } else { 1 };
            let remaining = self.open_entries(&definition.id, stats, quantity, chunk);
            self.settle(definition, stats, quantity, remaining)
        };

        self.refresh_encumbrance();
        Ok(outcome)
    }

    /// Top off `partial` (if any), then open full stacks, then spill.
    fn fill_stacks(
        &mut self,
        definition: &ItemDefinition,
        partial: Option<usize>,
        stats: Option<CharacterStats>,
        quantity: u32,
    ) -> AddOutcome {
        let remaining = match partial {
            Some(index) => self.top_off(index, &definition.id, quantity),
            None => quantity,
        };
        let remaining =
            self.open_entries(&definition.id, stats, remaining, self.config.max_stack_size);
        self.settle(definition, stats, quantity, remaining)
    }

    /// Grow the entry at `index` up to the max stack. Returns the leftover.
    fn top_off(&mut self, index: usize, item_id: &str, quantity: u32) -> u32 {
        let Some(entry) = self.ledger.get_mut(index) else {
            return quantity;
        };
        let remaining = entry.add(quantity, self.config.max_stack_size);
        let added = quantity - remaining;
        if added > 0 {
            self.events.push(InventoryEvent::StackIncreased {
                index,
                item_id: item_id.to_string(),
                quantity: added,
            });
        }
        remaining
    }

    /// Create entries of at most `chunk` units until `remaining` is placed or
    /// the ledger is full. Returns what could not be placed.
    fn open_entries(
        &mut self,
        item_id: &str,
        stats: Option<CharacterStats>,
        mut remaining: u32,
        chunk: u32,
    ) -> u32 {
        while remaining > 0 {
            let amount = remaining.min(chunk.max(1));
            let entry = match stats {
                Some(stats) => StackEntry::modified(item_id, amount, stats),
                None => StackEntry::new(item_id, amount),
            };
            let Some(index) = self.ledger.push(entry) else {
                break;
            };
            log::debug!("Opened stack {} with {} x '{}'", index, amount, item_id);
            self.events.push(InventoryEvent::ItemAdded {
                index,
                item_id: item_id.to_string(),
                quantity: amount,
            });
            remaining -= amount;
        }
        remaining
    }

    /// Spill whatever is left and report the split
    fn settle(
        &mut self,
        definition: &ItemDefinition,
        stats: Option<CharacterStats>,
        quantity: u32,
        remaining: u32,
    ) -> AddOutcome {
        if remaining == 0 {
            return AddOutcome {
                stored: quantity,
                spilled: 0,
            };
        }

        log::debug!(
            "Inventory full, {} of {} x '{}' go to the world",
            remaining,
            quantity,
            definition.id
        );
        let spilled = overflow::spill(
            self.spawner.as_mut(),
            definition,
            self.owner_position,
            remaining,
            stats,
        );
        self.events.push(InventoryEvent::Spilled {
            item_id: definition.id.clone(),
            quantity: spilled,
        });

        AddOutcome {
            stored: quantity - remaining,
            spilled,
        }
    }
}
