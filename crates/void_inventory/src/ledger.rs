//! Stack ledger: the ordered, bounded list of stack entries an inventory owns
//!
//! Insertion order is display order. The ledger never holds more than
//! `capacity` entries and never holds an entry with a quantity of zero.

use crate::error::{InventoryError, Result};
use crate::item::StackEntry;
use crate::stats::CharacterStats;
use serde::{Deserialize, Serialize};

/// Ordered, bounded sequence of stack entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredLedger")]
pub struct StackLedger {
    entries: Vec<StackEntry>,
    capacity: usize,
}

/// Serialized ledger before its bounds are checked
#[derive(Deserialize)]
struct StoredLedger {
    entries: Vec<StackEntry>,
    capacity: usize,
}

impl TryFrom<StoredLedger> for StackLedger {
    type Error = InventoryError;

    fn try_from(stored: StoredLedger) -> Result<Self> {
        if stored.entries.len() > stored.capacity {
            return Err(InventoryError::InvalidLedger(format!(
                "{} entries exceed capacity {}",
                stored.entries.len(),
                stored.capacity
            )));
        }
        if let Some(index) = stored.entries.iter().position(StackEntry::is_empty) {
            return Err(InventoryError::InvalidLedger(format!(
                "entry {} holds no units",
                index
            )));
        }
        Ok(Self {
            entries: stored.entries,
            capacity: stored.capacity,
        })
    }
}

impl StackLedger {
    /// Create an empty ledger
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether no further entry can be created
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Number of entries that can still be created
    pub fn free_entries(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    /// Get an entry
    pub fn get(&self, index: usize) -> Option<&StackEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut StackEntry> {
        self.entries.get_mut(index)
    }

    /// Entry at `index`, or `IndexOutOfRange`
    pub fn entry(&self, index: usize) -> Result<&StackEntry> {
        self.entries.get(index).ok_or(InventoryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Result<&mut StackEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange { index, len })
    }

    /// Iterate over entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter()
    }

    /// Whether any entry holds the item
    pub fn contains(&self, item_id: &str) -> bool {
        self.entries.iter().any(|e| e.item_id == item_id)
    }

    /// Index of the first entry holding the item
    pub fn find(&self, item_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.item_id == item_id)
    }

    /// Index of the first entry that accepts the item and is below `max_stack`
    pub fn find_partial(
        &self,
        item_id: &str,
        stats: Option<&CharacterStats>,
        max_stack: u32,
    ) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.accepts(item_id, stats) && e.quantity < max_stack)
    }

    /// Total quantity of an item across all entries
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item_id == item_id)
            .map(|e| e.quantity)
            .sum()
    }

    /// Append an entry. Returns its index, or `None` when the ledger is full
    /// or the entry is empty.
    pub(crate) fn push(&mut self, entry: StackEntry) -> Option<usize> {
        if self.is_full() || entry.is_empty() {
            return None;
        }
        self.entries.push(entry);
        Some(self.entries.len() - 1)
    }

    /// Take `amount` units from an entry, removing it when it reaches zero.
    ///
    /// Returns the removed portion as its own entry.
    pub(crate) fn remove_quantity(&mut self, index: usize, amount: u32) -> Result<StackEntry> {
        let entry = self.entry_mut(index)?;
        if amount == 0 || amount > entry.quantity {
            return Err(InventoryError::invalid_quantity(&entry.item_id, amount));
        }

        let removed = entry.remove(amount);
        let portion = StackEntry {
            quantity: removed,
            equipped: false,
            ..entry.clone()
        };

        if entry.is_empty() {
            self.entries.remove(index);
        }
        Ok(portion)
    }

    /// Merge partial stacks of `item_id` carrying `stats` until at most one
    /// remains.
    ///
    /// Units move from the latest partial stack into the earliest one, so
    /// earlier entries keep their place in display order.
    pub(crate) fn consolidate(
        &mut self,
        item_id: &str,
        stats: Option<&CharacterStats>,
        max_stack: u32,
    ) {
        loop {
            let partials: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| {
                    e.accepts(item_id, stats) && !e.equipped && e.quantity < max_stack
                })
                .map(|(i, _)| i)
                .collect();

            let (first, last) = match partials.as_slice() {
                [first, .., last] => (*first, *last),
                _ => break,
            };

            let moved = (max_stack - self.entries[first].quantity).min(self.entries[last].quantity);
            self.entries[first].quantity += moved;
            self.entries[last].quantity -= moved;
            if self.entries[last].is_empty() {
                self.entries.remove(last);
            }
        }
    }
}
