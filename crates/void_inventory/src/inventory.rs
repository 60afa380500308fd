//! Inventory component: owns the stack ledger and its collaborators

use crate::catalog::ItemCatalog;
use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::item::StackEntry;
use crate::ledger::StackLedger;
use crate::overflow;
use crate::world::WorldSpawner;
use std::fmt;
use std::sync::Arc;

/// Inventory events
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    /// New entry created
    ItemAdded {
        index: usize,
        item_id: String,
        quantity: u32,
    },
    /// Existing entry grew
    StackIncreased {
        index: usize,
        item_id: String,
        quantity: u32,
    },
    /// Units left an entry (drop or consumption)
    ItemRemoved {
        index: usize,
        item_id: String,
        quantity: u32,
    },
    /// Units were materialized in the world
    Spilled { item_id: String, quantity: u32 },
    /// Entry was bound to a weapon slot
    Equipped { index: usize, item_id: String },
    /// Entry was released from a weapon slot
    Unequipped { index: usize, item_id: String },
    /// Over-encumbered flag flipped
    EncumbranceChanged { over_encumbered: bool },
}

/// Inventory component
pub struct Inventory {
    pub(crate) config: InventoryConfig,
    pub(crate) ledger: StackLedger,
    pub(crate) catalog: Arc<dyn ItemCatalog>,
    pub(crate) spawner: Box<dyn WorldSpawner>,
    pub(crate) owner_position: [f32; 3],
    over_encumbered: bool,
    pub(crate) events: Vec<InventoryEvent>,
}

impl Inventory {
    /// Create an inventory with its catalog and world spawner
    pub fn new(
        config: InventoryConfig,
        catalog: Arc<dyn ItemCatalog>,
        spawner: Box<dyn WorldSpawner>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger: StackLedger::new(config.capacity),
            config,
            catalog,
            spawner,
            owner_position: [0.0; 3],
            over_encumbered: false,
            events: Vec::new(),
        })
    }

    /// Configuration this inventory was built with
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Read-only view of the ledger
    pub fn ledger(&self) -> &StackLedger {
        &self.ledger
    }

    /// Catalog used for item lookups
    pub fn catalog(&self) -> &dyn ItemCatalog {
        self.catalog.as_ref()
    }

    /// Update where spilled items appear
    pub fn set_owner_position(&mut self, position: [f32; 3]) {
        self.owner_position = position;
    }

    /// Current owner position
    pub fn owner_position(&self) -> [f32; 3] {
        self.owner_position
    }

    /// Get an entry
    pub fn get(&self, index: usize) -> Option<&StackEntry> {
        self.ledger.get(index)
    }

    /// Check if no further entry can be created
    pub fn is_full(&self) -> bool {
        self.ledger.is_full()
    }

    /// Check if the inventory holds nothing
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Whether any entry holds the item
    pub fn contains(&self, item_id: &str) -> bool {
        self.ledger.contains(item_id)
    }

    /// Index of the first entry holding the item
    pub fn find(&self, item_id: &str) -> Option<usize> {
        self.ledger.find(item_id)
    }

    /// Count total quantity of an item
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.ledger.count_item(item_id)
    }

    /// Cached over-encumbered flag, refreshed after every mutation
    pub fn is_over_encumbered(&self) -> bool {
        self.over_encumbered
    }

    /// Sum of quantity x weight over the ledger. Unknown items weigh nothing.
    pub fn carried_weight(&self) -> f32 {
        self.ledger
            .iter()
            .map(|e| {
                let weight = self.catalog.lookup(&e.item_id).map_or(0.0, |d| d.weight);
                weight * e.quantity as f32
            })
            .sum()
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove units from an entry and materialize them next to the owner.
    ///
    /// Equipped entries must be unequipped first.
    pub fn drop_item(&mut self, index: usize, amount: u32) -> Result<()> {
        self.check_removal(index, amount)?;

        let catalog = Arc::clone(&self.catalog);
        let item_id = self.ledger.entry(index)?.item_id.clone();
        let definition = catalog
            .lookup(&item_id)
            .ok_or_else(|| InventoryError::UnknownItem(item_id.clone()))?;

        let portion = self.take_units(index, amount)?;
        let spilled = overflow::spill(
            self.spawner.as_mut(),
            definition,
            self.owner_position,
            portion.quantity,
            portion.stats,
        );
        self.events.push(InventoryEvent::Spilled {
            item_id,
            quantity: spilled,
        });

        self.refresh_encumbrance();
        Ok(())
    }

    /// Use up units of a usable item. Returns the consumed portion.
    pub fn consume_item(&mut self, index: usize, amount: u32) -> Result<StackEntry> {
        self.check_consume(index, amount)?;

        let portion = self.take_units(index, amount)?;
        self.refresh_encumbrance();
        Ok(portion)
    }

    /// Validation shared by drop and consume; never mutates
    pub(crate) fn check_removal(&self, index: usize, amount: u32) -> Result<()> {
        let entry = self.ledger.entry(index)?;
        if amount == 0 || amount > entry.quantity {
            return Err(InventoryError::invalid_quantity(&entry.item_id, amount));
        }
        if entry.equipped {
            return Err(InventoryError::ItemEquipped(index));
        }
        if !self.catalog.contains(&entry.item_id) {
            return Err(InventoryError::UnknownItem(entry.item_id.clone()));
        }
        Ok(())
    }

    /// Validation for consume; never mutates
    pub(crate) fn check_consume(&self, index: usize, amount: u32) -> Result<()> {
        self.check_removal(index, amount)?;
        let item_id = &self.ledger.entry(index)?.item_id;
        if !self.catalog.lookup(item_id).is_some_and(|d| d.usable) {
            return Err(InventoryError::NotUsable(item_id.clone()));
        }
        Ok(())
    }

    /// Remove units and restore the single-partial-stack invariant
    fn take_units(&mut self, index: usize, amount: u32) -> Result<StackEntry> {
        let portion = self.ledger.remove_quantity(index, amount)?;
        self.events.push(InventoryEvent::ItemRemoved {
            index,
            item_id: portion.item_id.clone(),
            quantity: portion.quantity,
        });

        let stackable = self
            .catalog
            .lookup(&portion.item_id)
            .is_some_and(|d| d.stacks());
        if stackable {
            self.ledger.consolidate(
                &portion.item_id,
                portion.stats.as_ref(),
                self.config.max_stack_size,
            );
        }
        Ok(portion)
    }

    /// Recompute the cached encumbrance flag
    pub(crate) fn refresh_encumbrance(&mut self) {
        let limit = self.config.max_carry_weight;
        let over = limit > 0.0 && self.carried_weight() > limit;
        if over != self.over_encumbered {
            self.over_encumbered = over;
            log::debug!("Inventory over-encumbered: {}", over);
            self.events
                .push(InventoryEvent::EncumbranceChanged { over_encumbered: over });
        }
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("config", &self.config)
            .field("ledger", &self.ledger)
            .field("owner_position", &self.owner_position)
            .field("over_encumbered", &self.over_encumbered)
            .finish_non_exhaustive()
    }
}
