//! Two-phase inventory requests: admission, then application
//!
//! A request arriving from the command/RPC layer is first checked with
//! [`Inventory::admit`], which never mutates. Only admitted requests reach the
//! mutating half, so a rejected request leaves no trace in the ledger.

use crate::error::Result;
use crate::inventory::Inventory;
use crate::item::StackEntry;
use crate::stacking::AddOutcome;
use crate::stats::CharacterStats;
use serde::{Deserialize, Serialize};

/// Mutating request against an inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryRequest {
    /// Add plain units of an item
    AddItem { item_id: String, quantity: u32 },
    /// Add units carrying modified stats
    AddModifiedItem {
        item_id: String,
        quantity: u32,
        stats: CharacterStats,
    },
    /// Drop units of an entry into the world
    DropItem { index: usize, amount: u32 },
    /// Use up units of an entry
    ConsumeItem { index: usize, amount: u32 },
}

/// Result of an applied request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Units were stored and/or spilled
    Added(AddOutcome),
    /// Units were dropped into the world
    Dropped,
    /// Units were consumed
    Consumed(StackEntry),
}

impl Inventory {
    /// Admission check. Pure: the same ledger always gives the same answer.
    pub fn admit(&self, request: &InventoryRequest) -> Result<()> {
        match request {
            InventoryRequest::AddItem { item_id, quantity } => {
                self.check_add(item_id, *quantity, None)
            }
            InventoryRequest::AddModifiedItem {
                item_id,
                quantity,
                stats,
            } => self.check_add(item_id, *quantity, Some(stats)),
            InventoryRequest::DropItem { index, amount } => self.check_removal(*index, *amount),
            InventoryRequest::ConsumeItem { index, amount } => self.check_consume(*index, *amount),
        }
    }

    /// Whether `request` would be admitted
    pub fn can_apply(&self, request: &InventoryRequest) -> bool {
        self.admit(request).is_ok()
    }

    /// Admit and then execute a request
    pub fn apply(&mut self, request: InventoryRequest) -> Result<RequestOutcome> {
        if let Err(err) = self.admit(&request) {
            log::debug!("Rejected {:?}: {}", request, err);
            return Err(err);
        }

        match request {
            InventoryRequest::AddItem { item_id, quantity } => {
                self.add_item(&item_id, quantity).map(RequestOutcome::Added)
            }
            InventoryRequest::AddModifiedItem {
                item_id,
                quantity,
                stats,
            } => self
                .add_modified_item(&item_id, quantity, stats)
                .map(RequestOutcome::Added),
            InventoryRequest::DropItem { index, amount } => {
                self.drop_item(index, amount).map(|()| RequestOutcome::Dropped)
            }
            InventoryRequest::ConsumeItem { index, amount } => {
                self.consume_item(index, amount).map(RequestOutcome::Consumed)
            }
        }
    }
}
