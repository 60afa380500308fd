//! Error types for the inventory system

use thiserror::Error;

/// Inventory errors
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Item identifier is not in the catalog
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Quantity was zero or larger than the entry holds
    #[error("Invalid quantity {quantity} for '{item_id}'")]
    InvalidQuantity { item_id: String, quantity: u32 },

    /// Ledger index is not valid
    #[error("Ledger index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Ledger is full and nothing of the request can be placed
    #[error("Inventory full, cannot accept {quantity} of '{item_id}'")]
    CapacityExhausted { item_id: String, quantity: u32 },

    /// A required collaborator reference was absent
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// Item does not stack
    #[error("Item '{0}' is not stackable")]
    NotStackable(String),

    /// Item cannot be equipped
    #[error("Item '{0}' is not equippable")]
    NotEquippable(String),

    /// Item cannot be used or consumed
    #[error("Item '{0}' cannot be used")]
    NotUsable(String),

    /// Entry is equipped and must be unequipped first
    #[error("Ledger entry {0} is equipped")]
    ItemEquipped(usize),

    /// Weapon factory could not produce the requested kind
    #[error("Weapon kind '{0}' could not be instantiated")]
    WeaponUnavailable(String),

    /// Stored ledger breaks its own bounds
    #[error("Invalid ledger: {0}")]
    InvalidLedger(String),

    /// Invalid inventory configuration
    #[error("Invalid inventory configuration: {0}")]
    InvalidConfig(String),

    /// Malformed JSON for a config or item table
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InventoryError {
    /// Create an invalid quantity error
    pub fn invalid_quantity(item_id: impl Into<String>, quantity: u32) -> Self {
        InventoryError::InvalidQuantity {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Create a capacity exhausted error
    pub fn capacity_exhausted(item_id: impl Into<String>, quantity: u32) -> Self {
        InventoryError::CapacityExhausted {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
