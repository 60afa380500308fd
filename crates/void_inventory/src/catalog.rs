//! Item catalog: read-only lookup of item definitions by identifier

use crate::error::Result;
use crate::item::ItemDefinition;
use std::collections::HashMap;

/// Source of item metadata.
///
/// Inventories receive a catalog at construction and only ever read from it.
pub trait ItemCatalog: Send + Sync {
    /// Look up an item definition
    fn lookup(&self, item_id: &str) -> Option<&ItemDefinition>;

    /// Check if an identifier resolves
    fn contains(&self, item_id: &str) -> bool {
        self.lookup(item_id).is_some()
    }
}

/// In-memory item table
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    items: HashMap<String, ItemDefinition>,
}

impl ItemDatabase {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a JSON array of item definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<ItemDefinition> = serde_json::from_str(json)?;
        let mut db = Self::new();
        for row in rows {
            db.register(row);
        }
        log::debug!("Loaded item table with {} rows", db.len());
        Ok(db)
    }

    /// Register a definition, replacing any row with the same id
    pub fn register(&mut self, definition: ItemDefinition) {
        if let Some(previous) = self.items.insert(definition.id.clone(), definition) {
            log::warn!("Item '{}' registered twice, keeping the newer row", previous.id);
        }
    }

    /// Builder-style register
    pub fn with_item(mut self, definition: ItemDefinition) -> Self {
        self.register(definition);
        self
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all definitions
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

impl ItemCatalog for ItemDatabase {
    fn lookup(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.items.get(item_id)
    }
}
