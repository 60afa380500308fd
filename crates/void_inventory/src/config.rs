//! Inventory configuration

use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};

/// Inventory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Maximum number of ledger entries
    pub capacity: usize,

    /// Maximum quantity of a single stack of a stackable item
    pub max_stack_size: u32,

    /// Carry weight before the owner counts as over-encumbered (0 = unlimited)
    pub max_carry_weight: f32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            max_stack_size: 99,
            max_carry_weight: 0.0,
        }
    }
}

impl InventoryConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set max stack size
    pub fn with_max_stack_size(mut self, max: u32) -> Self {
        self.max_stack_size = max;
        self
    }

    /// Set maximum carry weight
    pub fn with_max_carry_weight(mut self, weight: f32) -> Self {
        self.max_carry_weight = weight;
        self
    }

    /// Check the configuration describes a usable inventory
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(InventoryError::InvalidConfig("capacity must be at least 1".into()));
        }
        if self.max_stack_size == 0 {
            return Err(InventoryError::InvalidConfig("max_stack_size must be at least 1".into()));
        }
        if !self.max_carry_weight.is_finite() || self.max_carry_weight < 0.0 {
            return Err(InventoryError::InvalidConfig(format!(
                "max_carry_weight must be a non-negative number, got {}",
                self.max_carry_weight
            )));
        }
        Ok(())
    }
}
