//! Item definitions and stack entries

use crate::stats::CharacterStats;
use serde::{Deserialize, Serialize};

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Weapons (swords, staves, bows)
    Weapon,
    /// Armor pieces
    Armor,
    /// Consumables (potions, food, etc.)
    Consumable,
    /// Materials for crafting
    Material,
    /// Quest items
    Quest,
    /// Misc items
    #[default]
    Misc,
}

/// Item definition, one row of the item table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Verb shown for the use action ("Use", "Drink", "Read")
    pub action: String,
    /// Category
    pub category: ItemCategory,
    /// Base value/price
    pub value: u32,
    /// Weight per unit
    pub weight: f32,
    /// Whether units of this item share stacks
    pub stackable: bool,
    /// Whether the item can be used/consumed
    pub usable: bool,
    /// Whether the item can be equipped into a weapon slot
    pub equippable: bool,
    /// Weapon template the weapon factory instantiates on equip
    pub weapon_kind: Option<String>,
    /// Stats a fresh, unmodified instance carries
    pub base_stats: CharacterStats,
    /// Template used to materialize the item in the world (empty = item id)
    pub pickup_template: String,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            action: "Use".to_string(),
            category: ItemCategory::default(),
            value: 0,
            weight: 0.0,
            stackable: false,
            usable: false,
            equippable: false,
            weapon_kind: None,
            base_stats: CharacterStats::default(),
            pickup_template: String::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the use verb
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set value
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Set weight
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    /// Make stackable
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Set usable
    pub fn with_usable(mut self, usable: bool) -> Self {
        self.usable = usable;
        self
    }

    /// Make equippable as the given weapon kind. Equippable items never
    /// stack, whatever `stackable` says.
    pub fn with_weapon(mut self, kind: impl Into<String>) -> Self {
        self.equippable = true;
        self.weapon_kind = Some(kind.into());
        self.category = ItemCategory::Weapon;
        self
    }

    /// Set base stats
    pub fn with_base_stats(mut self, stats: CharacterStats) -> Self {
        self.base_stats = stats;
        self
    }

    /// Set the world pickup template
    pub fn with_pickup_template(mut self, template: impl Into<String>) -> Self {
        self.pickup_template = template.into();
        self
    }

    /// Whether units share stack entries
    pub fn stacks(&self) -> bool {
        self.stackable && !self.equippable
    }

    /// Template handed to the world spawner
    pub fn world_template(&self) -> &str {
        if self.pickup_template.is_empty() {
            &self.id
        } else {
            &self.pickup_template
        }
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new("unknown", "Unknown Item")
    }
}

/// One entry of the stack ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Item ID (references ItemDefinition)
    pub item_id: String,
    /// Quantity, never zero while held by a ledger
    pub quantity: u32,
    /// Instance stats, present only for modified items
    pub stats: Option<CharacterStats>,
    /// Whether a weapon slot currently holds this entry
    pub equipped: bool,
    /// Whether the instance stats have been written and must not be replaced
    pub stats_finalized: bool,
}

impl StackEntry {
    /// Create a plain entry
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            stats: None,
            equipped: false,
            stats_finalized: false,
        }
    }

    /// Create an entry carrying modified instance stats
    pub fn modified(item_id: impl Into<String>, quantity: u32, stats: CharacterStats) -> Self {
        Self {
            stats: Some(stats),
            stats_finalized: true,
            ..Self::new(item_id, quantity)
        }
    }

    /// Whether this entry carries instance-specific stats
    pub fn is_modified(&self) -> bool {
        self.stats.is_some()
    }

    /// Whether units with the given id and stats may join this entry
    pub fn accepts(&self, item_id: &str, stats: Option<&CharacterStats>) -> bool {
        self.item_id == item_id && self.stats.as_ref() == stats
    }

    /// Stats this entry presents: its own snapshot or the catalog defaults
    pub fn effective_stats(&self, definition: Option<&ItemDefinition>) -> CharacterStats {
        self.stats
            .or_else(|| definition.map(|d| d.base_stats))
            .unwrap_or_default()
    }

    /// Add to this entry up to `max_stack` (returns overflow)
    pub fn add(&mut self, amount: u32, max_stack: u32) -> u32 {
        let space = max_stack.saturating_sub(self.quantity);
        let to_add = amount.min(space);
        self.quantity += to_add;
        amount - to_add
    }

    /// Remove from this entry (returns amount actually removed)
    pub fn remove(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.quantity);
        self.quantity -= to_remove;
        to_remove
    }

    /// Check if this entry is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
