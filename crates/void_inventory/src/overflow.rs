//! Overflow handler: units the ledger cannot hold go into the world

use crate::error::{InventoryError, Result};
use crate::inventory::{Inventory, InventoryEvent};
use crate::item::ItemDefinition;
use crate::stats::CharacterStats;
use crate::world::{SpawnRequest, WorldSpawner};

/// Issue a single spawn request for `quantity` units of `definition`.
///
/// A quantity of zero is spawned as one unit. Returns the quantity spawned.
pub(crate) fn spill(
    spawner: &mut dyn WorldSpawner,
    definition: &ItemDefinition,
    location: [f32; 3],
    quantity: u32,
    stats: Option<CharacterStats>,
) -> u32 {
    let quantity = quantity.max(1);
    log::debug!(
        "Spilling {} x '{}' into the world at {:?}",
        quantity,
        definition.id,
        location
    );
    spawner.spawn_world_item(SpawnRequest {
        item_id: definition.id.clone(),
        template: definition.world_template().to_string(),
        location,
        quantity,
        stats,
    });
    quantity
}

impl Inventory {
    /// Materialize units of an item near the owner without touching the ledger.
    ///
    /// Returns the quantity actually spawned (at least one).
    pub fn spill_excess(
        &mut self,
        item_id: &str,
        quantity: u32,
        stats: Option<CharacterStats>,
    ) -> Result<u32> {
        let definition = self
            .catalog
            .lookup(item_id)
            .ok_or_else(|| InventoryError::UnknownItem(item_id.to_string()))?;

        let spilled = spill(
            self.spawner.as_mut(),
            definition,
            self.owner_position,
            quantity,
            stats,
        );
        self.events.push(InventoryEvent::Spilled {
            item_id: item_id.to_string(),
            quantity: spilled,
        });
        Ok(spilled)
    }
}
