//! World-spawn collaborator: materializes items near their owner

use crate::stats::CharacterStats;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to place an item representation in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Item ID
    pub item_id: String,
    /// Pickup template to instantiate
    pub template: String,
    /// Owner position; the spawner picks the final placement around it
    pub location: [f32; 3],
    /// Quantity the spawned pickup carries
    pub quantity: u32,
    /// Modified stats the pickup keeps, if the units carried any
    pub stats: Option<CharacterStats>,
}

/// Places item pickups in the world.
///
/// Calls are fire-and-forget: the inventory never waits on or inspects the
/// outcome.
pub trait WorldSpawner: Send {
    /// Materialize an item near `request.location`
    fn spawn_world_item(&mut self, request: SpawnRequest);
}

/// Spawner that queues requests for the host to drain once per frame
#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    pending: Arc<Mutex<Vec<SpawnRequest>>>,
}

impl SpawnQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued request
    pub fn drain(&self) -> Vec<SpawnRequest> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Number of queued requests
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Total queued quantity of an item
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.pending
            .lock()
            .iter()
            .filter(|r| r.item_id == item_id)
            .map(|r| r.quantity)
            .sum()
    }
}

impl WorldSpawner for SpawnQueue {
    fn spawn_world_item(&mut self, request: SpawnRequest) {
        self.pending.lock().push(request);
    }
}
