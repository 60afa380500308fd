//! Integration tests for the inventory ledger
//!
//! Covers the complete add/drop/equip workflow including:
//! - Stack distribution and capacity limits
//! - Overflow spill into the world
//! - Weapon slot replacement
//! - Ledger and equip-flag invariants over long operation sequences

use std::sync::Arc;
use void_inventory::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn catalog() -> ItemDatabase {
    ItemDatabase::new()
        .with_item(
            ItemDefinition::new("sword_basic", "Basic Sword")
                .with_weapon("weapon/sword_basic")
                .with_base_stats(CharacterStats::new().with_physical_attack(4).with_damage(12.0)),
        )
        .with_item(
            ItemDefinition::new("axe_heavy", "Heavy Axe")
                .with_weapon("weapon/axe_heavy")
                .with_base_stats(CharacterStats::new().with_physical_attack(9).with_damage(20.0)),
        )
        .with_item(
            ItemDefinition::new("potion", "Healing Potion")
                .stackable()
                .with_usable(true)
                .with_weight(0.5),
        )
        .with_item(ItemDefinition::new("arrow", "Arrow").stackable().with_weight(0.1))
        .with_item(ItemDefinition::new("gem", "Gem"))
}

fn inventory(capacity: usize, max_stack: u32) -> (Inventory, SpawnQueue) {
    init_logging();
    let spawner = SpawnQueue::new();
    let config = InventoryConfig::default()
        .with_capacity(capacity)
        .with_max_stack_size(max_stack);
    let inventory = Inventory::new(config, Arc::new(catalog()), Box::new(spawner.clone()))
        .expect("valid config");
    (inventory, spawner)
}

fn quantities(inventory: &Inventory) -> Vec<u32> {
    inventory.ledger().iter().map(|e| e.quantity).collect()
}

/// Records factory calls in order
#[derive(Default)]
struct RecordingFactory {
    next: u64,
    calls: Vec<String>,
}

impl WeaponFactory for RecordingFactory {
    fn instantiate(&mut self, kind: &str) -> Option<WeaponInstance> {
        self.next += 1;
        self.calls.push(format!("instantiate {}", kind));
        Some(WeaponInstance {
            handle: WeaponHandle(self.next),
            item_id: kind.trim_start_matches("weapon/").to_string(),
        })
    }

    fn destroy(&mut self, handle: WeaponHandle) {
        self.calls.push(format!("destroy {}", handle.0));
    }

    fn apply_stats(&mut self, handle: WeaponHandle, _stats: &CharacterStats) {
        self.calls.push(format!("apply {}", handle.0));
    }
}

#[test]
fn test_non_stackable_fills_capacity_then_spills() {
    let (mut inv, spawner) = inventory(3, 10);

    let outcome = inv.add_item("sword_basic", 25).expect("admitted");

    assert_eq!(quantities(&inv), vec![1, 1, 1]);
    assert!(inv.is_full());
    assert_eq!(outcome, AddOutcome { stored: 3, spilled: 22 });
    assert_eq!(spawner.quantity_of("sword_basic"), 22);
}

#[test]
fn test_partial_stack_tops_off_before_new_entry() {
    let (mut inv, spawner) = inventory(5, 10);
    inv.add_item("potion", 7).unwrap();

    let outcome = inv.add_item("potion", 5).unwrap();

    assert!(outcome.fully_stored());
    assert_eq!(quantities(&inv), vec![10, 2]);
    assert!(spawner.is_empty());
}

#[test]
fn test_full_ledger_tops_off_and_spills_rest() {
    let (mut inv, spawner) = inventory(5, 10);
    inv.add_item("potion", 7).unwrap();
    for _ in 0..4 {
        inv.add_item("gem", 1).unwrap();
    }
    assert!(inv.is_full());

    let outcome = inv.add_item("potion", 5).unwrap();

    assert_eq!(outcome, AddOutcome { stored: 3, spilled: 2 });
    assert_eq!(inv.get(0).unwrap().quantity, 10);
    assert_eq!(inv.ledger().len(), 5);
    assert_eq!(spawner.quantity_of("potion"), 2);
}

#[test]
fn test_full_ledger_without_partial_rejects() {
    let (mut inv, spawner) = inventory(2, 10);
    inv.add_item("potion", 10).unwrap();
    inv.add_item("gem", 1).unwrap();
    let before = inv.ledger().clone();

    let err = inv.add_item("potion", 1).unwrap_err();

    assert!(matches!(err, InventoryError::CapacityExhausted { .. }));
    assert_eq!(inv.ledger(), &before);
    assert!(spawner.is_empty());
}

#[test]
fn test_equip_replaces_existing_weapon() {
    init_logging();
    let mut factory = RecordingFactory::default();
    let mut slot = WeaponSlot::new("hand_r");
    let stats_w1 = CharacterStats::new().with_physical_attack(4);
    let stats_w2 = CharacterStats::new().with_physical_attack(9);

    let w1 = equip_weapon(&mut factory, Some(&mut slot), Some("weapon/sword_basic"), stats_w1)
        .unwrap();
    let w2 = equip_weapon(&mut factory, Some(&mut slot), Some("weapon/axe_heavy"), stats_w2)
        .unwrap();

    assert_eq!(
        factory.calls,
        vec![
            "instantiate weapon/sword_basic".to_string(),
            format!("apply {}", w1.0),
            format!("destroy {}", w1.0),
            "instantiate weapon/axe_heavy".to_string(),
            format!("apply {}", w2.0),
        ]
    );
    let bound = slot.weapon().unwrap();
    assert_eq!(bound.handle, w2);
    assert_eq!(bound.item_id, "axe_heavy");
    assert_eq!(bound.stats, stats_w2);
}

#[test]
fn test_equip_rejects_missing_arguments() {
    let mut factory = RecordingFactory::default();
    let mut slot = WeaponSlot::new("hand_r");

    assert!(matches!(
        equip_weapon(&mut factory, None, Some("weapon/sword_basic"), CharacterStats::new()),
        Err(InventoryError::MissingArgument(_))
    ));
    assert!(matches!(
        equip_weapon(&mut factory, Some(&mut slot), None, CharacterStats::new()),
        Err(InventoryError::MissingArgument(_))
    ));
    assert!(factory.calls.is_empty());
    assert!(!slot.is_occupied());
}

#[test]
fn test_unequip_is_idempotent() {
    let (mut inv, _) = inventory(4, 10);
    let mut factory = WeaponPool::new().with_kind("weapon/sword_basic", "sword_basic");
    let mut slots = vec![WeaponSlot::new("hand_r"), WeaponSlot::new("hand_l")];
    inv.add_item("sword_basic", 1).unwrap();
    inv.equip_from_ledger(0, &mut slots, 0, &mut factory).unwrap();

    assert!(inv.unequip_by_slot_index(0, &mut slots, &mut factory).unwrap());
    let after_first = (inv.ledger().clone(), slots.clone());
    assert!(!inv.unequip_by_slot_index(0, &mut slots, &mut factory).unwrap());

    assert_eq!((inv.ledger().clone(), slots), after_first);
    assert_eq!(factory.live_count(), 0);
}

#[test]
fn test_equipped_entry_cannot_be_dropped() {
    let (mut inv, spawner) = inventory(4, 10);
    let mut factory = WeaponPool::new().with_kind("weapon/sword_basic", "sword_basic");
    let mut slots = vec![WeaponSlot::new("hand_r")];
    inv.add_item("sword_basic", 1).unwrap();
    inv.equip_from_ledger(0, &mut slots, 0, &mut factory).unwrap();

    assert!(matches!(inv.drop_item(0, 1), Err(InventoryError::ItemEquipped(0))));

    inv.unequip_by_slot_index(0, &mut slots, &mut factory).unwrap();
    inv.drop_item(0, 1).unwrap();
    assert!(inv.is_empty());
    assert_eq!(spawner.quantity_of("sword_basic"), 1);
}

#[test]
fn test_modified_weapon_round_trip_keeps_stats() {
    let (mut inv, spawner) = inventory(4, 10);
    let enchanted = CharacterStats::new().with_physical_attack(7).with_magic_attack(3);

    inv.add_modified_item("sword_basic", 1, enchanted).unwrap();
    inv.drop_item(0, 1).unwrap();

    let spawned = spawner.drain();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].stats, Some(enchanted));

    inv.add_modified_item(&spawned[0].item_id, spawned[0].quantity, enchanted)
        .unwrap();
    assert_eq!(inv.get(0).unwrap().stats, Some(enchanted));
}

#[test]
fn test_authority_serializes_requests() {
    let (inv, spawner) = inventory(3, 10);
    let authority = InventoryAuthority::new(inv);

    authority
        .submit(InventoryRequest::AddItem {
            item_id: "arrow".into(),
            quantity: 25,
        })
        .unwrap();
    // Full ledger, but the partial stack still takes a unit
    let topped_off = authority.submit(InventoryRequest::AddItem {
        item_id: "arrow".into(),
        quantity: 1,
    });
    assert!(topped_off.is_ok());

    authority
        .submit(InventoryRequest::DropItem { index: 2, amount: 6 })
        .unwrap();

    let (count, lens) = authority.read(|inv| (inv.count_item("arrow"), quantities(inv)));
    assert_eq!(count, 20);
    assert_eq!(lens, vec![10, 10]);
    assert_eq!(spawner.quantity_of("arrow"), 6);
}

#[test]
fn test_catalog_loaded_from_json() {
    let json = r#"[
        { "id": "potion", "name": "Potion", "stackable": true, "usable": true },
        { "id": "gem", "name": "Gem", "value": 50 }
    ]"#;
    let catalog = ItemDatabase::from_json(json).unwrap();
    let mut inv = Inventory::new(
        InventoryConfig::default(),
        Arc::new(catalog),
        Box::new(SpawnQueue::new()),
    )
    .unwrap();

    inv.add_item("potion", 3).unwrap();
    inv.consume_item(0, 1).unwrap();
    assert_eq!(inv.count_item("potion"), 2);
    assert!(matches!(
        inv.add_item("missing", 1),
        Err(InventoryError::UnknownItem(_))
    ));
}

/// Small deterministic generator for request sequences
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u32) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as u32
    }
}

#[test]
fn test_ledger_invariants_over_request_sequences() {
    const ITEMS: [&str; 4] = ["potion", "arrow", "gem", "sword_basic"];

    for seed in 0..20u64 {
        let capacity = 4 + (seed as usize % 4);
        let max_stack = 5 + (seed as u32 % 7);
        let (mut inv, spawner) = inventory(capacity, max_stack);
        let mut rng = Lcg(seed);
        let mut admitted = [0u32; 4];
        let mut consumed = [0u32; 4];

        for _ in 0..200 {
            let request = match rng.next(3) {
                0 | 1 => InventoryRequest::AddItem {
                    item_id: ITEMS[rng.next(4) as usize].to_string(),
                    quantity: 1 + rng.next(3 * max_stack),
                },
                _ if inv.is_empty() => continue,
                _ => {
                    let index = rng.next(inv.ledger().len() as u32) as usize;
                    let held = inv.get(index).unwrap().quantity;
                    InventoryRequest::DropItem {
                        index,
                        amount: 1 + rng.next(held),
                    }
                }
            };

            let can_apply = inv.can_apply(&request);
            let before = inv.ledger().clone();
            match inv.apply(request.clone()) {
                Ok(RequestOutcome::Added(outcome)) => {
                    assert!(can_apply);
                    if let InventoryRequest::AddItem { item_id, quantity } = &request {
                        let slot = ITEMS.iter().position(|i| *i == item_id.as_str()).unwrap();
                        admitted[slot] += quantity;
                        assert_eq!(outcome.stored + outcome.spilled, *quantity);
                    }
                }
                Ok(RequestOutcome::Consumed(portion)) => {
                    let slot = ITEMS.iter().position(|i| *i == portion.item_id).unwrap();
                    consumed[slot] += portion.quantity;
                }
                Ok(RequestOutcome::Dropped) => assert!(can_apply),
                Err(_) => {
                    assert!(!can_apply);
                    assert_eq!(inv.ledger(), &before);
                }
            }

            let ledger = inv.ledger();
            assert!(ledger.len() <= capacity);
            for entry in ledger.iter() {
                assert!(entry.quantity >= 1);
                assert!(entry.quantity <= max_stack);
            }
            for item in ["potion", "arrow"] {
                let partials = ledger
                    .iter()
                    .filter(|e| e.item_id == item && e.quantity < max_stack)
                    .count();
                assert!(partials <= 1, "seed {}: {} partial stacks of {}", seed, partials, item);
            }
        }

        for (slot, item) in ITEMS.iter().enumerate() {
            assert_eq!(
                inv.count_item(item) + spawner.quantity_of(item) + consumed[slot],
                admitted[slot],
                "seed {}: units of {} lost",
                seed,
                item
            );
        }
    }
}

#[test]
fn test_invariants_hold_across_every_operation() {
    const ITEMS: [&str; 5] = ["potion", "arrow", "gem", "sword_basic", "axe_heavy"];
    let enchanted = CharacterStats::new().with_physical_attack(7).with_damage(3.0);
    let slot_of = |item: &str| ITEMS.iter().position(|i| *i == item).unwrap();

    for seed in 0..25u64 {
        let capacity = 4 + (seed as usize % 4);
        let max_stack = 3 + (seed as u32 % 9);
        let (mut inv, spawner) = inventory(capacity, max_stack);
        let mut factory = WeaponPool::new()
            .with_kind("weapon/sword_basic", "sword_basic")
            .with_kind("weapon/axe_heavy", "axe_heavy");
        let mut slots = vec![WeaponSlot::new("hand_r"), WeaponSlot::new("hand_l")];
        let mut rng = Lcg(seed.wrapping_mul(31).wrapping_add(7));
        let mut admitted = [0u32; 5];
        let mut consumed = [0u32; 5];

        for step in 0..300 {
            let before = inv.ledger().clone();
            let op = rng.next(7);
            if op >= 2 && inv.is_empty() {
                continue;
            }
            let len = inv.ledger().len() as u32;
            let item = ITEMS[rng.next(5) as usize];

            let failed = match op {
                0 => {
                    let quantity = 1 + rng.next(2 * max_stack);
                    match inv.add_item(item, quantity) {
                        Ok(outcome) => {
                            assert_eq!(outcome.stored + outcome.spilled, quantity);
                            admitted[slot_of(item)] += quantity;
                            false
                        }
                        Err(_) => true,
                    }
                }
                1 => {
                    let item = ["potion", "sword_basic"][rng.next(2) as usize];
                    let quantity = 1 + rng.next(max_stack);
                    match inv.add_modified_item(item, quantity, enchanted) {
                        Ok(outcome) => {
                            assert_eq!(outcome.stored + outcome.spilled, quantity);
                            admitted[slot_of(item)] += quantity;
                            false
                        }
                        Err(_) => true,
                    }
                }
                2 => {
                    let index = rng.next(len) as usize;
                    let item = inv.get(index).unwrap().item_id.clone();
                    let amount = 1 + rng.next(max_stack);
                    match inv.increase_quantity(index, amount) {
                        Ok(outcome) => {
                            assert_eq!(outcome.stored + outcome.spilled, amount);
                            admitted[slot_of(item.as_str())] += amount;
                            false
                        }
                        Err(_) => true,
                    }
                }
                3 => {
                    let index = rng.next(len) as usize;
                    let held = inv.get(index).unwrap().quantity;
                    inv.drop_item(index, 1 + rng.next(held)).is_err()
                }
                4 => {
                    let index = rng.next(len) as usize;
                    let held = inv.get(index).unwrap().quantity;
                    match inv.consume_item(index, 1 + rng.next(held)) {
                        Ok(portion) => {
                            consumed[slot_of(portion.item_id.as_str())] += portion.quantity;
                            false
                        }
                        Err(_) => true,
                    }
                }
                5 => {
                    let index = rng.next(len) as usize;
                    let slot = rng.next(slots.len() as u32) as usize;
                    inv.equip_from_ledger(index, &mut slots, slot, &mut factory)
                        .is_err()
                }
                _ => {
                    let index = rng.next(len) as usize;
                    inv.unequip_by_slot_index(index, &mut slots, &mut factory)
                        .is_err()
                }
            };
            if failed {
                assert_eq!(inv.ledger(), &before, "seed {} step {}", seed, step);
            }

            let ledger = inv.ledger();
            assert!(ledger.len() <= capacity);
            for entry in ledger.iter() {
                assert!(entry.quantity >= 1);
                assert!(entry.quantity <= max_stack);
            }
            for item in ["potion", "arrow"] {
                for stats in [None, Some(enchanted)] {
                    let partials = ledger
                        .iter()
                        .filter(|e| e.item_id == item && e.stats == stats)
                        .filter(|e| e.quantity < max_stack)
                        .count();
                    assert!(
                        partials <= 1,
                        "seed {} step {}: {} partial stacks of {}",
                        seed,
                        step,
                        partials,
                        item
                    );
                }
            }

            let equipped = ledger.iter().filter(|e| e.equipped).count();
            let occupied = slots.iter().filter(|s| s.is_occupied()).count();
            assert_eq!(equipped, occupied, "seed {} step {}: equip flags drifted", seed, step);
            assert_eq!(factory.live_count(), occupied);
        }

        for (slot, item) in ITEMS.iter().enumerate() {
            assert_eq!(
                inv.count_item(item) + spawner.quantity_of(item) + consumed[slot],
                admitted[slot],
                "seed {}: units of {} lost",
                seed,
                item
            );
        }
    }
}
