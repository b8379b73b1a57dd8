//! Cart context behavior against real slot backends.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use shopfront_app::state::CartStore;
use shopfront_core::{Money, ProductSnapshot, Viewport, CART_STORAGE_KEY};
use shopfront_storage::{FileStore, MemoryStore, SlotStore, StorageError, StorageResult};

fn tee() -> ProductSnapshot {
    ProductSnapshot::new("p1", "Tee", Money::from_amount(10_000)).with_image("tee.jpg")
}

fn cap_on_sale() -> ProductSnapshot {
    ProductSnapshot::new("p2", "Cap", Money::from_amount(5_000)).with_sale_price(Money::from_amount(4_000))
}

fn saved_records(slots: &MemoryStore) -> Vec<Value> {
    let raw = slots.read(CART_STORAGE_KEY).unwrap().expect("slot written");
    match serde_json::from_str(&raw).unwrap() {
        Value::Array(records) => records,
        other => panic!("expected array, got {other}"),
    }
}

/// Reads succeed (empty), every write and remove fails.
#[derive(Default)]
struct BrokenStore {
    write_attempts: AtomicUsize,
}

impl SlotStore for BrokenStore {
    fn read(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn write(&self, key: &str, _value: &str) -> StorageResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::io(key, io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        Err(StorageError::io(key, io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }
}

// =============================================================================
// Cart semantics
// =============================================================================

#[test]
fn remove_is_idempotent() {
    let store = CartStore::open(Arc::new(MemoryStore::new()));
    store.add_item(tee(), 1, Viewport::Desktop).unwrap();

    assert!(store.remove_item("p1"));
    let after_first = store.items();
    assert!(!store.remove_item("p1"));
    assert_eq!(store.items(), after_first);
    assert!(!store.remove_item("never-added"));
}

#[test]
fn quantity_floor_removes_line() {
    let store = CartStore::open(Arc::new(MemoryStore::new()));
    store.add_item(tee(), 2, Viewport::Desktop).unwrap();
    store.add_item(cap_on_sale(), 1, Viewport::Desktop).unwrap();

    store.update_quantity("p1", 0);
    store.update_quantity("p2", -5);
    assert!(store.items().is_empty());
}

#[test]
fn duplicate_add_merges_and_keeps_first_snapshot() {
    let store = CartStore::open(Arc::new(MemoryStore::new()));
    store.add_item(tee(), 2, Viewport::Desktop).unwrap();

    let repriced = ProductSnapshot::new("p1", "Tee (new)", Money::from_amount(99_000));
    store.add_item(repriced, 3, Viewport::Desktop).unwrap();

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 5);
    assert_eq!(items[0].name, "Tee");
    assert_eq!(items[0].unit_price, Money::from_amount(10_000));
}

#[test]
fn total_price_uses_sale_price() {
    let store = CartStore::open(Arc::new(MemoryStore::new()));
    store.add_item(tee(), 2, Viewport::Desktop).unwrap();
    store.add_item(cap_on_sale(), 3, Viewport::Desktop).unwrap();

    assert_eq!(store.total_price(), Money::from_amount(32_000));
    assert_eq!(store.total_item_count(), 5);
}

// =============================================================================
// Durable slot
// =============================================================================

#[test]
fn every_mutation_rewrites_the_slot() {
    let slots = Arc::new(MemoryStore::new());
    let store = CartStore::open(slots.clone());

    store.add_item(tee(), 2, Viewport::Desktop).unwrap();
    store.add_item(cap_on_sale(), 1, Viewport::Desktop).unwrap();
    let records = saved_records(&slots);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "p1");
    assert_eq!(records[1]["salePrice"], 4_000);

    store.update_quantity("p1", 7);
    assert_eq!(saved_records(&slots)[0]["quantity"], 7);

    store.remove_item("p2");
    assert_eq!(saved_records(&slots).len(), 1);

    store.clear();
    assert!(saved_records(&slots).is_empty());
}

#[test]
fn corrupt_slot_recovers_to_empty_cart() {
    let slots = Arc::new(MemoryStore::new());
    slots.seed(CART_STORAGE_KEY, "{not valid json");

    let store = CartStore::open(slots.clone());
    assert!(store.items().is_empty());
    assert_eq!(slots.read(CART_STORAGE_KEY).unwrap(), None);

    store.add_item(tee(), 1, Viewport::Desktop).unwrap();
    let records = saved_records(&slots);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "p1");
    assert_eq!(records[0]["quantity"], 1);
}

#[test]
fn non_array_slot_recovers_to_empty_cart() {
    let slots = Arc::new(MemoryStore::new());
    slots.seed(CART_STORAGE_KEY, r#"{"p1":{"quantity":2}}"#);

    let store = CartStore::open(slots.clone());
    assert!(store.items().is_empty());
    assert_eq!(slots.read(CART_STORAGE_KEY).unwrap(), None);
}

#[test]
fn hydration_keeps_readable_records() {
    let slots = Arc::new(MemoryStore::new());
    slots.seed(
        CART_STORAGE_KEY,
        r#"[{"id":"p1","name":"Tee","unitPrice":10000,"imageRef":"tee.jpg","quantity":2},
            {"id":"p1","name":"Tee","unitPrice":10000,"imageRef":"tee.jpg","quantity":1},
            {"id":"p3","name":"Sock","unitPrice":2000,"quantity":0},
            "garbage"]"#,
    );

    let store = CartStore::open(slots);
    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "p1");
    assert_eq!(items[0].quantity, 3);
}

#[test]
fn cart_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = CartStore::open(Arc::new(FileStore::open(dir.path()).unwrap()));
        store.add_item(tee(), 2, Viewport::Narrow).unwrap();
        store.add_item(cap_on_sale(), 3, Viewport::Desktop).unwrap();
        assert!(store.is_drawer_open());
    }

    let reopened = CartStore::open(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(reopened.total_item_count(), 5);
    assert_eq!(reopened.total_price(), Money::from_amount(32_000));
    assert!(!reopened.is_drawer_open());
}

#[test]
fn custom_key_isolates_carts() {
    let slots = Arc::new(MemoryStore::new());
    let a = CartStore::open_with_key(slots.clone(), "tenant_a_cart");
    let b = CartStore::open_with_key(slots.clone(), "tenant_b_cart");

    a.add_item(tee(), 1, Viewport::Desktop).unwrap();
    assert_eq!(a.storage_key(), "tenant_a_cart");
    assert_eq!(b.total_item_count(), 0);
    assert_eq!(CartStore::open_with_key(slots, "tenant_a_cart").total_item_count(), 1);
}

// =============================================================================
// Persistence failures
// =============================================================================

#[test]
fn failing_writes_do_not_block_mutations() {
    let slots = Arc::new(BrokenStore::default());
    let store = CartStore::open(slots.clone());

    store.add_item(tee(), 2, Viewport::Desktop).unwrap();
    store.add_item(cap_on_sale(), 3, Viewport::Desktop).unwrap();
    assert_eq!(store.total_price(), Money::from_amount(32_000));

    store.update_quantity("p1", 1);
    store.remove_item("p2");
    assert_eq!(store.total_item_count(), 1);

    store.clear();
    assert!(store.items().is_empty());
    assert_eq!(slots.write_attempts.load(Ordering::SeqCst), 5);
}

#[test]
fn quota_exceeded_keeps_memory_state() {
    let slots = Arc::new(MemoryStore::with_quota(0));
    let store = CartStore::open(slots.clone());

    store.add_item(tee(), 4, Viewport::Narrow).unwrap();
    assert_eq!(store.total_item_count(), 4);
    assert!(store.is_drawer_open());
    assert_eq!(slots.read(CART_STORAGE_KEY).unwrap(), None);
}

#[test]
fn shared_across_threads() {
    let store = Arc::new(CartStore::open(Arc::new(MemoryStore::new())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..10 {
                    store.add_item(tee(), 1, Viewport::Desktop).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.total_item_count(), 80);
    assert_eq!(store.items().len(), 1);
}
