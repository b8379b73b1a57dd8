//! # Cart Slot
//!
//! Encodes and decodes the cart stored under [`CART_STORAGE_KEY`].
//!
//! ## Slot Format
//! ```json
//! [
//!   { "id": "p1", "name": "Tee", "unitPrice": 10000, "imageRef": "tee.jpg", "quantity": 2 },
//!   { "id": "p2", "name": "Cap", "unitPrice": 5000, "salePrice": 4000, "imageRef": "", "quantity": 3 }
//! ]
//! ```
//!
//! ## Decoding Rules
//! ```text
//! slot empty ─────────────────────────► Ok(None)
//! not JSON / JSON but not an array ───► Err(Corrupt)
//! array ──► each record decoded ──────► Ok(Some(LoadedCart))
//!              └── bad record ────────► skipped, counted
//! ```

use serde_json::Value;
use shopfront_core::{Cart, CartLineItem, CART_STORAGE_KEY};
use tracing::warn;

use crate::error::{StorageError, StorageResult};
use crate::slot::{SlotStore, SlotStoreExt};

/// A cart restored from its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCart {
    pub cart: Cart,

    /// Records that did not decode as line items.
    pub skipped_records: usize,
}

/// The durable slot holding one cart.
pub struct CartSlot<'a, S: ?Sized> {
    store: &'a S,
    key: &'a str,
}

impl<'a, S: SlotStore + ?Sized> CartSlot<'a, S> {
    /// The slot at the standard cart key.
    pub fn new(store: &'a S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// The slot at a custom key (one cart per tenant, tests).
    pub fn with_key(store: &'a S, key: &'a str) -> Self {
        CartSlot { store, key }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// Reads the cart.
    ///
    /// ## Errors
    /// - [`StorageError::Corrupt`] when the slot is not a JSON array
    /// - backend errors from the underlying store
    pub fn load(&self) -> StorageResult<Option<LoadedCart>> {
        let Some(value) = self.store.read_json::<Value>(self.key)? else {
            return Ok(None);
        };
        let Value::Array(records) = value else {
            return Err(StorageError::corrupt(
                self.key,
                format!("expected an array, found {}", json_kind(&value)),
            ));
        };

        let total = records.len();
        let items: Vec<CartLineItem> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(key = self.key, index, error = %e, "Skipping unreadable cart record");
                    None
                }
            })
            .collect();
        let skipped_records = total - items.len();

        Ok(Some(LoadedCart {
            cart: Cart::from_items(items),
            skipped_records,
        }))
    }

    /// Overwrites the slot with the full item list.
    pub fn save(&self, cart: &Cart) -> StorageResult<()> {
        self.store.write_json(self.key, cart)
    }

    /// Deletes the slot.
    pub fn discard(&self) -> StorageResult<()> {
        self.store.remove(self.key)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use shopfront_core::{Money, ProductSnapshot};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            ProductSnapshot::new("p1", "Tee", Money::from_amount(10_000)).with_image("tee.jpg"),
            2,
        )
        .unwrap();
        cart.add_item(
            ProductSnapshot::new("p2", "Cap", Money::from_amount(5_000))
                .with_sale_price(Money::from_amount(4_000)),
            3,
        )
        .unwrap();
        cart
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let slot = CartSlot::new(&store);
        assert_eq!(slot.load().unwrap(), None);

        let cart = sample_cart();
        slot.save(&cart).unwrap();

        let loaded = slot.load().unwrap().unwrap();
        assert_eq!(loaded.cart, cart);
        assert_eq!(loaded.skipped_records, 0);
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let store = MemoryStore::new();
        store.seed(CART_STORAGE_KEY, "{not valid json");
        assert!(CartSlot::new(&store).load().unwrap_err().is_corrupt());
    }

    #[test]
    fn test_non_array_is_corrupt() {
        let store = MemoryStore::new();
        store.seed(CART_STORAGE_KEY, r#"{"items":[]}"#);
        let err = CartSlot::new(&store).load().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Slot store_cart_items holds invalid data: expected an array, found an object"
        );
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let store = MemoryStore::new();
        store.seed(
            CART_STORAGE_KEY,
            r#"[{"id":"p1","name":"Tee","unitPrice":100,"imageRef":"","quantity":1},
                {"id":"p2"},
                42]"#,
        );

        let loaded = CartSlot::new(&store).load().unwrap().unwrap();
        assert_eq!(loaded.cart.line_count(), 1);
        assert_eq!(loaded.skipped_records, 2);
    }

    #[test]
    fn test_discard_and_custom_key() {
        let store = MemoryStore::new();
        let slot = CartSlot::with_key(&store, "tenant_7_cart");
        assert_eq!(slot.key(), "tenant_7_cart");

        slot.save(&sample_cart()).unwrap();
        assert!(store.read("tenant_7_cart").unwrap().is_some());
        assert!(store.read(CART_STORAGE_KEY).unwrap().is_none());

        slot.discard().unwrap();
        assert!(store.read("tenant_7_cart").unwrap().is_none());
    }
}
