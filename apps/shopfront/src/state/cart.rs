//! # Cart State
//!
//! The cart context shared by the whole storefront: the line items, the
//! drawer flag, and the durable slot behind them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shopper Action           Command                 Cart State Change     │
//! │  ──────────────           ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click "Add to cart" ────► add_to_cart() ───────► merge or push         │
//! │                                                   (+ drawer on mobile)  │
//! │  Change Quantity ────────► update_cart_item() ──► qty = n / remove      │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► retain others         │
//! │                                                                         │
//! │  Order placed ───────────► clear_cart() ────────► items = []            │
//! │                                                                         │
//! │  Every change: memory first, then the full list is written to the      │
//! │  durable slot. A failed write is logged and the memory state stands.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hydration
//! ```text
//! CartStore::open
//!      │
//!      ▼
//! slot empty? ──yes──► empty cart
//!      │no
//!      ▼
//! JSON array? ──no───► delete slot, empty cart (logged)
//!      │yes
//!      ▼
//! adopt records (unreadable ones skipped, logged)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::{
    should_force_open, Cart, CartLineItem, CoreResult, Money, ProductSnapshot, Viewport,
    CART_STORAGE_KEY,
};
use shopfront_storage::{CartSlot, SlotStore};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CartInner {
    cart: Cart,
    drawer_open: bool,
}

/// Shared cart context.
///
/// ## Thread Safety
/// State lives behind a `Mutex` so one `CartStore` can be shared through an
/// `Arc`. Each operation holds the lock across the mutation and its
/// write-back, so readers never see a half-applied change.
pub struct CartStore {
    inner: Mutex<CartInner>,
    slots: Arc<dyn SlotStore>,
    key: String,
}

impl CartStore {
    /// Creates the cart context and hydrates it from the standard slot.
    pub fn open(slots: Arc<dyn SlotStore>) -> Self {
        Self::open_with_key(slots, CART_STORAGE_KEY)
    }

    /// Creates the cart context backed by a custom slot key.
    pub fn open_with_key(slots: Arc<dyn SlotStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = hydrate(slots.as_ref(), &key);
        CartStore {
            inner: Mutex::new(CartInner {
                cart,
                drawer_open: false,
            }),
            slots,
            key,
        }
    }

    /// Key of the durable slot backing this cart.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product, merging with an existing line of the same id.
    ///
    /// On a narrow viewport the drawer is forced open so the shopper sees the
    /// change; on desktop the drawer flag is left as it was.
    ///
    /// ## Errors
    /// Validation errors from the cart (quantity 0, empty id, negative
    /// price). Nothing changes and nothing is written in that case.
    pub fn add_item(
        &self,
        product: ProductSnapshot,
        quantity: u32,
        viewport: Viewport,
    ) -> CoreResult<()> {
        let mut inner = self.lock();
        let product_id = product.id.clone();
        inner.cart.add_item(product, quantity)?;
        if should_force_open(viewport) {
            inner.drawer_open = true;
        }
        debug!(product_id = %product_id, quantity, ?viewport, "Item added to cart");
        self.persist(&inner.cart);
        Ok(())
    }

    /// Removes the line with `id`; a no-op if it is not in the cart.
    pub fn remove_item(&self, id: &str) -> bool {
        let mut inner = self.lock();
        let removed = inner.cart.remove_item(id);
        debug!(product_id = %id, removed, "Remove from cart");
        self.persist(&inner.cart);
        removed
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> bool {
        let mut inner = self.lock();
        let changed = inner.cart.update_quantity(id, quantity);
        debug!(product_id = %id, quantity, changed, "Cart quantity updated");
        self.persist(&inner.cart);
        changed
    }

    /// Empties the cart and overwrites the slot with an empty list.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.cart.clear();
        debug!("Cart cleared");
        self.persist(&inner.cart);
    }

    // -------------------------------------------------------------------------
    // Drawer (ephemeral, never persisted)
    // -------------------------------------------------------------------------

    pub fn open_drawer(&self) {
        self.set_drawer_open(true);
    }

    pub fn close_drawer(&self) {
        self.set_drawer_open(false);
    }

    pub fn set_drawer_open(&self, open: bool) {
        self.lock().drawer_open = open;
    }

    pub fn is_drawer_open(&self) -> bool {
        self.lock().drawer_open
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Runs `f` against the cart and drawer flag under one lock.
    ///
    /// ```rust,ignore
    /// let count = cart_store.view(|cart, _| cart.line_count());
    /// ```
    pub fn view<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart, bool) -> R,
    {
        let inner = self.lock();
        f(&inner.cart, inner.drawer_open)
    }

    /// Copy of the items, in insertion order.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.view(|cart, _| cart.items().to_vec())
    }

    /// Sum of quantities; computed on each call.
    pub fn total_item_count(&self) -> u64 {
        self.view(|cart, _| cart.total_item_count())
    }

    /// Sum of effective line totals; computed on each call.
    pub fn total_price(&self) -> Money {
        self.view(|cart, _| cart.total_price())
    }

    fn lock(&self) -> MutexGuard<'_, CartInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, cart: &Cart) {
        if let Err(e) = CartSlot::with_key(self.slots.as_ref(), &self.key).save(cart) {
            warn!(key = %self.key, error = %e, "Failed to persist cart; keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("inner", &*self.lock())
            .finish_non_exhaustive()
    }
}

/// Reads the cart slot once at startup. Never fails: anything unreadable
/// degrades to an empty cart, and a corrupt slot is deleted.
fn hydrate(slots: &dyn SlotStore, key: &str) -> Cart {
    let slot = CartSlot::with_key(slots, key);
    match slot.load() {
        Ok(None) => {
            debug!(key, "No saved cart");
            Cart::new()
        }
        Ok(Some(loaded)) => {
            if loaded.skipped_records > 0 {
                warn!(key, skipped = loaded.skipped_records, "Dropped unreadable cart records");
            }
            info!(key, lines = loaded.cart.line_count(), "Cart hydrated");
            loaded.cart
        }
        Err(e) => {
            warn!(key, error = %e, "Saved cart unreadable; starting empty");
            if let Err(e) = slot.discard() {
                warn!(key, error = %e, "Failed to delete unreadable cart slot");
            }
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_storage::MemoryStore;

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {id}"), Money::from_amount(price))
    }

    #[test]
    fn test_drawer_forced_open_only_on_narrow() {
        let store = CartStore::open(Arc::new(MemoryStore::new()));

        store.add_item(product("p1", 100), 1, Viewport::Desktop).unwrap();
        assert!(!store.is_drawer_open());

        store.add_item(product("p1", 100), 1, Viewport::Narrow).unwrap();
        assert!(store.is_drawer_open());
    }

    #[test]
    fn test_desktop_add_leaves_open_drawer_open() {
        let store = CartStore::open(Arc::new(MemoryStore::new()));
        store.open_drawer();
        store.add_item(product("p1", 100), 1, Viewport::Desktop).unwrap();
        assert!(store.is_drawer_open());

        store.close_drawer();
        assert!(!store.is_drawer_open());
    }

    #[test]
    fn test_rejected_add_does_not_open_drawer() {
        let store = CartStore::open(Arc::new(MemoryStore::new()));
        assert!(store.add_item(product("p1", 100), 0, Viewport::Narrow).is_err());
        assert!(!store.is_drawer_open());
        assert_eq!(store.total_item_count(), 0);
    }

    #[test]
    fn test_drawer_flag_is_not_persisted() {
        let slots = Arc::new(MemoryStore::new());
        let store = CartStore::open(slots.clone());
        store.add_item(product("p1", 100), 1, Viewport::Narrow).unwrap();

        let raw = slots.read(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(!raw.contains("drawer"));

        let reopened = CartStore::open(slots);
        assert!(!reopened.is_drawer_open());
        assert_eq!(reopened.total_item_count(), 1);
    }
}
