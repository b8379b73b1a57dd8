//! # Cart
//!
//! The ordered collection of line items and its derived totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                 Effect on items                              │
//! │  ─────────                 ───────────────                              │
//! │  add_item(p, n)            same id? quantity += n : push at the end     │
//! │  update_quantity(id, n)    n <= 0 ? remove : quantity = n               │
//! │  remove_item(id)           retain everything else (no-op if absent)     │
//! │  clear()                   items = []                                   │
//! │                                                                         │
//! │  total_item_count()        Σ quantity                                   │
//! │  total_price()             Σ (salePrice ?? unitPrice) × quantity        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same product increases quantity)
//! - Every item has `quantity >= 1`
//!
//! Totals are computed on every call and never stored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CartLineItem, ProductSnapshot};
use crate::validation::{validate_add_quantity, validate_product};

/// The shopping cart.
///
/// Serializes as a bare array of line items. Deserializing goes through
/// [`Cart::from_items`], so decoded carts satisfy the same invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from previously saved records.
    ///
    /// Records with quantity zero are dropped and repeated ids are merged
    /// into the first occurrence, so the cart invariants hold whatever the
    /// records looked like.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds a product to the cart or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by `quantity`; name,
    ///   prices and image of the existing line are kept
    /// - Product not in cart: appended as a new line
    ///
    /// ## Errors
    /// `quantity == 0`, an empty id or a negative price is rejected and the
    /// cart is left untouched.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: u32) -> CoreResult<()> {
        validate_add_quantity(quantity)?;
        validate_product(&product)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            return Ok(());
        }

        self.items.push(CartLineItem::from_snapshot(product, quantity));
        Ok(())
    }

    /// Removes the line with `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of the line with `id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - otherwise: absolute set (values above `u32::MAX` are capped)
    /// - unknown id: no-op
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities over all lines; `0` for an empty cart.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals at the effective price; zero for an empty cart.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Cart::from_items(items)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLineItem>::deserialize(deserializer).map(Cart::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {id}"), Money::from_amount(price))
            .with_image(format!("{id}.jpg"))
    }

    #[test]
    fn test_add_item_appends_in_order() {
        let mut cart = Cart::new();
        cart.add_item(product("b", 100), 1).unwrap();
        cart.add_item(product("a", 200), 1).unwrap();

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1_000), 2).unwrap();
        cart.add_item(product("p1", 1_000), 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 5);
    }

    #[test]
    fn test_merge_keeps_first_descriptive_fields() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1_000), 1).unwrap();

        let renamed = ProductSnapshot::new("p1", "Renamed", Money::from_amount(9_999))
            .with_sale_price(Money::from_amount(1));
        cart.add_item(renamed, 1).unwrap();

        let item = cart.get("p1").unwrap();
        assert_eq!(item.name, "Product p1");
        assert_eq!(item.unit_price.amount(), 1_000);
        assert_eq!(item.sale_price, None);
        assert_eq!(item.image_ref, "p1.jpg");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_is_rejected() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1_000), 1).unwrap();

        let err = cart.add_item(product("p1", 1_000), 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(cart.get("p1").unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1_000), 1).unwrap();
        cart.add_item(product("p2", 1_000), 1).unwrap();

        assert!(cart.remove_item("p1"));
        let once = cart.clone();
        assert!(!cart.remove_item("p1"));
        assert_eq!(cart, once);
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1_000), 4).unwrap();

        assert!(cart.update_quantity("p1", 2));
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
        assert!(!cart.update_quantity("missing", 7));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_quantity_floor_removes() {
        for quantity in [0, -5] {
            let mut cart = Cart::new();
            cart.add_item(product("p1", 1_000), 3).unwrap();

            assert!(cart.update_quantity("p1", quantity));
            assert!(cart.get("p1").is_none());
            assert!(cart.is_empty());
        }
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Money::zero());

        cart.add_item(product("p1", 10_000), 2).unwrap();
        cart.add_item(
            product("p2", 5_000).with_sale_price(Money::from_amount(4_000)),
            3,
        )
        .unwrap();

        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.total_price().amount(), 32_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 999), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let a = CartLineItem::from_snapshot(product("a", 100), 1);
        let zero = CartLineItem::from_snapshot(product("z", 100), 0);
        let mut again = a.clone();
        again.quantity = 2;
        again.name = "Other".to_string();

        let cart = Cart::from_items([a, zero, again]);
        assert_eq!(cart.line_count(), 1);
        let item = cart.get("a").unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.name, "Product a");
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let mut cart = Cart::new();
        assert_eq!(serde_json::to_string(&cart).unwrap(), "[]");

        cart.add_item(product("p1", 1_000), 1).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "p1");
    }

    #[test]
    fn test_deserialize_restores_invariants() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":"a","name":"A","unitPrice":100,"quantity":0},
                {"id":"a","name":"A","unitPrice":100,"quantity":2},
                {"id":"a","name":"A2","unitPrice":300,"quantity":1}]"#,
        )
        .unwrap();

        assert_eq!(cart.line_count(), 1);
        let item = cart.get("a").unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.unit_price, Money::from_amount(100));
    }
}
