//! # Domain Types
//!
//! The records a cart is made of.
//!
//! ```text
//! ┌──────────────────────┐   add_item(qty)   ┌──────────────────────┐
//! │   ProductSnapshot    │ ────────────────► │     CartLineItem     │
//! │  ──────────────────  │                   │  ──────────────────  │
//! │  id                  │                   │  id                  │
//! │  name                │                   │  name                │
//! │  unitPrice           │                   │  unitPrice           │
//! │  salePrice?          │                   │  salePrice?          │
//! │  imageRef            │                   │  imageRef            │
//! └──────────────────────┘                   │  quantity (>= 1)     │
//!                                            └──────────────────────┘
//! ```
//!
//! Both serialize with camelCase field names; that JSON is the durable slot
//! format, so renaming a field breaks every cart already saved in a browser.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Snapshot
// =============================================================================

/// Product data captured when a shopper adds it to the cart.
///
/// The catalog may change afterwards; the cart keeps what was shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    /// Opaque product identifier, unique within a cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Nominal unit price.
    pub unit_price: Money,

    /// Discounted unit price; wins over `unit_price` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sale_price: Option<Money>,

    /// Opaque reference to the display image.
    #[serde(default)]
    pub image_ref: String,
}

impl ProductSnapshot {
    /// Creates a snapshot without sale price or image.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        ProductSnapshot {
            id: id.into(),
            name: name.into(),
            unit_price,
            sale_price: None,
            image_ref: String::new(),
        }
    }

    /// Sets the sale price.
    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One product entry in the cart with its own quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub id: String,

    pub name: String,

    pub unit_price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sale_price: Option<Money>,

    #[serde(default)]
    pub image_ref: String,

    /// Always >= 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line item from a product snapshot and quantity.
    pub fn from_snapshot(product: ProductSnapshot, quantity: u32) -> Self {
        CartLineItem {
            id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            sale_price: product.sale_price,
            image_ref: product.image_ref,
            quantity,
        }
    }

    /// Price charged per unit: the sale price if present, else the unit price.
    pub fn effective_price(&self) -> Money {
        self.sale_price.unwrap_or(self.unit_price)
    }

    /// Effective price × quantity.
    pub fn line_total(&self) -> Money {
        self.effective_price().multiply_quantity(self.quantity)
    }

    /// Whether a sale price below the unit price applies.
    pub fn is_discounted(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_prefers_sale_price() {
        let plain = CartLineItem::from_snapshot(
            ProductSnapshot::new("p1", "Tee", Money::from_amount(10_000)),
            2,
        );
        assert_eq!(plain.effective_price().amount(), 10_000);
        assert_eq!(plain.line_total().amount(), 20_000);
        assert!(!plain.is_discounted());

        let sale = CartLineItem::from_snapshot(
            ProductSnapshot::new("p2", "Cap", Money::from_amount(5_000))
                .with_sale_price(Money::from_amount(4_000)),
            3,
        );
        assert_eq!(sale.effective_price().amount(), 4_000);
        assert_eq!(sale.line_total().amount(), 12_000);
        assert!(sale.is_discounted());
    }

    #[test]
    fn test_line_item_json_shape() {
        let item = CartLineItem::from_snapshot(
            ProductSnapshot::new("p1", "Tee", Money::from_amount(1_000)).with_image("tee.jpg"),
            1,
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p1",
                "name": "Tee",
                "unitPrice": 1000,
                "imageRef": "tee.jpg",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_line_item_reads_sale_price() {
        let item: CartLineItem = serde_json::from_str(
            r#"{"id":"p2","name":"Cap","unitPrice":5000,"salePrice":4000,"imageRef":"","quantity":3}"#,
        )
        .unwrap();
        assert_eq!(item.sale_price, Some(Money::from_amount(4_000)));
        assert_eq!(item.quantity, 3);
    }
}
