//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Cart     │────►│ Checkout │       │
//! │  │  Cart    │     │          │     │ Drawer   │     │  (host)  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                   │            │
//! │                   add_to_cart                              │            │
//! │                   update_cart_item                         │            │
//! │                   remove_from_cart                         │            │
//! │                        │                                   ▼            │
//! │                        └───────────────────────────► clear_cart        │
//! │                                                     (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use shopfront_core::{Cart, CartLineItem, Money, ProductSnapshot, Viewport};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{AppState, ConfigState};

// =============================================================================
// Responses
// =============================================================================

/// Totals derived from the cart on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,

    /// Sum of quantities (the header badge).
    pub total_quantity: u64,

    /// Sum of effective line totals.
    pub total_price: Money,

    /// `total_price` formatted with the configured symbol and locale.
    pub total_price_display: String,
}

impl CartTotals {
    pub fn compute(cart: &Cart, config: &ConfigState) -> Self {
        let total_price = cart.total_price();
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_item_count(),
            total_price,
            total_price_display: config.format_currency(total_price),
        }
    }
}

/// Cart response including items, totals and the drawer flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    pub drawer_open: bool,
}

impl CartResponse {
    fn snapshot(state: &AppState) -> Self {
        state.cart.view(|cart, drawer_open| CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::compute(cart, &state.config),
            drawer_open,
        })
    }
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartArgs {
    pub product: ProductSnapshot,

    /// Defaults to 1. Zero, negative, or above `u32::MAX` is rejected.
    #[serde(default)]
    pub quantity: Option<i64>,

    /// Explicit viewport class; wins over `viewport_width`.
    #[serde(default)]
    pub viewport: Option<Viewport>,

    /// Width in CSS pixels, classified with the configured breakpoint.
    #[serde(default)]
    pub viewport_width: Option<u32>,
}

impl AddToCartArgs {
    fn resolve_viewport(&self, config: &ConfigState) -> Viewport {
        match (self.viewport, self.viewport_width) {
            (Some(viewport), _) => viewport,
            (None, Some(width)) => config.breakpoint.classify(width),
            (None, None) => Viewport::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemArgs {
    pub id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveFromCartArgs {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetCartDrawerArgs {
    pub open: bool,
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items, calculated totals and the drawer flag
pub fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::snapshot(state)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases, stored snapshot kept
/// - Product not in cart: appended with the given snapshot
/// - Narrow viewport: drawer forced open
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shopper taps "Add to cart" on a product card                          │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  {"cmd":"add_to_cart","args":{"product":{...},"viewportWidth":390}}    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Classify viewport (390 < 1024 → narrow)                    │    │
/// │  │  2. Merge or append the line                                   │    │
/// │  │  3. Open drawer (narrow only)                                  │    │
/// │  │  4. Write the slot, return updated cart                        │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn add_to_cart(state: &AppState, args: AddToCartArgs) -> Result<CartResponse, ApiError> {
    let viewport = args.resolve_viewport(&state.config);
    let requested = args.quantity.unwrap_or(1);
    debug!(product_id = %args.product.id, quantity = requested, ?viewport, "add_to_cart command");

    // Non-positive requests become 0, which the cart rejects.
    let quantity = u32::try_from(requested.max(0))
        .map_err(|_| ApiError::validation(format!("quantity must not exceed {}", u32::MAX)))?;
    state.cart.add_item(args.product, quantity, viewport)?;

    Ok(CartResponse::snapshot(state))
}

/// Updates the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity 0 or below: removes the item
/// - Unknown id: cart returned unchanged
pub fn update_cart_item(state: &AppState, args: UpdateCartItemArgs) -> CartResponse {
    debug!(product_id = %args.id, quantity = args.quantity, "update_cart_item command");
    state.cart.update_quantity(&args.id, args.quantity);
    CartResponse::snapshot(state)
}

/// Removes an item from the cart. Unknown ids are a no-op.
pub fn remove_from_cart(state: &AppState, args: RemoveFromCartArgs) -> CartResponse {
    debug!(product_id = %args.id, "remove_from_cart command");
    state.cart.remove_item(&args.id);
    CartResponse::snapshot(state)
}

/// Clears all items from the cart.
///
/// Called by the host once an order is placed.
pub fn clear_cart(state: &AppState) -> CartResponse {
    debug!("clear_cart command");
    state.cart.clear();
    CartResponse::snapshot(state)
}

/// Opens or closes the cart drawer.
pub fn set_cart_drawer(state: &AppState, args: SetCartDrawerArgs) -> CartResponse {
    debug!(open = args.open, "set_cart_drawer command");
    state.cart.set_drawer_open(args.open);
    CartResponse::snapshot(state)
}
