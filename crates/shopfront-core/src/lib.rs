//! # shopfront-core: Pure Cart & Pricing Logic
//!
//! This crate is the **heart** of the storefront cart. It contains the
//! currency model, the cart collection and the drawer decision as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │   Product Card ──► Cart Drawer ──► Cart Page ──► Checkout       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/shopfront (CartStore context)                │   │
//! │  │     add_to_cart, update_cart_item, remove_from_cart, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐ │   │
//! │  │   │   money   │  │   cart    │  │ validation│  │presentation│ │   │
//! │  │   │  Money    │  │   Cart    │  │   rules   │  │  Viewport  │ │   │
//! │  │   │  Locale   │  │ LineItem  │  │   checks  │  │ Breakpoint │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shopfront-storage (Durable Slots)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type and the locale-aware currency model
//! - [`types`] - Line item and product snapshot types
//! - [`cart`] - The cart collection and its derived totals
//! - [`validation`] - Business rule validation
//! - [`presentation`] - Drawer force-open decision
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Cart, Money, ProductSnapshot};
//!
//! let mut cart = Cart::new();
//! let tee = ProductSnapshot::new("p1", "Tee", Money::from_amount(10_000));
//! cart.add_item(tee, 2).unwrap();
//!
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(shopfront_core::format_amount(cart.total_price()), "20.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod presentation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{
    format_amount, is_valid_amount, parse_amount, sanitize_input, AmountValue, Locale, Money,
};
pub use presentation::{should_force_open, Breakpoint, Viewport};
pub use types::{CartLineItem, ProductSnapshot};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the durable slot holding the serialized cart items.
pub const CART_STORAGE_KEY: &str = "store_cart_items";

/// Viewport width (CSS pixels) from which the storefront uses its desktop
/// layout. Below it, adding to the cart opens the drawer.
pub const DEFAULT_DESKTOP_BREAKPOINT_PX: u32 = 1024;
