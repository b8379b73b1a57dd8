//! # State Module
//!
//! Manages application state for the storefront host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppState                                   │   │
//! │  │  built once at startup, shared by every command                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                          │
//! │               ▼                             ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────┐            │
//! │  │       CartStore          │  │       ConfigState        │            │
//! │  │                          │  │                          │            │
//! │  │  Mutex<Cart + drawer>    │  │  store name, locale      │            │
//! │  │  Arc<dyn SlotStore>      │  │  symbol, breakpoint      │            │
//! │  └──────────────────────────┘  └──────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

use std::sync::Arc;

use shopfront_storage::SlotStore;

pub use cart::CartStore;
pub use config::ConfigState;

/// Everything a command can touch.
#[derive(Debug)]
pub struct AppState {
    pub cart: CartStore,
    pub config: ConfigState,
}

impl AppState {
    /// Hydrates the cart from `slots` under the configured key.
    pub fn new(config: ConfigState, slots: Arc<dyn SlotStore>) -> Self {
        let cart = CartStore::open_with_key(slots, config.cart_storage_key.clone());
        AppState { cart, config }
    }
}
