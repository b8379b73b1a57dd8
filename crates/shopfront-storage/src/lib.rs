//! # shopfront-storage: Durable Slots for Shopfront
//!
//! This crate owns the durable key-value slots the storefront keeps between
//! visits, most importantly the cart under `store_cart_items`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  CartStore (add_item, clear, ...)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                shopfront-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartSlot    │    │  SlotStore    │    │  Backends    │  │   │
//! │  │   │   (cart.rs)   │───►│  (slot.rs)    │◄───│ MemoryStore  │  │   │
//! │  │   │ load / save   │    │ read / write  │    │ FileStore    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/shopfront/store_cart_items.json                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`slot`] - The `SlotStore` trait and JSON helpers
//! - [`memory`] - In-memory store with optional quota
//! - [`file`] - File-per-key store
//! - [`cart`] - Cart slot encoding
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use shopfront_storage::{CartSlot, MemoryStore};
//! use shopfront_core::Cart;
//!
//! let store = MemoryStore::new();
//! let slot = CartSlot::new(&store);
//! slot.save(&Cart::new()).unwrap();
//! assert!(slot.load().unwrap().unwrap().cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod file;
pub mod memory;
pub mod slot;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartSlot, LoadedCart};
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use slot::{validate_key, SlotStore, SlotStoreExt};
