//! # Storage Error Types
//!
//! Error types for durable slot operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / quota check                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the slot key                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore (app) ← Logs it and keeps the in-memory cart                │
//! │                                                                         │
//! │  Storage errors never reach the shopper.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Durable slot operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters the backend cannot store.
    #[error("Invalid slot key: {key:?}")]
    InvalidKey { key: String },

    /// Writing the value would exceed the store's byte quota.
    ///
    /// ## When This Occurs
    /// - Browser local storage is full (typically 5 MB per origin)
    /// - A `MemoryStore` built with `with_quota`
    #[error("Quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The slot exists but its content cannot be decoded.
    ///
    /// ## When This Occurs
    /// - Truncated write, manual edit in dev tools
    /// - An older app version stored a different shape
    #[error("Slot {key} holds invalid data: {reason}")]
    Corrupt { key: String, reason: String },

    /// Value could not be encoded before writing.
    #[error("Failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The storage directory could not be prepared.
    #[error("Storage directory {path:?} unavailable: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a slot failed.
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates a Corrupt error for a given key.
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }

    /// Whether the slot content itself is bad (as opposed to the backend).
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
