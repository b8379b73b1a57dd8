//! # Slot Store
//!
//! The key-value abstraction behind every durable slot.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SlotStore implementations                            │
//! │                                                                         │
//! │            ┌──────────────────────────────┐                             │
//! │            │   trait SlotStore            │                             │
//! │            │   read / write / remove      │                             │
//! │            └──────────────┬───────────────┘                             │
//! │                ┌──────────┴───────────┐                                 │
//! │                ▼                      ▼                                 │
//! │        ┌──────────────┐       ┌──────────────┐                          │
//! │        │ MemoryStore  │       │  FileStore   │                          │
//! │        │ tests, quota │       │ <dir>/k.json │                          │
//! │        └──────────────┘       └──────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are whole strings: every write replaces the previous value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StorageError, StorageResult};

/// A durable string-to-string store, like a browser's local storage.
pub trait SlotStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the slot. Returns Ok even if it does not exist.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// JSON helpers on top of any [`SlotStore`].
pub trait SlotStoreExt: SlotStore {
    /// Reads and decodes a JSON value. Undecodable content is
    /// [`StorageError::Corrupt`].
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::corrupt(key, e.to_string()))
    }

    /// Encodes a value as JSON and writes it.
    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &raw)
    }
}

impl<S: SlotStore + ?Sized> SlotStoreExt for S {}

/// Keys every backend accepts: non-empty, `[A-Za-z0-9_.-]`, not starting
/// with a dot.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}
