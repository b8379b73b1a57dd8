//! # In-Memory Slot Store
//!
//! A `HashMap` behind a mutex. Used by tests, and by the app when nothing
//! should outlive the process. An optional byte quota mimics the browser's
//! local storage limit.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{StorageError, StorageResult};
use crate::slot::{validate_key, SlotStore};

/// In-memory [`SlotStore`].
///
/// ## Quota Accounting
/// Like local storage, the quota covers the bytes of every key plus every
/// value. A write that would push the total over the quota fails and leaves
/// the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty store without quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that refuses writes beyond `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStore {
            slots: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Seeds a slot, bypassing key validation and quota.
    ///
    /// Lets tests simulate whatever an older app version or a user with dev
    /// tools left behind.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.lock().iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut slots = self.lock();

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
