//! In-process key-value backend.
//!
//! Holds every key in one shared map, so clones of a [`MemoryStore`] see
//! each other's writes the same way two services sharing one browser
//! storage area would. Reads and writes can be made to fail on demand.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::error::StoreError;

#[derive(Debug, Default)]
struct Shared {
    entries: RwLock<BTreeMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_only_keys: RwLock<BTreeSet<String>>,
    writes: AtomicU64,
}

/// A key-value store living entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the string stored at `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] while reads are failing.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.shared.fail_reads.load(Ordering::Relaxed) {
            return Err(unavailable("get", key));
        }
        Ok(self.shared.entries.read().await.get(key).cloned())
    }

    /// Store `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] while writes are failing.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.write_blocked(key).await {
            return Err(unavailable("set", key));
        }
        self.shared
            .entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        self.shared.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Delete a key. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] while writes are failing.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.write_blocked(key).await {
            return Err(unavailable("remove", key));
        }
        self.shared.entries.write().await.remove(key);
        self.shared.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Make every subsequent `get` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.shared.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.shared.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Make `set`/`remove` of one key fail (or succeed again), leaving
    /// other keys writable.
    pub async fn set_fail_writes_for(&self, key: &str, fail: bool) {
        let mut keys = self.shared.read_only_keys.write().await;
        if fail {
            keys.insert(key.to_owned());
        } else {
            keys.remove(key);
        }
    }

    async fn write_blocked(&self, key: &str) -> bool {
        self.shared.fail_writes.load(Ordering::Relaxed)
            || self.shared.read_only_keys.read().await.contains(key)
    }

    /// Number of successful `set`/`remove` calls so far.
    pub fn write_count(&self) -> u64 {
        self.shared.writes.load(Ordering::Relaxed)
    }

    /// Whether `key` currently holds a value.
    pub async fn contains(&self, key: &str) -> bool {
        self.shared.entries.read().await.contains_key(key)
    }
}

fn unavailable(op: &'static str, key: &str) -> StoreError {
    StoreError::Unavailable {
        op,
        key: key.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert!(!store.contains("k").await);
        store.remove("k").await.unwrap();
        assert_eq!(store.write_count(), 4);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("shared", "yes").await.unwrap();
        assert_eq!(b.get("shared").await.unwrap().as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();

        store.set_fail_writes(true);
        assert!(matches!(
            store.set("k", "other").await,
            Err(StoreError::Unavailable { op: "set", .. })
        ));
        assert!(store.remove("k").await.is_err());
        assert_eq!(store.write_count(), 1);

        store.set_fail_reads(true);
        assert!(store.get("k").await.is_err());

        store.set_fail_reads(false);
        store.set_fail_writes(false);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn per_key_write_failure() {
        let store = MemoryStore::new();
        store.set("locked", "v").await.unwrap();
        store.set_fail_writes_for("locked", true).await;

        assert!(store.set("locked", "other").await.is_err());
        assert!(store.remove("locked").await.is_err());
        store.set("open", "v").await.unwrap();
        assert_eq!(store.get("locked").await.unwrap().as_deref(), Some("v"));

        store.set_fail_writes_for("locked", false).await;
        store.set("locked", "other").await.unwrap();
        assert_eq!(store.write_count(), 3);
    }
}
