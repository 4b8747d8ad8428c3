//! The key-value contract every backend fulfils.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible in Rust.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dragonfly::DragonflyStore;
use crate::error::StoreError;
use crate::memory::MemoryStore;

/// An asynchronous string-keyed store of string blobs.
///
/// Cloning is cheap and shares the underlying backend.
#[derive(Debug, Clone)]
pub enum KvStore {
    /// `Dragonfly` / Redis.
    Dragonfly(DragonflyStore),
    /// In-process map.
    Memory(MemoryStore),
}

impl KvStore {
    /// Read the blob at `key`.
    ///
    /// An empty string is reported as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend call fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = match self {
            Self::Dragonfly(store) => store.get(key).await?,
            Self::Memory(store) => store.get(key).await?,
        };
        Ok(value.filter(|v| !v.is_empty()))
    }

    /// Write `value` at `key`, overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend call fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Dragonfly(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend call fails.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Dragonfly(store) => store.remove(key).await,
            Self::Memory(store) => store.remove(key).await,
        }
    }

    /// Serialize `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if serialization fails, or the
    /// backend error if the write fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json).await
    }

    /// Read the value at `key` and deserialize it from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the blob is not valid JSON
    /// for `T`, or the backend error if the read fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key).await? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dragonfly(_) => "dragonfly",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<MemoryStore> for KvStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}

impl From<DragonflyStore> for KvStore {
    fn from(store: DragonflyStore) -> Self {
        Self::Dragonfly(store)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: u32,
        b: String,
    }

    #[tokio::test]
    async fn empty_blob_reads_as_absent() {
        let memory = MemoryStore::new();
        memory.set("blank", "").await.unwrap();
        let store = KvStore::from(memory);
        assert_eq!(store.get("blank").await.unwrap(), None);
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn json_helpers() {
        let store = KvStore::from(MemoryStore::new());
        let sample = Sample {
            a: 7,
            b: String::from("seven"),
        };
        store.set_json("sample", &sample).await.unwrap();
        let back: Option<Sample> = store.get_json("sample").await.unwrap();
        assert_eq!(back, Some(sample));

        store.set("sample", "{not json").await.unwrap();
        let broken = store.get_json::<Sample>("sample").await;
        assert!(matches!(broken, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn dispatches_to_memory() {
        let store = KvStore::from(MemoryStore::new());
        assert_eq!(store.name(), "memory");
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
