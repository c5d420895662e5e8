//! In-memory storage implementation

use super::{KvError, KvResult, KvStore};
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use siphasher::sip::SipHasher13;
use tracing::debug;

/// Type alias for our hash map with SipHasher
type StoreMap = HashMap<String, String, BuildHasherDefault<SipHasher13>>;

/// In-memory key-value store
///
/// A plain map with no internal locking. Wrap it in a
/// [`ThreadSafeStore`](super::ThreadSafeStore) to share it between connections.
pub struct MemoryStore {
    store: StoreMap,
}

impl MemoryStore {
    /// Create a new memory store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            store: HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            ),
        }
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        debug!(key, "MemoryStore.put");
        self.store.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn get(&self, key: &str) -> KvResult<String> {
        debug!(key, "MemoryStore.get");
        match self.store.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                debug!(key, "MemoryStore.get: key not found");
                Err(KvError::key_not_found(key))
            }
        }
    }

    fn del(&mut self, key: &str) -> KvResult<usize> {
        debug!(key, "MemoryStore.del");
        Ok(usize::from(self.store.remove(key).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KvErrorKind;

    #[test]
    fn test_basic_put_get() {
        let mut store = MemoryStore::new();
        store.put("key1", "value1").unwrap();

        assert_eq!(store.get("key1").unwrap(), "value1");
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = MemoryStore::new();
        store.put("key1", "value1").unwrap();
        store.put("key1", "value2").unwrap();

        assert_eq!(store.get("key1").unwrap(), "value2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        let err = store.get("missing").unwrap_err();

        assert_eq!(err.kind, KvErrorKind::KeyNotFound);
        assert_eq!(err.message, "missing was not found");
        assert_eq!(err.to_string(), "missing was not found");
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        store.put("key1", "value1").unwrap();

        assert_eq!(store.del("key1").unwrap(), 1);
        assert!(store.get("key1").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_missing_key_is_idempotent() {
        let mut store = MemoryStore::new();

        assert_eq!(store.del("missing").unwrap(), 0);
        assert_eq!(store.del("missing").unwrap(), 0);
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn KvStore> = Box::new(MemoryStore::new());
        store.put("k", "v").unwrap();

        assert_eq!(store.get("k").unwrap(), "v");
        assert_eq!(store.del("k").unwrap(), 1);
    }
}
