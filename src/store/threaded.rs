//! Thread-safe store decorator
//!
//! Wraps any [`KvStore`] behind a reader/writer lock:
//! - `get` takes the shared lock, so readers run in parallel
//! - `put` and `del` take the exclusive lock
//!
//! Results and errors of the wrapped store are returned unchanged.

use super::{KvResult, KvStore, SharedKvStore};
use parking_lot::RwLock;

/// Reader/writer-locked wrapper around a store
pub struct ThreadSafeStore<S> {
    inner: RwLock<S>,
}

impl<S: KvStore> ThreadSafeStore<S> {
    pub fn new(store: S) -> Self {
        ThreadSafeStore {
            inner: RwLock::new(store),
        }
    }

    /// Unwrap the decorated store
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

impl<S: KvStore> SharedKvStore for ThreadSafeStore<S> {
    fn put(&self, key: &str, value: &str) -> KvResult<()> {
        let mut store = self.inner.write();
        store.put(key, value)
    }

    fn get(&self, key: &str) -> KvResult<String> {
        let store = self.inner.read();
        store.get(key)
    }

    fn del(&self, key: &str) -> KvResult<usize> {
        let mut store = self.inner.write();
        store.del(key)
    }
}

// Exclusive access already rules out other readers and writers.
impl<S: KvStore> KvStore for ThreadSafeStore<S> {
    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.inner.get_mut().put(key, value)
    }

    fn get(&self, key: &str) -> KvResult<String> {
        SharedKvStore::get(self, key)
    }

    fn del(&mut self, key: &str) -> KvResult<usize> {
        self.inner.get_mut().del(key)
    }
}
