//! Key-value storage module
//!
//! Provides the storage contracts and their implementations.
//! This module is independent of protocol and command handling (loose coupling).
//!
//! Two contracts are exposed:
//! - [`KvStore`]: single-owner access, mutation through `&mut self`
//! - [`SharedKvStore`]: shared handle, every method on `&self`, safe to call from many threads

mod memory;
mod threaded;

pub use memory::MemoryStore;
pub use threaded::ThreadSafeStore;

use thiserror::Error;

/// Category of a storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvErrorKind {
    /// The requested key does not exist
    KeyNotFound,

    /// A bounded store has no room left
    StorageFull,

    /// The value could not be stored
    PutError,

    /// Anything else
    UnknownError,
}

/// Storage error with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct KvError {
    pub kind: KvErrorKind,
    pub message: String,
}

impl KvError {
    pub fn new(kind: KvErrorKind, message: impl Into<String>) -> Self {
        KvError {
            kind,
            message: message.into(),
        }
    }

    /// Error for a missing key, naming the key
    pub fn key_not_found(key: &str) -> Self {
        KvError::new(KvErrorKind::KeyNotFound, format!("{} was not found", key))
    }
}

/// Result type for storage operations
pub type KvResult<T> = std::result::Result<T, KvError>;

/// Key-value store with exclusive access for mutation
pub trait KvStore: Send + Sync {
    /// Insert or overwrite the value for `key`
    fn put(&mut self, key: &str, value: &str) -> KvResult<()>;

    /// Get the value for `key`, or `KeyNotFound`
    fn get(&self, key: &str) -> KvResult<String>;

    /// Remove `key` if present, returning the number of keys removed (0 or 1)
    fn del(&mut self, key: &str) -> KvResult<usize>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> KvResult<String> {
        (**self).get(key)
    }

    fn del(&mut self, key: &str) -> KvResult<usize> {
        (**self).del(key)
    }
}

/// Key-value store that can be shared between threads behind an `Arc`
pub trait SharedKvStore: Send + Sync {
    fn put(&self, key: &str, value: &str) -> KvResult<()>;

    fn get(&self, key: &str) -> KvResult<String>;

    fn del(&self, key: &str) -> KvResult<usize>;
}
