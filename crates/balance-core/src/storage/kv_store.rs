use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use thiserror::Error;

/// Errors produced by key/value storage implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Requested key does not exist.
    #[error("entry not found for key: {key}")]
    NotFound { key: String },
    /// Underlying storage failure.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

impl StoreError {
    pub fn storage(reason: impl ToString) -> Self {
        StoreError::Storage {
            reason: reason.to_string(),
        }
    }
}

/// Durable local key/value storage. Each value is overwritten as a whole.
pub trait KvStore: Send + Sync {
    /// Persist a value under a key, overwriting any existing entry.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Retrieve the value for a key.
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Remove a key and its value (idempotent).
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get(key)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get(key)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// Process-local store for tests and health probes. Clones share contents.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKvStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for InMemoryKvStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|err| StoreError::storage(format!("lock poisoned: {err}")))?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let map = self
            .inner
            .lock()
            .map_err(|err| StoreError::storage(format!("lock poisoned: {err}")))?;
        map.get(key).cloned().ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|err| StoreError::storage(format!("lock poisoned: {err}")))?;
        map.remove(key);
        Ok(())
    }
}
