// src/backend/storage/backend.rs
//
// The string key-value contract records are persisted through. It mirrors the browser's
// getItem/setItem/removeItem so stores can run over stable memory in the canister and over
// a plain map in tests.

use std::collections::BTreeMap;

use crate::error::PlannerError;
use crate::utils::guards::check_value_size;

pub trait KeyValueStorage {
    /// # Errors
    ///
    /// Returns `PlannerError::StorageUnavailable` when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PlannerError>;

    /// # Errors
    ///
    /// Returns `PlannerError::StorageUnavailable` or `PlannerError::QuotaExceeded` when the write is refused.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PlannerError>;

    /// # Errors
    ///
    /// Returns `PlannerError::StorageUnavailable` when the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), PlannerError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, PlannerError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PlannerError> {
        (**self).remove_item(key)
    }
}

/// Heap-backed storage. Can be given a per-value size limit or switched off entirely
/// to reproduce quota and disabled-storage failures.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    max_value_bytes: Option<u64>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_value_bytes(limit: u64) -> Self {
        Self {
            max_value_bytes: Some(limit),
            ..Self::default()
        }
    }

    /// Every operation fails, like storage disabled in a private window.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_available(&self) -> Result<(), PlannerError> {
        if self.unavailable {
            Err(PlannerError::StorageUnavailable("storage is disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PlannerError> {
        self.ensure_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        self.ensure_available()?;
        if let Some(limit) = self.max_value_bytes {
            check_value_size(key, value.len(), limit)?;
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PlannerError> {
        self.ensure_available()?;
        self.items.remove(key);
        Ok(())
    }
}

/// Prefixes every key with an owner scope, giving each caller a private key space
/// over a shared backend (the canister's equivalent of per-origin browser storage).
#[derive(Debug, Clone)]
pub struct ScopedStorage<S> {
    inner: S,
    scope: String,
}

impl<S: KeyValueStorage> ScopedStorage<S> {
    pub fn new(inner: S, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    pub fn scoped_key(&self, key: &str) -> String {
        format!("{}:{}", self.scope, key)
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: KeyValueStorage> KeyValueStorage for ScopedStorage<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, PlannerError> {
        self.inner.get_item(&self.scoped_key(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        let scoped = self.scoped_key(key);
        self.inner.set_item(&scoped, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PlannerError> {
        let scoped = self.scoped_key(key);
        self.inner.remove_item(&scoped)
    }
}
