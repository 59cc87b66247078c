// src/backend/storage/stable.rs
use ic_stable_structures::StableBTreeMap;
use std::cell::RefCell;

use crate::error::PlannerError;
use crate::storage::backend::KeyValueStorage;
use crate::storage::memory::{get_records_memory, Memory};
use crate::utils::guards::check_value_size;

thread_local! {
    /// Record text by key. Keys are scoped per caller by `ScopedStorage`,
    /// e.g. "<principal>:emergencyInfo" and "<principal>:emergencyInfo_backup".
    static RECORDS: RefCell<StableBTreeMap<String, String, Memory>> = RefCell::new(
        StableBTreeMap::init(get_records_memory())
    );
}

/// `KeyValueStorage` over the canister's stable memory.
#[derive(Debug, Clone, Copy)]
pub struct StableStorage {
    max_value_bytes: u64,
}

impl StableStorage {
    pub fn new(max_value_bytes: u64) -> Self {
        Self { max_value_bytes }
    }
}

impl KeyValueStorage for StableStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PlannerError> {
        RECORDS.with(|map| {
            let map = map
                .try_borrow()
                .map_err(|e| PlannerError::StorageUnavailable(e.to_string()))?;
            Ok(map.get(&key.to_string()))
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        check_value_size(key, value.len(), self.max_value_bytes)?;
        RECORDS.with(|map| {
            map.try_borrow_mut()
                .map_err(|e| PlannerError::StorageUnavailable(e.to_string()))?
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PlannerError> {
        RECORDS.with(|map| {
            map.try_borrow_mut()
                .map_err(|e| PlannerError::StorageUnavailable(e.to_string()))?
                .remove(&key.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_storage_round_trips() {
        let mut storage = StableStorage::new(1024);
        storage.set_item("test:stable", "{\"a\":1}").unwrap();
        assert_eq!(storage.get_item("test:stable").unwrap().as_deref(), Some("{\"a\":1}"));
        storage.remove_item("test:stable").unwrap();
        assert_eq!(storage.get_item("test:stable").unwrap(), None);
    }

    #[test]
    fn stable_storage_enforces_limit() {
        let mut storage = StableStorage::new(3);
        assert!(matches!(
            storage.set_item("test:limit", "abcd"),
            Err(PlannerError::QuotaExceeded { .. })
        ));
        assert_eq!(storage.get_item("test:limit").unwrap(), None);
    }
}
