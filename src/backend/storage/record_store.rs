// src/backend/storage/record_store.rs
//
// One record type persisted whole under a primary key, plus a shadow backup key.
//
// Two layers of API:
// - tagged (`load`, `try_save`, `try_import`, `try_restore_from_backup`, `try_reset`) return
//   `Result<_, PlannerError>` so callers can tell "nothing stored yet" from "storage is broken";
// - total (`get`, `save`, `import_data`, `restore_from_backup`, `reset`, `export_data`) never fail:
//   errors are logged and turned into defaults, `false` or `None`.

use serde_json::Value;
use std::marker::PhantomData;

use crate::error::PlannerError;
use crate::models::backup::BackupEntry;
use crate::models::common::TimestampNs;
use crate::models::record::{PlanRecord, BACKUP_FORMAT_VERSION};
use crate::storage::backend::KeyValueStorage;
use crate::utils::crypto::calculate_sha256_hex;
use crate::utils::time::{get_current_time_ns, to_date_stamp, to_iso8601};

pub struct RecordStore<T, S> {
    storage: S,
    clock: fn() -> TimestampNs,
    backup_enabled: bool,
    _record: PhantomData<T>,
}

impl<T, S> RecordStore<T, S>
where
    T: PlanRecord,
    S: KeyValueStorage,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            clock: get_current_time_ns,
            backup_enabled: true,
            _record: PhantomData,
        }
    }

    /// Replaces the time source used for revision stamps, backup timestamps and new item ids.
    pub fn with_clock(mut self, clock: fn() -> TimestampNs) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.backup_enabled = enabled;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn now(&self) -> TimestampNs {
        (self.clock)()
    }

    // --- Tagged operations ---

    /// Reads the primary key. A key that was never written yields the defaults.
    ///
    /// # Errors
    ///
    /// * `PlannerError::StorageUnavailable` - the backend failed the read.
    /// * `PlannerError::MalformedPersisted` - the stored text is not a valid record.
    pub fn load(&self) -> Result<T, PlannerError> {
        match self.storage.get_item(T::PRIMARY_KEY)? {
            None => Ok(T::defaults()),
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                PlannerError::MalformedPersisted(format!("{}: {}", T::PRIMARY_KEY, e))
            }),
        }
    }

    /// Stamps the revision date, ids any filled row that has none, writes the primary key,
    /// then writes the backup entry.
    /// Returns the record as stored.
    ///
    /// A failed backup write is logged and does not fail the save.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the primary write fails; nothing is written in that case.
    pub fn try_save(&mut self, mut record: T) -> Result<T, PlannerError> {
        let now = self.now();
        let revised_at = to_iso8601(now);
        record.stamp_revision(revised_at.clone());
        record.assign_missing_ids(now);
        let text = serde_json::to_string(&record)?;
        self.storage.set_item(T::PRIMARY_KEY, &text)?;

        if self.backup_enabled {
            if let Err(e) = self.write_backup(&record, &text, revised_at) {
                tracing::warn!(key = T::BACKUP_KEY, error = %e, "backup write failed, primary save kept");
            }
        }
        tracing::debug!(key = T::PRIMARY_KEY, bytes = text.len(), "record saved");
        Ok(record)
    }

    fn write_backup(&mut self, record: &T, serialized: &str, timestamp: String) -> Result<(), PlannerError> {
        let entry = BackupEntry {
            data: record,
            timestamp,
            version: BACKUP_FORMAT_VERSION.to_string(),
            checksum: Some(calculate_sha256_hex(serialized.as_bytes())),
        };
        let text = serde_json::to_string(&entry)?;
        self.storage.set_item(T::BACKUP_KEY, &text)
    }

    /// Reads the backup entry, if any.
    ///
    /// # Errors
    ///
    /// * `PlannerError::StorageUnavailable` - the backend failed the read.
    /// * `PlannerError::MalformedPersisted` - the entry does not parse or its checksum does not match its data.
    pub fn try_restore_from_backup(&self) -> Result<Option<BackupEntry<T>>, PlannerError> {
        let Some(text) = self.storage.get_item(T::BACKUP_KEY)? else {
            return Ok(None);
        };
        let entry: BackupEntry<T> = serde_json::from_str(&text)
            .map_err(|e| PlannerError::MalformedPersisted(format!("{}: {}", T::BACKUP_KEY, e)))?;

        if let Some(expected) = &entry.checksum {
            let actual = calculate_sha256_hex(serde_json::to_string(&entry.data)?.as_bytes());
            if &actual != expected {
                return Err(PlannerError::MalformedPersisted(format!(
                    "{}: checksum mismatch",
                    T::BACKUP_KEY
                )));
            }
        }
        Ok(Some(entry))
    }

    /// Deletes the primary and backup keys. Both deletions are attempted.
    ///
    /// # Errors
    ///
    /// Returns the first deletion error.
    pub fn try_reset(&mut self) -> Result<(), PlannerError> {
        let primary = self.storage.remove_item(T::PRIMARY_KEY);
        let backup = self.storage.remove_item(T::BACKUP_KEY);
        primary.and(backup)
    }

    /// Parses, shape-checks and saves import text.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidImport` - the text is not JSON, fails the shape check, or holds a nested
    ///   value of the wrong type. Storage is untouched.
    /// * Any `try_save` error.
    pub fn try_import(&mut self, json_text: &str) -> Result<T, PlannerError> {
        let value: Value = serde_json::from_str(json_text)
            .map_err(|e| PlannerError::InvalidImport(format!("not valid JSON: {}", e)))?;
        T::check_shape(&value)?;
        let record: T =
            serde_json::from_value(value).map_err(|e| PlannerError::InvalidImport(e.to_string()))?;
        self.try_save(record)
    }

    /// Pretty-printed (2-space indent) JSON of the stored record.
    ///
    /// # Errors
    ///
    /// Same as `load`.
    pub fn try_export(&self) -> Result<String, PlannerError> {
        let record = self.load()?;
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Loads the record, lets `f` edit it, and saves it back.
    ///
    /// # Errors
    ///
    /// Fails without writing when the stored record cannot be loaded, so a broken
    /// store is never overwritten with defaults; otherwise any `try_save` error.
    pub fn modify<F, R>(&mut self, f: F) -> Result<R, PlannerError>
    where
        F: FnOnce(&mut T, TimestampNs) -> R,
    {
        let mut record = self.load()?;
        let out = f(&mut record, self.now());
        self.try_save(record)?;
        Ok(out)
    }

    // --- Total operations ---

    /// The stored record, or the defaults when it is missing, corrupt or unreadable.
    pub fn get(&self) -> T {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(key = T::PRIMARY_KEY, error = %e, "could not load record, using defaults");
            T::defaults()
        })
    }

    pub fn save(&mut self, record: T) -> bool {
        match self.try_save(record) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(key = T::PRIMARY_KEY, error = %e, "record save failed");
                false
            }
        }
    }

    /// The data of the backup entry, or `None` when absent or corrupt.
    pub fn restore_from_backup(&self) -> Option<T> {
        match self.try_restore_from_backup() {
            Ok(entry) => entry.map(|entry| entry.data),
            Err(e) => {
                tracing::warn!(key = T::BACKUP_KEY, error = %e, "backup unusable");
                None
            }
        }
    }

    pub fn reset(&mut self) {
        if let Err(e) = self.try_reset() {
            tracing::warn!(key = T::PRIMARY_KEY, error = %e, "record reset failed");
        }
    }

    /// Pretty-printed JSON of `get()`.
    pub fn export_data(&self) -> String {
        serde_json::to_string_pretty(&self.get()).unwrap_or_else(|e| {
            tracing::error!(key = T::PRIMARY_KEY, error = %e, "record export failed");
            String::from("{}")
        })
    }

    pub fn import_data(&mut self, json_text: &str) -> bool {
        match self.try_import(json_text) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(key = T::PRIMARY_KEY, error = %e, "import rejected");
                false
            }
        }
    }

    /// Download name for an export made now, e.g. `urgence-2024-03-01.json`.
    pub fn export_file_name(&self) -> String {
        format!("{}-{}.json", T::EXPORT_FILE_PREFIX, to_date_stamp(self.now()))
    }
}
