// src/backend/models/record.rs
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::PlannerError;
use crate::models::common::TimestampNs;
use crate::utils::shape::{check_required_fields, FieldShape};

/// Literal version tag written into every backup entry.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// An aggregate persisted whole under one storage key.
///
/// Implementors describe where they live, what their zero state looks like,
/// which field carries the revision date and which top-level keys an import must have.
pub trait PlanRecord: Serialize + DeserializeOwned + Clone {
    const PRIMARY_KEY: &'static str;
    const BACKUP_KEY: &'static str;
    /// Prefix of the downloaded export file, before the date stamp.
    const EXPORT_FILE_PREFIX: &'static str;
    const REQUIRED_FIELDS: &'static [FieldShape];

    /// Canonical empty record, including any pre-seeded blank rows.
    fn defaults() -> Self;

    fn revision(&self) -> &str;

    fn stamp_revision(&mut self, revised_at: String);

    /// Assigns ids to filled list rows that were saved without one. Called on every save.
    fn assign_missing_ids(&mut self, _now_ns: TimestampNs) {}

    /// Shallow check run on parsed import text before it is deserialized.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidImport` when a required key is absent or has the wrong coarse type.
    fn check_shape(value: &Value) -> Result<(), PlannerError> {
        check_required_fields(value, Self::REQUIRED_FIELDS)
    }
}
