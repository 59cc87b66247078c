// src/backend/models/backup.rs
use serde::{Deserialize, Serialize};

/// Shadow copy written next to the primary key on every successful save.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackupEntry<T> {
    pub data: T,
    /// ISO-8601 time of the save that produced this entry.
    pub timestamp: String,
    pub version: String,
    /// SHA-256 hex of the serialized `data`. Older entries may not carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}
