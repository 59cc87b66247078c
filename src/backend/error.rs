// src/backend/error.rs
use candid::CandidType;
use serde::Deserialize;
use thiserror::Error;

#[derive(CandidType, Deserialize, Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The backend refused the read or write (disabled, private mode, trapped memory).
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage quota exceeded for key {key}: {bytes} bytes over a limit of {limit}")]
    QuotaExceeded { key: String, bytes: u64, limit: u64 },

    /// Stored JSON under a record key failed to parse.
    #[error("Persisted record is malformed: {0}")]
    MalformedPersisted(String),

    /// Import text parsed but does not look like the expected record.
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Internal canister error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for PlannerError {
    fn from(err: validator::ValidationErrors) -> Self {
        PlannerError::InvalidInput(err.to_string())
    }
}
