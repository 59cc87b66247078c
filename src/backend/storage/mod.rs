// src/backend/storage/mod.rs

pub mod backend;
pub mod config;
pub mod memory;
pub mod metrics;
pub mod record_store;
pub mod stable;
pub mod storable;

// Re-export key storage structures and functions for easier access
pub use backend::{KeyValueStorage, MemoryStorage, ScopedStorage};
pub use config::{get_config, init_config};
pub use memory::Memory;
pub use metrics::{get_metrics, update_metrics};
pub use record_store::RecordStore;
pub use stable::StableStorage;
pub use storable::Cbor;
