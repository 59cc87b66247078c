// src/backend/storage/memory.rs
use ic_stable_structures::memory_manager::{MemoryId, MemoryManager, VirtualMemory};
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

// Virtual memories. IDs are part of the stable layout: never renumber, only append.
const RECORDS_MEM_ID: MemoryId = MemoryId::new(0);
const METRICS_MEM_ID: MemoryId = MemoryId::new(1);
const CONFIG_MEM_ID: MemoryId = MemoryId::new(2);

pub type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

fn memory_for(id: MemoryId) -> Memory {
    MEMORY_MANAGER.with(|manager| manager.borrow().get(id))
}

/// Backing memory of the per-caller record map.
pub fn get_records_memory() -> Memory {
    memory_for(RECORDS_MEM_ID)
}

pub fn get_metrics_memory() -> Memory {
    memory_for(METRICS_MEM_ID)
}

pub fn get_config_memory() -> Memory {
    memory_for(CONFIG_MEM_ID)
}
