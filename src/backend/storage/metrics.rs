// src/backend/storage/metrics.rs
use crate::metrics::PlannerMetrics;
use crate::storage::memory::{get_metrics_memory, Memory};
use crate::storage::storable::Cbor;
use ic_stable_structures::StableCell;
use std::cell::RefCell;

thread_local! {
    static METRICS_CELL: RefCell<StableCell<Cbor<PlannerMetrics>, Memory>> = RefCell::new(
        StableCell::init(get_metrics_memory(), Cbor(PlannerMetrics::default()))
            .expect("Failed to initialize metrics stable cell")
    );
}

/// Snapshot of the canister-wide counters.
pub fn get_metrics() -> PlannerMetrics {
    METRICS_CELL.with(|cell| cell.borrow().get().0.clone())
}

/// Read-modify-write of the counters in one step.
///
/// # Errors
///
/// Returns a description of the failure when the cell rejects the new value.
pub fn update_metrics<F>(update_fn: F) -> Result<(), String>
where
    F: FnOnce(&mut PlannerMetrics),
{
    METRICS_CELL.with(|cell| {
        let mut counters = cell.borrow().get().0.clone();
        update_fn(&mut counters);
        cell.borrow_mut()
            .set(Cbor(counters))
            .map(|_| ())
            .map_err(|e| format!("Failed to write planner metrics: {:?}", e))
    })
}
