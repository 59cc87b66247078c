// src/backend/metrics.rs
use crate::storage::update_metrics;
use candid::{CandidType, Deserialize};
use serde::Serialize;

/// Canister-wide counters, all callers combined.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannerMetrics {
    pub records_saved: u64,
    pub save_failures: u64,
    pub imports_accepted: u64,
    pub imports_rejected: u64,
    pub resets: u64,
    pub backup_restores: u64,
}

// --- Metrics Update Helpers ---

fn record(update: impl FnOnce(&mut PlannerMetrics)) {
    if let Err(e) = update_metrics(update) {
        tracing::warn!(error = %e, "metrics update failed");
    }
}

pub fn record_save(succeeded: bool) {
    record(|m| {
        if succeeded {
            m.records_saved = m.records_saved.saturating_add(1);
        } else {
            m.save_failures = m.save_failures.saturating_add(1);
        }
    });
}

pub fn record_import(accepted: bool) {
    record(|m| {
        if accepted {
            m.imports_accepted = m.imports_accepted.saturating_add(1);
            m.records_saved = m.records_saved.saturating_add(1);
        } else {
            m.imports_rejected = m.imports_rejected.saturating_add(1);
        }
    });
}

pub fn record_reset() {
    record(|m| m.resets = m.resets.saturating_add(1));
}

pub fn record_backup_restore() {
    record(|m| m.backup_restores = m.backup_restores.saturating_add(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::get_metrics;

    #[test]
    fn counters_accumulate_in_stable_cell() {
        record_save(true);
        record_save(false);
        record_import(true);
        record_import(false);
        record_reset();

        let metrics = get_metrics();
        assert_eq!(metrics.records_saved, 2);
        assert_eq!(metrics.save_failures, 1);
        assert_eq!(metrics.imports_accepted, 1);
        assert_eq!(metrics.imports_rejected, 1);
        assert_eq!(metrics.resets, 1);
    }
}
