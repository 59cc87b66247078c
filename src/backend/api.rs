// src/backend/api.rs
// Candid endpoints. Records cross the boundary as JSON text, exactly as the browser
// exports them; every record is scoped to the calling principal.

use crate::{
    error::PlannerError,
    metrics::{self, PlannerMetrics},
    models::{
        init::PlannerConfig,
        simulation::{SimulationRequest, SimulationResult},
        EmergencyInfo, PlanRecord, UltimatePlanningData,
    },
    services::{
        simulation,
        stats::{EmergencyStats, PlanningStats},
        EmergencyInfoService, PlanningSummary, UltimatePlanningService,
    },
    storage::{get_config as stored_config, get_metrics as get_stored_metrics, RecordStore, ScopedStorage, StableStorage},
    utils::guards::check_authenticated,
};
use candid::{CandidType, Deserialize};
use ic_cdk::caller;
use ic_cdk_macros::{query, update};
use validator::Validate;

type CallerStorage = ScopedStorage<StableStorage>;

// --- Request/Response Structs ---

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct ImportRequest {
    // 1 MiB; an export of a fully filled record is well under this.
    #[validate(length(min = 2, max = 1_048_576))]
    pub json: String,
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

// --- Helpers ---

fn validate_request<T: Validate>(req: &T) -> Result<(), PlannerError> {
    req.validate().map_err(PlannerError::from)
}

fn caller_storage() -> Result<CallerStorage, PlannerError> {
    let caller = caller();
    check_authenticated(caller)?;
    let config = stored_config();
    Ok(ScopedStorage::new(
        StableStorage::new(config.max_record_bytes),
        caller.to_text(),
    ))
}

fn record_store<T: PlanRecord>() -> Result<RecordStore<T, CallerStorage>, PlannerError> {
    Ok(RecordStore::new(caller_storage()?).with_backup(stored_config().backup_enabled))
}

fn get_record<T: PlanRecord>() -> Result<String, PlannerError> {
    let record = record_store::<T>()?.load()?;
    Ok(serde_json::to_string(&record)?)
}

/// Saves a full record sent by the UI. Returns the revision stamp written.
fn save_record<T: PlanRecord>(json: &str) -> Result<String, PlannerError> {
    let record: T = serde_json::from_str(json).map_err(|e| PlannerError::InvalidInput(e.to_string()))?;
    let result = record_store::<T>()?.try_save(record);
    metrics::record_save(result.is_ok());
    result.map(|saved| saved.revision().to_string())
}

fn export_record<T: PlanRecord>() -> Result<ExportFile, PlannerError> {
    let store = record_store::<T>()?;
    Ok(ExportFile {
        file_name: store.export_file_name(),
        content: store.try_export()?,
    })
}

fn import_record<T: PlanRecord>(req: ImportRequest) -> Result<(), PlannerError> {
    validate_request(&req)?;
    let result = record_store::<T>()?.try_import(&req.json);
    metrics::record_import(result.is_ok());
    result.map(|_| ())
}

fn reset_record<T: PlanRecord>() -> Result<(), PlannerError> {
    record_store::<T>()?.try_reset()?;
    metrics::record_reset();
    Ok(())
}

/// Writes the backup's data back as the current record. `None` when there is no backup.
fn restore_record<T: PlanRecord>() -> Result<Option<String>, PlannerError> {
    let mut store = record_store::<T>()?;
    let Some(entry) = store.try_restore_from_backup()? else {
        return Ok(None);
    };
    let restored = store.try_save(entry.data)?;
    metrics::record_backup_restore();
    Ok(Some(serde_json::to_string(&restored)?))
}

// --- Emergency Info Endpoints ---

#[query]
fn emergency_info_get() -> Result<String, PlannerError> {
    get_record::<EmergencyInfo>()
}

#[update]
fn emergency_info_save(json: String) -> Result<String, PlannerError> {
    save_record::<EmergencyInfo>(&json)
}

#[query]
fn emergency_info_export() -> Result<ExportFile, PlannerError> {
    export_record::<EmergencyInfo>()
}

#[update]
fn emergency_info_import(req: ImportRequest) -> Result<(), PlannerError> {
    import_record::<EmergencyInfo>(req)
}

#[update]
fn emergency_info_reset() -> Result<(), PlannerError> {
    reset_record::<EmergencyInfo>()
}

#[update]
fn emergency_info_restore_backup() -> Result<Option<String>, PlannerError> {
    restore_record::<EmergencyInfo>()
}

#[query]
fn emergency_info_stats() -> Result<EmergencyStats, PlannerError> {
    Ok(EmergencyInfoService::from_store(record_store()?).get_stats())
}

// --- Ultimate Planning Endpoints ---

#[query]
fn planning_get() -> Result<String, PlannerError> {
    get_record::<UltimatePlanningData>()
}

#[update]
fn planning_save(json: String) -> Result<String, PlannerError> {
    save_record::<UltimatePlanningData>(&json)
}

#[query]
fn planning_export() -> Result<ExportFile, PlannerError> {
    export_record::<UltimatePlanningData>()
}

#[update]
fn planning_import(req: ImportRequest) -> Result<(), PlannerError> {
    import_record::<UltimatePlanningData>(req)
}

#[update]
fn planning_reset() -> Result<(), PlannerError> {
    reset_record::<UltimatePlanningData>()
}

#[update]
fn planning_restore_backup() -> Result<Option<String>, PlannerError> {
    restore_record::<UltimatePlanningData>()
}

#[query]
fn planning_stats() -> Result<PlanningStats, PlannerError> {
    Ok(UltimatePlanningService::from_store(record_store()?).get_stats())
}

#[query]
fn planning_summary() -> Result<PlanningSummary, PlannerError> {
    let locale = stored_config().locale;
    Ok(UltimatePlanningService::from_store(record_store()?).get_summary(locale))
}

// --- Simulation & Admin Endpoints ---

#[query]
fn simulate_retirement(req: SimulationRequest) -> Result<SimulationResult, PlannerError> {
    simulation::simulate_retirement(&req)
}

#[query]
fn get_metrics() -> PlannerMetrics {
    get_stored_metrics()
}

#[query]
fn get_config() -> PlannerConfig {
    stored_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_request_is_size_checked() {
        assert!(validate_request(&ImportRequest { json: "{}".to_string() }).is_ok());
        assert!(matches!(
            validate_request(&ImportRequest { json: "x".to_string() }),
            Err(PlannerError::InvalidInput(_))
        ));
    }
}
