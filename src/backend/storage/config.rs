// src/backend/storage/config.rs
use crate::models::init::{InitArgs, PlannerConfig};
use crate::storage::memory::{get_config_memory, Memory};
use crate::storage::storable::Cbor;
use ic_stable_structures::StableCell;
use std::cell::RefCell;

thread_local! {
    /// Stable cell for the canister configuration
    static CONFIG: RefCell<StableCell<Cbor<PlannerConfig>, Memory>> = RefCell::new(
        StableCell::init(get_config_memory(), Cbor(PlannerConfig::default()))
            .expect("Failed to initialize config stable cell")
    );
}

/// Applies `args` on top of the stored configuration and persists the result.
/// Called during canister initialization and upgrade.
pub fn init_config(args: &InitArgs) -> Result<PlannerConfig, String> {
    let merged = get_config().merged_with(args);
    CONFIG.with(|cell| {
        cell.borrow_mut()
            .set(Cbor(merged.clone()))
            .map_err(|e| format!("Failed to set config: {:?}", e))
    })?;
    tracing::info!(
        locale = ?merged.locale,
        max_record_bytes = merged.max_record_bytes,
        backup_enabled = merged.backup_enabled,
        "configuration initialized"
    );
    Ok(merged)
}

/// Get the current configuration.
pub fn get_config() -> PlannerConfig {
    CONFIG.with(|cell| cell.borrow().get().0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;

    #[test]
    fn init_persists_overrides() {
        assert_eq!(get_config(), PlannerConfig::default());
        let args = InitArgs { backup_enabled: Some(false), ..Default::default() };
        init_config(&args).unwrap();
        let stored = get_config();
        assert!(!stored.backup_enabled);
        assert_eq!(stored.locale, Locale::FrCa);

        // A later upgrade without overrides keeps what was stored.
        init_config(&InitArgs::default()).unwrap();
        assert!(!get_config().backup_enabled);
    }
}
