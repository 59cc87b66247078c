// src/backend/models/init.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::models::common::Locale;

/// 256 KiB per stored value; a full planning record is a few KiB.
pub const DEFAULT_MAX_RECORD_BYTES: u64 = 256 * 1024;

/// Optional overrides passed at install or upgrade.
#[derive(CandidType, Deserialize, Debug, Clone, Default)]
pub struct InitArgs {
    pub locale: Option<Locale>,
    pub max_record_bytes: Option<u64>,
    pub backup_enabled: Option<bool>,
}

/// Canister-wide settings, kept in stable memory.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Locale used when formatting amounts in summaries.
    pub locale: Locale,
    pub max_record_bytes: u64,
    pub backup_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            locale: Locale::FrCa,
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
            backup_enabled: true,
        }
    }
}

impl PlannerConfig {
    /// Applies the overrides present in `args` on top of `self`.
    pub fn merged_with(mut self, args: &InitArgs) -> Self {
        if let Some(locale) = args.locale {
            self.locale = locale;
        }
        if let Some(limit) = args.max_record_bytes {
            self.max_record_bytes = limit;
        }
        if let Some(enabled) = args.backup_enabled {
            self.backup_enabled = enabled;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_overrides_apply() {
        let args = InitArgs { locale: Some(Locale::EnCa), ..Default::default() };
        let merged = PlannerConfig::default().merged_with(&args);
        assert_eq!(merged.locale, Locale::EnCa);
        assert_eq!(merged.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
        assert!(merged.backup_enabled);
    }
}
