// src/backend/services/planning_service.rs

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::common::{remove_item, upsert_item, ItemId, Locale};
use crate::models::ultimate_planning::{
    BankAccount, CreditCard, DigitalAccount, FuneralWishes, InsurancePolicy, Investment,
    ProfessionalContact, SuccessionPreferences, UltimatePlanningData,
};
use crate::services::stats::{planning_stats, PlanningStats};
use crate::storage::{KeyValueStorage, RecordStore};
use crate::utils::money::format_amount;

/// Stats plus the headline amounts already formatted for the dashboard.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PlanningSummary {
    pub stats: PlanningStats,
    pub locale: Locale,
    pub total_credit_limit: String,
    pub total_credit_balance: String,
    pub total_insurance_coverage: String,
    pub net_worth_estimate: String,
    pub last_revision: String,
}

/// Ultimate-planning record over an injected storage backend.
pub struct UltimatePlanningService<S> {
    store: RecordStore<UltimatePlanningData, S>,
}

impl<S: KeyValueStorage> UltimatePlanningService<S> {
    pub fn new(storage: S) -> Self {
        Self::from_store(RecordStore::new(storage))
    }

    pub fn from_store(store: RecordStore<UltimatePlanningData, S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<UltimatePlanningData, S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<UltimatePlanningData, S> {
        &mut self.store
    }

    // --- Whole-record operations ---

    pub fn get_data(&self) -> UltimatePlanningData {
        self.store.get()
    }

    pub fn save_data(&mut self, data: UltimatePlanningData) -> bool {
        self.store.save(data)
    }

    pub fn export_data(&self) -> String {
        self.store.export_data()
    }

    pub fn import_data(&mut self, json_text: &str) -> bool {
        self.store.import_data(json_text)
    }

    pub fn restore_from_backup(&self) -> Option<UltimatePlanningData> {
        self.store.restore_from_backup()
    }

    pub fn reset(&mut self) {
        self.store.reset()
    }

    pub fn get_stats(&self) -> PlanningStats {
        planning_stats(&self.store.get())
    }

    pub fn get_summary(&self, locale: Locale) -> PlanningSummary {
        let data = self.store.get();
        let stats = planning_stats(&data);
        PlanningSummary {
            locale,
            total_credit_limit: format_amount(stats.total_credit_limit, locale),
            total_credit_balance: format_amount(stats.total_credit_balance, locale),
            total_insurance_coverage: format_amount(stats.total_insurance_coverage, locale),
            net_worth_estimate: format_amount(stats.net_worth_estimate, locale),
            last_revision: data.date_derniere_revision,
            stats,
        }
    }

    // --- Section updates ---

    pub fn update_succession_preferences(&mut self, prefs: SuccessionPreferences) -> Result<(), PlannerError> {
        self.store.modify(|data, _| data.succession_preferences = prefs)
    }

    pub fn update_funeral_wishes(&mut self, wishes: FuneralWishes) -> Result<(), PlannerError> {
        self.store.modify(|data, _| data.funeral_wishes = wishes)
    }

    // --- Item operations ---

    pub fn upsert_credit_card(&mut self, card: CreditCard) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.credit_cards, card, now))
    }

    pub fn remove_credit_card(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|data, _| remove_item(&mut data.credit_cards, id))
    }

    pub fn upsert_bank_account(&mut self, account: BankAccount) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.bank_accounts, account, now))
    }

    pub fn remove_bank_account(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|data, _| remove_item(&mut data.bank_accounts, id))
    }

    pub fn upsert_investment(&mut self, investment: Investment) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.investments, investment, now))
    }

    pub fn remove_investment(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|data, _| remove_item(&mut data.investments, id))
    }

    pub fn upsert_insurance_policy(&mut self, policy: InsurancePolicy) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.insurance_policies, policy, now))
    }

    pub fn remove_insurance_policy(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|data, _| remove_item(&mut data.insurance_policies, id))
    }

    pub fn upsert_digital_account(&mut self, account: DigitalAccount) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.digital_accounts, account, now))
    }

    pub fn remove_digital_account(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|data, _| remove_item(&mut data.digital_accounts, id))
    }

    pub fn upsert_professional_contact(&mut self, contact: ProfessionalContact) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|data, now| upsert_item(&mut data.professional_contacts, contact, now))
    }

    pub fn remove_professional_contact(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store
            .modify(|data, _| remove_item(&mut data.professional_contacts, id))
    }
}
