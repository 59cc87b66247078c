// src/backend/models/ultimate_planning.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::common::{all_blank, assign_missing_ids, ItemId, ListItem, TimestampNs};
use crate::models::record::PlanRecord;
use crate::utils::money::deserialize_amount;
use crate::utils::shape::{field, FieldShape, JsonKind};

/// Estate and end-of-life planning: who settles the estate, what accounts exist, what should happen to them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UltimatePlanningData {
    pub succession_preferences: SuccessionPreferences,
    pub credit_cards: Vec<CreditCard>,
    pub bank_accounts: Vec<BankAccount>,
    pub investments: Vec<Investment>,
    pub insurance_policies: Vec<InsurancePolicy>,
    pub digital_accounts: Vec<DigitalAccount>,
    pub professional_contacts: Vec<ProfessionalContact>,
    pub funeral_wishes: FuneralWishes,
    #[serde(rename = "dateDerniereRevision")]
    pub date_derniere_revision: String,
    /// Keys this version does not model. Kept so an imported file exports unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SuccessionPreferences {
    pub has_will: bool,
    pub will_location: String,
    pub notary_name: String,
    pub notary_phone: String,
    pub executor_name: String,
    pub executor_phone: String,
    /// Mandat de protection (Quebec incapacity mandate).
    pub has_protection_mandate: bool,
    pub mandatary_name: String,
    pub special_instructions: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCard {
    pub id: ItemId,
    pub issuer: String,
    pub last_four_digits: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub credit_limit: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_balance: String,
    pub auto_payment: bool,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BankAccount {
    pub id: ItemId,
    pub institution: String,
    pub account_type: String,
    pub account_number_hint: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: String,
    pub joint_holder: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Investment {
    pub id: ItemId,
    pub institution: String,
    /// REER, CELI, FERR, non-registered...
    pub account_type: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_value: String,
    pub beneficiary: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InsurancePolicy {
    pub id: ItemId,
    pub insurer: String,
    pub policy_type: String,
    pub policy_number: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub coverage_amount: String,
    pub beneficiary: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub premium: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalAccount {
    pub id: ItemId,
    pub service: String,
    pub username: String,
    pub recovery_email: String,
    /// What to do with the account: close, memorialize, transfer.
    pub instruction: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalContact {
    pub id: ItemId,
    pub role: String,
    pub name: String,
    pub firm: String,
    pub phone: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FuneralWishes {
    pub ceremony_type: String,
    /// Burial, cremation, body donation.
    pub disposition: String,
    pub location: String,
    pub prearranged: bool,
    pub funeral_home: String,
    pub contract_number: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SuccessionPreferences {
    pub fn is_filled(&self) -> bool {
        self.has_will
            || self.has_protection_mandate
            || !all_blank(&[&self.will_location, &self.notary_name, &self.executor_name])
    }
}

impl FuneralWishes {
    pub fn is_filled(&self) -> bool {
        self.prearranged
            || !all_blank(&[&self.ceremony_type, &self.disposition, &self.location, &self.funeral_home])
    }
}

impl ListItem for CreditCard {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.issuer,
            &self.last_four_digits,
            &self.credit_limit,
            &self.current_balance,
            &self.notes,
        ])
    }
}

impl ListItem for BankAccount {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[&self.institution, &self.account_type, &self.account_number_hint, &self.balance])
    }
}

impl ListItem for Investment {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[&self.institution, &self.account_type, &self.current_value, &self.beneficiary])
    }
}

impl ListItem for InsurancePolicy {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.insurer,
            &self.policy_type,
            &self.policy_number,
            &self.coverage_amount,
            &self.beneficiary,
        ])
    }
}

impl ListItem for DigitalAccount {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[&self.service, &self.username, &self.recovery_email, &self.instruction])
    }
}

impl ListItem for ProfessionalContact {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[&self.name, &self.firm, &self.phone, &self.email])
    }
}

impl PlanRecord for UltimatePlanningData {
    const PRIMARY_KEY: &'static str = "ultimatePlanningData";
    const BACKUP_KEY: &'static str = "ultimatePlanningData_backup";
    const EXPORT_FILE_PREFIX: &'static str = "planification-ultime";
    const REQUIRED_FIELDS: &'static [FieldShape] = &[
        field("successionPreferences", JsonKind::Object),
        field("creditCards", JsonKind::Array),
        field("bankAccounts", JsonKind::Array),
        field("investments", JsonKind::Array),
        field("insurancePolicies", JsonKind::Array),
        field("digitalAccounts", JsonKind::Array),
        field("professionalContacts", JsonKind::Array),
        field("funeralWishes", JsonKind::Object),
    ];

    fn defaults() -> Self {
        Self::default()
    }

    fn revision(&self) -> &str {
        &self.date_derniere_revision
    }

    fn stamp_revision(&mut self, revised_at: String) {
        self.date_derniere_revision = revised_at;
    }

    fn assign_missing_ids(&mut self, now_ns: TimestampNs) {
        assign_missing_ids(&mut self.credit_cards, now_ns);
        assign_missing_ids(&mut self.bank_accounts, now_ns);
        assign_missing_ids(&mut self.investments, now_ns);
        assign_missing_ids(&mut self.insurance_policies, now_ns);
        assign_missing_ids(&mut self.digital_accounts, now_ns);
        assign_missing_ids(&mut self.professional_contacts, now_ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revision_field_keeps_french_name() {
        let mut data = UltimatePlanningData::defaults();
        data.stamp_revision("2024-03-01T12:00:00.000Z".to_string());
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["dateDerniereRevision"], json!("2024-03-01T12:00:00.000Z"));
        assert!(value.get("successionPreferences").is_some());
        assert!(UltimatePlanningData::check_shape(&value).is_ok());
    }

    #[test]
    fn wrong_nested_type_fails_to_deserialize() {
        let value = json!({
            "successionPreferences": {"hasWill": "yes"},
            "creditCards": [], "bankAccounts": [], "investments": [],
            "insurancePolicies": [], "digitalAccounts": [], "professionalContacts": [],
            "funeralWishes": {}
        });
        assert!(UltimatePlanningData::check_shape(&value).is_ok());
        assert!(serde_json::from_value::<UltimatePlanningData>(value).is_err());
    }

    #[test]
    fn succession_counts_as_filled_with_a_will_alone() {
        let prefs = SuccessionPreferences { has_will: true, ..Default::default() };
        assert!(prefs.is_filled());
        assert!(!SuccessionPreferences::default().is_filled());
    }
}
