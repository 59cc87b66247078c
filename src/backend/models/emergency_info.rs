// src/backend/models/emergency_info.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::common::{all_blank, assign_missing_ids, ItemId, ListItem, TimestampNs};
use crate::models::record::PlanRecord;
use crate::utils::money::deserialize_amount;
use crate::utils::shape::{field, FieldShape, JsonKind};

pub const SEEDED_CONTACT_ROWS: usize = 3;
pub const SEEDED_DEPENDENT_ROWS: usize = 4;

/// Everything a relative needs in the first hours of an emergency.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyInfo {
    pub contacts: Vec<EmergencyContact>,
    pub medical_info: MedicalInfo,
    pub dependents: Vec<Dependent>,
    pub documents: Vec<ImportantDocument>,
    pub properties: Vec<Property>,
    pub financial_info: FinancialInfo,
    pub digital_access: DigitalAccess,
    pub insurance: InsuranceInfo,
    pub last_modified: String,
    /// Keys this version does not model. Kept so an imported file exports unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub id: ItemId,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_primary: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalInfo {
    pub blood_type: String,
    pub allergies: String,
    pub medications: String,
    pub conditions: String,
    pub physician_name: String,
    pub physician_phone: String,
    /// RAMQ card number in Quebec.
    pub health_insurance_number: String,
    pub organ_donor: bool,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Dependent {
    pub id: ItemId,
    pub name: String,
    pub relationship: String,
    pub date_of_birth: String,
    pub special_needs: String,
    pub caregiver_name: String,
    pub caregiver_phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportantDocument {
    pub id: ItemId,
    pub document_type: String,
    pub location: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub id: ItemId,
    pub property_type: String,
    pub address: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub estimated_value: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub mortgage_balance: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialInfo {
    pub bank_name: String,
    pub advisor_name: String,
    pub advisor_phone: String,
    pub safe_deposit_box_location: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalAccess {
    pub password_manager: String,
    pub master_password_location: String,
    pub phone_unlock_hint: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InsuranceInfo {
    pub life_insurer: String,
    pub life_policy_number: String,
    pub home_insurer: String,
    pub home_policy_number: String,
    pub auto_insurer: String,
    pub auto_policy_number: String,
    pub broker_name: String,
    pub broker_phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MedicalInfo {
    pub fn is_filled(&self) -> bool {
        !all_blank(&[
            &self.blood_type,
            &self.allergies,
            &self.medications,
            &self.conditions,
            &self.physician_name,
            &self.health_insurance_number,
        ])
    }
}

impl FinancialInfo {
    pub fn is_filled(&self) -> bool {
        !all_blank(&[&self.bank_name, &self.advisor_name, &self.safe_deposit_box_location])
    }
}

impl DigitalAccess {
    pub fn is_filled(&self) -> bool {
        !all_blank(&[&self.password_manager, &self.master_password_location, &self.phone_unlock_hint])
    }
}

impl InsuranceInfo {
    pub fn is_filled(&self) -> bool {
        !all_blank(&[
            &self.life_insurer,
            &self.home_insurer,
            &self.auto_insurer,
            &self.broker_name,
        ])
    }
}

impl EmergencyContact {
    /// A contact someone can actually call.
    pub fn is_reachable(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

impl ListItem for EmergencyContact {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        !self.is_primary
            && all_blank(&[&self.name, &self.relationship, &self.phone, &self.email, &self.address])
    }
}

impl ListItem for Dependent {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.name,
            &self.relationship,
            &self.date_of_birth,
            &self.special_needs,
            &self.caregiver_name,
            &self.caregiver_phone,
        ])
    }
}

impl ListItem for ImportantDocument {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[&self.document_type, &self.location, &self.notes])
    }
}

impl ListItem for Property {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.property_type,
            &self.address,
            &self.estimated_value,
            &self.mortgage_balance,
            &self.notes,
        ])
    }
}

impl PlanRecord for EmergencyInfo {
    const PRIMARY_KEY: &'static str = "emergencyInfo";
    const BACKUP_KEY: &'static str = "emergencyInfo_backup";
    const EXPORT_FILE_PREFIX: &'static str = "urgence";
    const REQUIRED_FIELDS: &'static [FieldShape] = &[
        field("contacts", JsonKind::Array),
        field("medicalInfo", JsonKind::Object),
        field("dependents", JsonKind::Array),
        field("documents", JsonKind::Array),
        field("properties", JsonKind::Array),
        field("financialInfo", JsonKind::Object),
        field("digitalAccess", JsonKind::Object),
        field("insurance", JsonKind::Object),
    ];

    fn defaults() -> Self {
        Self {
            contacts: vec![EmergencyContact::default(); SEEDED_CONTACT_ROWS],
            dependents: vec![Dependent::default(); SEEDED_DEPENDENT_ROWS],
            ..Self::default()
        }
    }

    fn revision(&self) -> &str {
        &self.last_modified
    }

    fn stamp_revision(&mut self, revised_at: String) {
        self.last_modified = revised_at;
    }

    fn assign_missing_ids(&mut self, now_ns: TimestampNs) {
        assign_missing_ids(&mut self.contacts, now_ns);
        assign_missing_ids(&mut self.dependents, now_ns);
        assign_missing_ids(&mut self.documents, now_ns);
        assign_missing_ids(&mut self.properties, now_ns);
    }
}
