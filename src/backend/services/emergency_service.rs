// src/backend/services/emergency_service.rs

use crate::error::PlannerError;
use crate::models::common::{remove_item, upsert_item, ItemId};
use crate::models::emergency_info::{
    Dependent, EmergencyContact, EmergencyInfo, ImportantDocument, MedicalInfo, Property,
};
use crate::services::stats::{emergency_stats, EmergencyStats};
use crate::storage::{KeyValueStorage, RecordStore};

/// Emergency-info record over an injected storage backend.
pub struct EmergencyInfoService<S> {
    store: RecordStore<EmergencyInfo, S>,
}

impl<S: KeyValueStorage> EmergencyInfoService<S> {
    pub fn new(storage: S) -> Self {
        Self::from_store(RecordStore::new(storage))
    }

    pub fn from_store(store: RecordStore<EmergencyInfo, S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<EmergencyInfo, S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<EmergencyInfo, S> {
        &mut self.store
    }

    // --- Whole-record operations ---

    pub fn get_data(&self) -> EmergencyInfo {
        self.store.get()
    }

    pub fn save_data(&mut self, info: EmergencyInfo) -> bool {
        self.store.save(info)
    }

    pub fn export_data(&self) -> String {
        self.store.export_data()
    }

    pub fn import_data(&mut self, json_text: &str) -> bool {
        self.store.import_data(json_text)
    }

    pub fn restore_from_backup(&self) -> Option<EmergencyInfo> {
        self.store.restore_from_backup()
    }

    pub fn reset(&mut self) {
        self.store.reset()
    }

    pub fn get_stats(&self) -> EmergencyStats {
        emergency_stats(&self.store.get())
    }

    // --- Item operations ---

    /// Adds a contact (empty id) or replaces the contact with the same id.
    ///
    /// # Returns
    /// * `Result<ItemId, PlannerError>` - the contact's id, newly assigned for new contacts.
    pub fn upsert_contact(&mut self, contact: EmergencyContact) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|info, now| upsert_item(&mut info.contacts, contact, now))
    }

    pub fn remove_contact(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|info, _| remove_item(&mut info.contacts, id))
    }

    /// Marks the contact with `id` as the primary one and clears the flag on every other contact.
    ///
    /// # Returns
    /// * `Result<bool, PlannerError>` - false when no contact has that id (nothing changes then).
    pub fn set_primary_contact(&mut self, id: &str) -> Result<bool, PlannerError> {
        let current = self.store.load()?;
        if id.is_empty() || !current.contacts.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        self.store.modify(|info, _| {
            for contact in &mut info.contacts {
                contact.is_primary = contact.id == id;
            }
            true
        })
    }

    pub fn upsert_dependent(&mut self, dependent: Dependent) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|info, now| upsert_item(&mut info.dependents, dependent, now))
    }

    pub fn remove_dependent(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|info, _| remove_item(&mut info.dependents, id))
    }

    pub fn upsert_document(&mut self, document: ImportantDocument) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|info, now| upsert_item(&mut info.documents, document, now))
    }

    pub fn remove_document(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|info, _| remove_item(&mut info.documents, id))
    }

    pub fn upsert_property(&mut self, property: Property) -> Result<ItemId, PlannerError> {
        self.store
            .modify(|info, now| upsert_item(&mut info.properties, property, now))
    }

    pub fn remove_property(&mut self, id: &str) -> Result<bool, PlannerError> {
        self.store.modify(|info, _| remove_item(&mut info.properties, id))
    }

    pub fn update_medical_info(&mut self, medical_info: MedicalInfo) -> Result<(), PlannerError> {
        self.store.modify(|info, _| info.medical_info = medical_info)
    }
}
