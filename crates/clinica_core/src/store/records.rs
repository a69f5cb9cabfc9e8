//! Medical-record operations.
//!
//! # Invariants
//! - Every update goes through the audit module; there is no plain-merge
//!   path for a medical record, so the version history can never be skipped.

use chrono::Utc;

use crate::audit::{self, RetentionPolicy};
use crate::model::{AccessAction, MedicalRecord, MedicalRecordPatch, NewMedicalRecord};

use super::{iso_now, new_id, ClinicStore};

impl ClinicStore {
    /// Inserts a new record with a seeded audit log.
    pub fn add_medical_record(&mut self, data: NewMedicalRecord) -> MedicalRecord {
        let now = iso_now();
        let record = MedicalRecord {
            id: new_id(),
            patient_id: data.patient_id,
            appointment_id: data.appointment_id,
            data: data.data,
            tipo_atendimento: data.tipo_atendimento,
            medico_responsavel: data.medico_responsavel,
            crm_medico: data.crm_medico,
            subjetivo: data.subjetivo,
            objetivo: data.objetivo,
            avaliacao: data.avaliacao,
            plano: data.plano,
            audit: audit::seeded_log(data.audit, &now),
            created_at: now.clone(),
            updated_at: now,
        };
        self.records.push(record.clone());
        record
    }

    /// Applies an audit-aware update; silent no-op when the id is unknown.
    pub fn update_medical_record(&mut self, id: &str, patch: MedicalRecordPatch) {
        if let Some(index) = self.records.iter().position(|r| r.id == id) {
            self.records[index] = audit::apply_update(&self.records[index], patch, &iso_now());
        }
    }

    pub fn remove_medical_record(&mut self, id: &str) {
        self.records.retain(|r| r.id != id);
    }

    /// Appends one access-log entry; silent no-op when the id is unknown.
    pub fn record_access(&mut self, id: &str, action: AccessAction, user_id: &str, user_name: &str) {
        if let Some(index) = self.records.iter().position(|r| r.id == id) {
            self.records[index] =
                audit::record_access(&self.records[index], action, user_id, user_name, &iso_now());
        }
    }

    /// Applies the retention policy to one record, relative to the current
    /// clock. Invoked externally — nothing in the store schedules it.
    pub fn apply_record_retention(&mut self, id: &str, policy: &RetentionPolicy) {
        if let Some(index) = self.records.iter().position(|r| r.id == id) {
            self.records[index] = audit::apply_retention(&self.records[index], policy, Utc::now());
        }
    }

    pub fn get_medical_record(&self, id: &str) -> Option<&MedicalRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn list_medical_records(&self) -> &[MedicalRecord] {
        &self.records
    }

    pub fn records_by_patient(&self, patient_id: &str) -> Vec<&MedicalRecord> {
        self.records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .collect()
    }
}
