//! Patient operations.
//!
//! # Invariants
//! - CPF uniqueness is checked digit-to-digit across the whole collection
//!   before insert; a duplicate leaves the collection untouched.
//! - Removing a patient cascades to their appointments, medical records and
//!   payments. Issued documents are kept — they are standalone legal
//!   artifacts.

use log::info;

use crate::model::{normalize_cpf, NewPatient, Patient, PatientPatch};
use crate::search::patient_matches;

use super::{iso_now, new_id, ClinicStore, StoreResult, ValidationError};

impl ClinicStore {
    /// Inserts a new patient after the unique-CPF precondition.
    pub fn add_patient(&mut self, data: NewPatient) -> StoreResult<Patient> {
        let digits = normalize_cpf(&data.cpf);
        if self
            .patients
            .iter()
            .any(|existing| normalize_cpf(&existing.cpf) == digits)
        {
            return Err(ValidationError::DuplicateCpf { cpf: data.cpf });
        }

        let patient = data.into_patient(new_id(), iso_now());
        self.patients.push(patient.clone());
        Ok(patient)
    }

    /// Merges `patch` into the patient; silent no-op when the id is unknown.
    pub fn update_patient(&mut self, id: &str, patch: &PatientPatch) {
        if let Some(patient) = self.patients.iter_mut().find(|p| p.id == id) {
            patch.apply_to(patient);
            patient.updated_at = iso_now();
        }
    }

    /// Removes the patient and everything owned by them.
    pub fn remove_patient(&mut self, id: &str) {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        if self.patients.len() == before {
            return;
        }

        self.appointments.retain(|a| a.patient_id != id);
        self.records.retain(|r| r.patient_id != id);
        self.payments.retain(|p| p.patient_id != id);
        info!("event=patient_cascade_delete module=store status=ok patient_id={id}");
    }

    pub fn get_patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Case/diacritic-insensitive substring search across name, CPF, phone
    /// and email. A blank query returns every patient.
    pub fn search_patients(&self, query: &str) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| patient_matches(p, query))
            .collect()
    }
}
