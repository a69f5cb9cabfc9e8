//! Application service: the single entry point hosts embed.
//!
//! # Responsibility
//! - Own the store and the persistence gateway and keep them in step: every
//!   mutation marks exactly the collections it touched as dirty.
//! - Hydrate state at startup, falling back to the demo dataset per
//!   collection when the durable medium has nothing usable.
//!
//! # Invariants
//! - Reads never touch the gateway; only mutations schedule writes.
//! - Store preconditions propagate to the caller unchanged; persistence
//!   failures never do.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use log::info;

use crate::audit::RetentionPolicy;
use crate::model::{
    AccessAction, Appointment, AppointmentPatch, DocumentType, MedicalDocument,
    MedicalDocumentPatch, MedicalRecord, MedicalRecordPatch, NewAppointment, NewMedicalDocument,
    NewMedicalRecord, NewPatient, NewPayment, Patient, PatientPatch, Payment, PaymentPatch,
};
use crate::persist::PersistenceGateway;
use crate::seed;
use crate::stats::{self, DashboardStats};
use crate::storage::KeyValueStore;
use crate::store::{ClinicSnapshot, ClinicStore, Collection, StoreResult};

/// Clinic data service over a durable medium `S`.
pub struct ClinicService<S: KeyValueStore> {
    store: ClinicStore,
    gateway: PersistenceGateway<S>,
}

impl<S: KeyValueStore> ClinicService<S> {
    /// Hydrates the service from `storage`, reseeding any collection that is
    /// absent or undecodable.
    pub fn new(storage: S) -> Self {
        let mut gateway = PersistenceGateway::new(storage);
        let loaded = gateway.load();

        let demo = seed::demo_snapshot(Local::now().date_naive());
        let mut seeded = 0usize;
        let mut seed_collection = |present: bool| {
            if !present {
                seeded += 1;
            }
        };
        seed_collection(loaded.patients.is_some());
        seed_collection(loaded.appointments.is_some());
        seed_collection(loaded.records.is_some());
        seed_collection(loaded.payments.is_some());
        seed_collection(loaded.documents.is_some());

        let snapshot = ClinicSnapshot {
            patients: loaded.patients.unwrap_or(demo.patients),
            appointments: loaded.appointments.unwrap_or(demo.appointments),
            records: loaded.records.unwrap_or(demo.records),
            payments: loaded.payments.unwrap_or(demo.payments),
            documents: loaded.documents.unwrap_or(demo.documents),
        };
        info!(
            "event=service_init module=service status=ok seeded_collections={}",
            seeded
        );

        Self {
            store: ClinicStore::from_snapshot(snapshot),
            gateway,
        }
    }

    pub fn store(&self) -> &ClinicStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        self.gateway.storage()
    }

    fn touch(&mut self, collections: &[Collection]) {
        let now = Instant::now();
        for &collection in collections {
            self.gateway.mark_dirty(collection, now);
        }
    }

    // ---- patients -------------------------------------------------------

    pub fn add_patient(&mut self, data: NewPatient) -> StoreResult<Patient> {
        let patient = self.store.add_patient(data)?;
        self.touch(&[Collection::Patients]);
        Ok(patient)
    }

    pub fn update_patient(&mut self, id: &str, patch: &PatientPatch) {
        self.store.update_patient(id, patch);
        self.touch(&[Collection::Patients]);
    }

    /// Removes the patient and cascades to their appointments, records and
    /// payments; documents stay.
    pub fn remove_patient(&mut self, id: &str) {
        self.store.remove_patient(id);
        self.touch(&[
            Collection::Patients,
            Collection::Appointments,
            Collection::Records,
            Collection::Payments,
        ]);
    }

    pub fn get_patient(&self, id: &str) -> Option<&Patient> {
        self.store.get_patient(id)
    }

    pub fn list_patients(&self) -> &[Patient] {
        self.store.list_patients()
    }

    pub fn search_patients(&self, query: &str) -> Vec<&Patient> {
        self.store.search_patients(query)
    }

    // ---- appointments ---------------------------------------------------

    pub fn add_appointment(&mut self, data: NewAppointment) -> StoreResult<Appointment> {
        let appointment = self.store.add_appointment(data)?;
        self.touch(&[Collection::Appointments]);
        Ok(appointment)
    }

    pub fn update_appointment(&mut self, id: &str, patch: &AppointmentPatch) -> StoreResult<()> {
        self.store.update_appointment(id, patch)?;
        self.touch(&[Collection::Appointments]);
        Ok(())
    }

    pub fn remove_appointment(&mut self, id: &str) {
        self.store.remove_appointment(id);
        self.touch(&[Collection::Appointments]);
    }

    pub fn get_appointment(&self, id: &str) -> Option<&Appointment> {
        self.store.get_appointment(id)
    }

    pub fn list_appointments(&self) -> &[Appointment] {
        self.store.list_appointments()
    }

    pub fn appointments_by_date(&self, date: &str) -> Vec<&Appointment> {
        self.store.appointments_by_date(date)
    }

    pub fn appointments_by_patient(&self, patient_id: &str) -> Vec<&Appointment> {
        self.store.appointments_by_patient(patient_id)
    }

    pub fn check_appointment_conflict(
        &self,
        date: &str,
        start: &str,
        end: &str,
        exclude_id: Option<&str>,
    ) -> bool {
        self.store
            .check_appointment_conflict(date, start, end, exclude_id)
    }

    // ---- medical records ------------------------------------------------

    pub fn add_medical_record(&mut self, data: NewMedicalRecord) -> MedicalRecord {
        let record = self.store.add_medical_record(data);
        self.touch(&[Collection::Records]);
        record
    }

    pub fn update_medical_record(&mut self, id: &str, patch: MedicalRecordPatch) {
        self.store.update_medical_record(id, patch);
        self.touch(&[Collection::Records]);
    }

    pub fn remove_medical_record(&mut self, id: &str) {
        self.store.remove_medical_record(id);
        self.touch(&[Collection::Records]);
    }

    pub fn record_access(&mut self, id: &str, action: AccessAction, user_id: &str, user_name: &str) {
        self.store.record_access(id, action, user_id, user_name);
        self.touch(&[Collection::Records]);
    }

    pub fn apply_record_retention(&mut self, id: &str, policy: &RetentionPolicy) {
        self.store.apply_record_retention(id, policy);
        self.touch(&[Collection::Records]);
    }

    pub fn get_medical_record(&self, id: &str) -> Option<&MedicalRecord> {
        self.store.get_medical_record(id)
    }

    pub fn list_medical_records(&self) -> &[MedicalRecord] {
        self.store.list_medical_records()
    }

    pub fn records_by_patient(&self, patient_id: &str) -> Vec<&MedicalRecord> {
        self.store.records_by_patient(patient_id)
    }

    // ---- payments -------------------------------------------------------

    pub fn add_payment(&mut self, data: NewPayment) -> Payment {
        let payment = self.store.add_payment(data);
        self.touch(&[Collection::Payments]);
        payment
    }

    pub fn update_payment(&mut self, id: &str, patch: &PaymentPatch) {
        self.store.update_payment(id, patch);
        self.touch(&[Collection::Payments]);
    }

    pub fn remove_payment(&mut self, id: &str) {
        self.store.remove_payment(id);
        self.touch(&[Collection::Payments]);
    }

    pub fn get_payment(&self, id: &str) -> Option<&Payment> {
        self.store.get_payment(id)
    }

    pub fn list_payments(&self) -> &[Payment] {
        self.store.list_payments()
    }

    pub fn payments_by_patient(&self, patient_id: &str) -> Vec<&Payment> {
        self.store.payments_by_patient(patient_id)
    }

    // ---- documents ------------------------------------------------------

    pub fn add_document(&mut self, data: NewMedicalDocument) -> MedicalDocument {
        let document = self.store.add_document(data);
        self.touch(&[Collection::Documents]);
        document
    }

    pub fn update_document(&mut self, id: &str, patch: &MedicalDocumentPatch) {
        self.store.update_document(id, patch);
        self.touch(&[Collection::Documents]);
    }

    pub fn issue_document(&mut self, id: &str) -> StoreResult<()> {
        self.store.issue_document(id)?;
        self.touch(&[Collection::Documents]);
        Ok(())
    }

    pub fn cancel_document(&mut self, id: &str) -> StoreResult<()> {
        self.store.cancel_document(id)?;
        self.touch(&[Collection::Documents]);
        Ok(())
    }

    pub fn remove_document(&mut self, id: &str) {
        self.store.remove_document(id);
        self.touch(&[Collection::Documents]);
    }

    pub fn get_document(&self, id: &str) -> Option<&MedicalDocument> {
        self.store.get_document(id)
    }

    pub fn list_documents(&self) -> &[MedicalDocument] {
        self.store.list_documents()
    }

    pub fn documents_by_patient(&self, patient_id: &str) -> Vec<&MedicalDocument> {
        self.store.documents_by_patient(patient_id)
    }

    pub fn documents_by_type(&self, kind: DocumentType) -> Vec<&MedicalDocument> {
        self.store.documents_by_type(kind)
    }

    // ---- aggregation and lifecycle --------------------------------------

    /// Dashboard figures relative to the local calendar date.
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_for(Local::now().date_naive())
    }

    /// Dashboard figures relative to an explicit reference date.
    pub fn dashboard_stats_for(&self, today: NaiveDate) -> DashboardStats {
        stats::dashboard_stats(&self.store, today)
    }

    /// Clones the whole dataset for export.
    pub fn export_data(&self) -> ClinicSnapshot {
        self.store.snapshot()
    }

    /// Erases the durable medium and resets to the demo dataset, gated by
    /// `confirm`. Returns whether the wipe happened.
    pub fn clear_all_data(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.gateway.erase_all();
        self.store.reset(seed::demo_snapshot(Local::now().date_naive()));
        info!("event=clear_all_data module=service status=ok");
        true
    }

    /// Drives the debounced writer; hosts call this from their event loop.
    /// Returns the number of collections written.
    pub fn poll_persistence(&mut self, now: Instant) -> usize {
        self.gateway.poll(now, &self.store)
    }

    /// Forces every pending write out immediately (shutdown path).
    pub fn flush_persistence(&mut self) {
        self.gateway.flush(&self.store);
    }
}
