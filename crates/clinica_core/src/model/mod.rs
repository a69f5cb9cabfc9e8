//! Domain model for the clinic data layer.
//!
//! # Responsibility
//! - Define the canonical entity types held by the store: patients,
//!   appointments, medical records, payments and generated documents.
//! - Define the patch types used by partial-update operations.
//!
//! # Invariants
//! - Every entity carries an opaque `id` plus `created_at`/`updated_at`
//!   ISO-8601 timestamps; `id` and `created_at` never change after creation.
//! - Serialized field names match the persisted JSON schema of the original
//!   deployment (camelCase Portuguese keys), so existing exports round-trip.

pub mod appointment;
pub mod document;
pub mod patient;
pub mod payment;
pub mod record;

pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, AppointmentType, NewAppointment,
};
pub use document::{
    DocumentStatus, DocumentType, MedicalDocument, MedicalDocumentPatch, NewMedicalDocument,
};
pub use patient::{
    is_valid_cpf, normalize_cpf, Address, ConsentRecord, InsurancePlan, NewPatient, Patient,
    PatientPatch, Sex,
};
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentPatch, PaymentStatus};
pub use record::{
    AccessAction, AccessEntry, Assessment, AuditLog, CarePlan, MedicalRecord, MedicalRecordPatch,
    NewMedicalRecord, Objective, Prescription, Subjective, VersionEntry, VitalSigns,
};
