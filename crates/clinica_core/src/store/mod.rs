//! In-memory entity store: the single owner of the five clinic collections.
//!
//! # Responsibility
//! - Hold patients, appointments, medical records, payments and documents.
//! - Own identity generation, timestamping and collection-specific
//!   preconditions (unique CPF, scheduling conflict, document lifecycle).
//!
//! # Invariants
//! - Collections keep insertion order; cross-entity relations are by id
//!   lookup only, never by shared reference.
//! - `add` never leaves a partial insert behind a failed precondition.
//! - `update`/`remove` of an unknown id are silent no-ops (there is no
//!   NotFound error in this layer by design).
//! - Execution is single-threaded: every operation runs to completion
//!   before the next one starts, so each is atomic by construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
    Appointment, DocumentStatus, MedicalDocument, MedicalRecord, Patient, Payment,
};

mod appointments;
mod documents;
mod patients;
mod payments;
mod records;

pub type StoreResult<T> = Result<T, ValidationError>;

/// Precondition failure raised synchronously by a store operation.
///
/// Callers surface these to the end user and never retry automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Another patient already holds this CPF (compared digit-to-digit).
    DuplicateCpf { cpf: String },
    /// The requested slot overlaps an existing non-cancelled appointment.
    ScheduleConflict {
        data: String,
        hora_inicio: String,
        hora_fim: String,
    },
    /// The requested document status move runs against the one-directional
    /// lifecycle.
    DocumentTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCpf { cpf } => {
                write!(f, "já existe um paciente com o CPF {cpf}")
            }
            Self::ScheduleConflict {
                data,
                hora_inicio,
                hora_fim,
            } => write!(
                f,
                "conflito de horário em {data} entre {hora_inicio} e {hora_fim}"
            ),
            Self::DocumentTransition { from, to } => {
                write!(f, "transição de documento inválida: {from:?} -> {to:?}")
            }
        }
    }
}

impl Error for ValidationError {}

/// The five persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Patients,
    Appointments,
    Records,
    Payments,
    Documents,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Patients,
        Collection::Appointments,
        Collection::Records,
        Collection::Payments,
        Collection::Documents,
    ];

    /// Key the collection serializes under in the key-value store.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Patients => "clinica_patients",
            Self::Appointments => "clinica_appointments",
            Self::Records => "clinica_records",
            Self::Payments => "clinica_payments",
            Self::Documents => "clinica_documents",
        }
    }

    /// Whether an empty collection is still written out.
    ///
    /// Only documents persist when empty (the user can legitimately clear
    /// them all); the other four never overwrite a previously-populated key
    /// with an empty list, protecting against data loss from a
    /// coincidentally-empty startup state.
    pub fn persist_when_empty(self) -> bool {
        matches!(self, Self::Documents)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Patients => 0,
            Self::Appointments => 1,
            Self::Records => 2,
            Self::Payments => 3,
            Self::Documents => 4,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Full copy of all five collections, used for export and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicSnapshot {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub records: Vec<MedicalRecord>,
    pub payments: Vec<Payment>,
    pub documents: Vec<MedicalDocument>,
}

/// The in-memory entity store.
///
/// Constructed by the application root and passed by reference to all
/// operations; there is no ambient singleton.
#[derive(Debug, Default)]
pub struct ClinicStore {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    records: Vec<MedicalRecord>,
    payments: Vec<Payment>,
    documents: Vec<MedicalDocument>,
}

impl ClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: ClinicSnapshot) -> Self {
        Self {
            patients: snapshot.patients,
            appointments: snapshot.appointments,
            records: snapshot.records,
            payments: snapshot.payments,
            documents: snapshot.documents,
        }
    }

    /// Clones all collections into an owned snapshot (`exportData`).
    pub fn snapshot(&self) -> ClinicSnapshot {
        ClinicSnapshot {
            patients: self.patients.clone(),
            appointments: self.appointments.clone(),
            records: self.records.clone(),
            payments: self.payments.clone(),
            documents: self.documents.clone(),
        }
    }

    /// Replaces every collection with the given snapshot's contents.
    pub fn reset(&mut self, snapshot: ClinicSnapshot) {
        *self = Self::from_snapshot(snapshot);
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.records
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn documents(&self) -> &[MedicalDocument] {
        &self.documents
    }
}

/// Generates an opaque unique entity id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current instant in the ISO-8601 shape the original deployment persisted
/// (millisecond precision, `Z` suffix).
pub(crate) fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
