//! Generated-document operations.
//!
//! # Invariants
//! - Documents always enter as drafts; the only status movers are
//!   [`ClinicStore::issue_document`] and [`ClinicStore::cancel_document`],
//!   which enforce the one-directional lifecycle.

use crate::model::{
    DocumentStatus, DocumentType, MedicalDocument, MedicalDocumentPatch, NewMedicalDocument,
};

use super::{iso_now, new_id, ClinicStore, StoreResult, ValidationError};

impl ClinicStore {
    pub fn add_document(&mut self, data: NewMedicalDocument) -> MedicalDocument {
        let document = data.into_document(new_id(), iso_now());
        self.documents.push(document.clone());
        document
    }

    /// Merges payload fields; the status is untouched. Silent no-op when
    /// the id is unknown.
    pub fn update_document(&mut self, id: &str, patch: &MedicalDocumentPatch) {
        if let Some(document) = self.documents.iter_mut().find(|d| d.id == id) {
            patch.apply_to(document);
            document.updated_at = iso_now();
        }
    }

    /// Moves a draft to `emitido`, stamping the issue timestamp.
    pub fn issue_document(&mut self, id: &str) -> StoreResult<()> {
        self.transition_document(id, DocumentStatus::Emitido)
    }

    /// Moves a draft or issued document to `cancelado`.
    pub fn cancel_document(&mut self, id: &str) -> StoreResult<()> {
        self.transition_document(id, DocumentStatus::Cancelado)
    }

    fn transition_document(&mut self, id: &str, next: DocumentStatus) -> StoreResult<()> {
        let Some(document) = self.documents.iter_mut().find(|d| d.id == id) else {
            return Ok(());
        };
        if !document.status.can_become(next) {
            return Err(ValidationError::DocumentTransition {
                from: document.status,
                to: next,
            });
        }

        let now = iso_now();
        document.status = next;
        if next == DocumentStatus::Emitido {
            document.emitido_at = Some(now.clone());
        }
        document.updated_at = now;
        Ok(())
    }

    pub fn remove_document(&mut self, id: &str) {
        self.documents.retain(|d| d.id != id);
    }

    pub fn get_document(&self, id: &str) -> Option<&MedicalDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn list_documents(&self) -> &[MedicalDocument] {
        &self.documents
    }

    pub fn documents_by_patient(&self, patient_id: &str) -> Vec<&MedicalDocument> {
        self.documents
            .iter()
            .filter(|d| d.patient_id == patient_id)
            .collect()
    }

    pub fn documents_by_type(&self, kind: DocumentType) -> Vec<&MedicalDocument> {
        self.documents.iter().filter(|d| d.kind == kind).collect()
    }
}
