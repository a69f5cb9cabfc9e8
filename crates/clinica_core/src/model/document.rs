//! Generated legal/medical document model.
//!
//! # Responsibility
//! - Define the document entity covering every printable kind the clinic
//!   issues (atestados, declarações, laudos, receitas, encaminhamentos...).
//!
//! # Invariants
//! - Status moves only forward: rascunho -> emitido -> cancelado. A
//!   cancelled document is never reissued; a draft may be cancelled without
//!   ever being issued.

use serde::{Deserialize, Serialize};

use super::record::Prescription;

/// Document kind. Each kind renders a different printable layout; the store
/// only cares about the shared lifecycle and payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    AtestadoMedico,
    DeclaracaoComparecimento,
    LaudoMedico,
    Receita,
    SolicitacaoExames,
    Encaminhamento,
    TermoConsentimento,
    RelatorioMedico,
    DeclaracaoAcompanhante,
    OrientacoesMedicas,
    AtestadoAptidao,
}

/// Document lifecycle state. See the module invariants for legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Rascunho,
    Emitido,
    Cancelado,
}

impl DocumentStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Rascunho => 0,
            Self::Emitido => 1,
            Self::Cancelado => 2,
        }
    }

    /// Whether moving from `self` to `next` respects the one-directional
    /// lifecycle.
    pub fn can_become(self, next: DocumentStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// Generated document for one patient.
///
/// The per-kind payload fields are flat and optional; the UI fills in the
/// subset its form exposes for the chosen [`DocumentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDocument {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub status: DocumentStatus,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitido_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medico_nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medico_crm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medico_especialidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias_afastamento: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exibir_cid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exames_solicitados: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicacao_clinica: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo_encaminhamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgencia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_chegada: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_saida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescricoes: Option<Vec<Prescription>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Document creation payload. New documents always start as drafts.
#[derive(Debug, Clone)]
pub struct NewMedicalDocument {
    pub patient_id: String,
    pub kind: DocumentType,
    pub title: String,
    pub content: Option<String>,
    pub medico_nome: Option<String>,
    pub medico_crm: Option<String>,
    pub medico_especialidade: Option<String>,
    pub dias_afastamento: Option<u32>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub cid10: Option<String>,
    pub exibir_cid: Option<bool>,
    pub exames_solicitados: Option<String>,
    pub indicacao_clinica: Option<String>,
    pub especialidade: Option<String>,
    pub motivo_encaminhamento: Option<String>,
    pub urgencia: Option<String>,
    pub finalidade: Option<String>,
    pub hora_chegada: Option<String>,
    pub hora_saida: Option<String>,
    pub conclusao: Option<String>,
    pub prescricoes: Option<Vec<Prescription>>,
}

impl NewMedicalDocument {
    pub fn into_document(self, id: String, now: String) -> MedicalDocument {
        MedicalDocument {
            id,
            patient_id: self.patient_id,
            kind: self.kind,
            status: DocumentStatus::Rascunho,
            title: self.title,
            content: self.content,
            emitido_at: None,
            medico_nome: self.medico_nome,
            medico_crm: self.medico_crm,
            medico_especialidade: self.medico_especialidade,
            dias_afastamento: self.dias_afastamento,
            data_inicio: self.data_inicio,
            data_fim: self.data_fim,
            cid10: self.cid10,
            exibir_cid: self.exibir_cid,
            exames_solicitados: self.exames_solicitados,
            indicacao_clinica: self.indicacao_clinica,
            especialidade: self.especialidade,
            motivo_encaminhamento: self.motivo_encaminhamento,
            urgencia: self.urgencia,
            finalidade: self.finalidade,
            hora_chegada: self.hora_chegada,
            hora_saida: self.hora_saida,
            conclusao: self.conclusao,
            prescricoes: self.prescricoes,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update for a document's payload fields.
///
/// Deliberately has no `status` member: the lifecycle is moved only by the
/// store's issue/cancel operations so the one-directional rule holds.
#[derive(Debug, Clone, Default)]
pub struct MedicalDocumentPatch {
    pub kind: Option<DocumentType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub medico_nome: Option<String>,
    pub medico_crm: Option<String>,
    pub medico_especialidade: Option<String>,
    pub dias_afastamento: Option<u32>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub cid10: Option<String>,
    pub exibir_cid: Option<bool>,
    pub exames_solicitados: Option<String>,
    pub indicacao_clinica: Option<String>,
    pub especialidade: Option<String>,
    pub motivo_encaminhamento: Option<String>,
    pub urgencia: Option<String>,
    pub finalidade: Option<String>,
    pub hora_chegada: Option<String>,
    pub hora_saida: Option<String>,
    pub conclusao: Option<String>,
    pub prescricoes: Option<Vec<Prescription>>,
}

impl MedicalDocumentPatch {
    pub fn apply_to(&self, document: &mut MedicalDocument) {
        if let Some(v) = self.kind {
            document.kind = v;
        }
        if let Some(v) = &self.title {
            document.title = v.clone();
        }
        if let Some(v) = &self.content {
            document.content = Some(v.clone());
        }
        if let Some(v) = &self.medico_nome {
            document.medico_nome = Some(v.clone());
        }
        if let Some(v) = &self.medico_crm {
            document.medico_crm = Some(v.clone());
        }
        if let Some(v) = &self.medico_especialidade {
            document.medico_especialidade = Some(v.clone());
        }
        if let Some(v) = self.dias_afastamento {
            document.dias_afastamento = Some(v);
        }
        if let Some(v) = &self.data_inicio {
            document.data_inicio = Some(v.clone());
        }
        if let Some(v) = &self.data_fim {
            document.data_fim = Some(v.clone());
        }
        if let Some(v) = &self.cid10 {
            document.cid10 = Some(v.clone());
        }
        if let Some(v) = self.exibir_cid {
            document.exibir_cid = Some(v);
        }
        if let Some(v) = &self.exames_solicitados {
            document.exames_solicitados = Some(v.clone());
        }
        if let Some(v) = &self.indicacao_clinica {
            document.indicacao_clinica = Some(v.clone());
        }
        if let Some(v) = &self.especialidade {
            document.especialidade = Some(v.clone());
        }
        if let Some(v) = &self.motivo_encaminhamento {
            document.motivo_encaminhamento = Some(v.clone());
        }
        if let Some(v) = &self.urgencia {
            document.urgencia = Some(v.clone());
        }
        if let Some(v) = &self.finalidade {
            document.finalidade = Some(v.clone());
        }
        if let Some(v) = &self.hora_chegada {
            document.hora_chegada = Some(v.clone());
        }
        if let Some(v) = &self.hora_saida {
            document.hora_saida = Some(v.clone());
        }
        if let Some(v) = &self.conclusao {
            document.conclusao = Some(v.clone());
        }
        if let Some(v) = &self.prescricoes {
            document.prescricoes = Some(v.clone());
        }
    }
}
