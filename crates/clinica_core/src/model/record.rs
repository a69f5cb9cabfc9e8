//! Medical record (SOAP note) domain model with its embedded audit trail.
//!
//! # Responsibility
//! - Define the SOAP-structured clinical note and its audit sub-object.
//!
//! # Invariants
//! - `audit.versions` and `audit.access_history` are append-only logs; the
//!   only other permitted mutation is front-trimming by the retention policy
//!   (see [`crate::audit`]).
//! - Version numbers are 1-based and strictly increasing; numbers are never
//!   reused even after older versions are trimmed.
//! - A version's `snapshot` holds the pre-update record body and never
//!   contains an `audit` field itself.

use serde::{Deserialize, Serialize};

/// Prescribed medication line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub medicamento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentracao: Option<String>,
    pub forma_farmaceutica: String,
    pub posologia: String,
    pub quantidade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duracao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Measured vital signs. All fields optional; `Default` is an empty panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressao_arterial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencia_cardiaca: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencia_respiratoria: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperatura: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturacao_o2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imc: Option<f64>,
}

/// "S" — what the patient reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subjective {
    pub queixa_principal: String,
    pub historico_doenca_atual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duracao_sintomas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sintomas_associados: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisao_sistemas: Option<String>,
}

/// "O" — what the clinician observes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    #[serde(default)]
    pub sinais_vitais: VitalSigns,
    pub exame_fisico: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exames_complementares: Option<String>,
}

/// "A" — diagnostic assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(default)]
    pub hipoteses_diagnosticas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostico_principal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid10: Option<Vec<String>>,
}

/// "P" — conduct and follow-up plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    pub conduta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescricoes: Option<Vec<Prescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitacao_exames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retorno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientacoes: Option<String>,
}

/// Reason a record was opened, as captured by the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    View,
    Edit,
    Print,
    Export,
}

/// One access-log line. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    pub action: AccessAction,
}

/// One version-history line. Append-only; `snapshot` is the record body as
/// it stood immediately before the edit, serialized without its own audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: u32,
    pub timestamp: String,
    pub edited_by: String,
    pub changes: String,
    pub snapshot: serde_json::Value,
}

/// Audit sub-object embedded in every medical record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<String>,
    #[serde(default)]
    pub access_history: Vec<AccessEntry>,
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}

/// SOAP-structured clinical note for one patient encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_atendimento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medico_responsavel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm_medico: Option<String>,
    pub subjetivo: Subjective,
    pub objetivo: Objective,
    pub avaliacao: Assessment,
    pub plano: CarePlan,
    #[serde(default)]
    pub audit: AuditLog,
    pub created_at: String,
    pub updated_at: String,
}

/// Medical-record creation payload.
///
/// `audit` may carry a pre-seeded log (e.g. `created_by`) from the caller;
/// missing pieces are filled in by [`crate::audit::seeded_log`].
#[derive(Debug, Clone, Default)]
pub struct NewMedicalRecord {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub data: String,
    pub tipo_atendimento: Option<String>,
    pub medico_responsavel: Option<String>,
    pub crm_medico: Option<String>,
    pub subjetivo: Subjective,
    pub objetivo: Objective,
    pub avaliacao: Assessment,
    pub plano: CarePlan,
    pub audit: Option<AuditLog>,
}

/// Partial update for a medical record.
///
/// Clinical sections are replaced wholesale when present. `edited_by` and
/// `changes` feed the version entry and are not clinical content themselves.
#[derive(Debug, Clone, Default)]
pub struct MedicalRecordPatch {
    pub appointment_id: Option<String>,
    pub data: Option<String>,
    pub tipo_atendimento: Option<String>,
    pub medico_responsavel: Option<String>,
    pub crm_medico: Option<String>,
    pub subjetivo: Option<Subjective>,
    pub objetivo: Option<Objective>,
    pub avaliacao: Option<Assessment>,
    pub plano: Option<CarePlan>,
    pub edited_by: Option<String>,
    pub changes: Option<String>,
}

impl MedicalRecordPatch {
    /// Merges the clinical fields into `record`. Audit bookkeeping is the
    /// caller's job (see [`crate::audit::apply_update`]).
    pub fn apply_to(&self, record: &mut MedicalRecord) {
        if let Some(v) = &self.appointment_id {
            record.appointment_id = Some(v.clone());
        }
        if let Some(v) = &self.data {
            record.data = v.clone();
        }
        if let Some(v) = &self.tipo_atendimento {
            record.tipo_atendimento = Some(v.clone());
        }
        if let Some(v) = &self.medico_responsavel {
            record.medico_responsavel = Some(v.clone());
        }
        if let Some(v) = &self.crm_medico {
            record.crm_medico = Some(v.clone());
        }
        if let Some(v) = &self.subjetivo {
            record.subjetivo = v.clone();
        }
        if let Some(v) = &self.objetivo {
            record.objetivo = v.clone();
        }
        if let Some(v) = &self.avaliacao {
            record.avaliacao = v.clone();
        }
        if let Some(v) = &self.plano {
            record.plano = v.clone();
        }
    }
}
