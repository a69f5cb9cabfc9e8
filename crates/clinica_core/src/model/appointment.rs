//! Appointment domain model.
//!
//! # Responsibility
//! - Define the scheduled-visit record and its status/type vocabularies.
//!
//! # Invariants
//! - `data` is a clinic-local "YYYY-MM-DD" calendar date; `hora_inicio` and
//!   `hora_fim` are "HH:MM" wall-clock times forming a half-open interval
//!   `[hora_inicio, hora_fim)`. There is no timezone handling anywhere.
//! - Status is advisory: any status may be assigned from any other. The
//!   scheduling-conflict rule is the only invariant the store enforces.

use serde::{Deserialize, Serialize};

/// Visit lifecycle status.
///
/// The happy path is agendada -> confirmada -> aguardando -> em_atendimento
/// -> finalizada, with cancelada/faltou reachable from any non-terminal
/// state, but no transition table is enforced — clinicians may move a visit
/// to any status (e.g. to revert a mistaken check-in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Agendada,
    Confirmada,
    Aguardando,
    EmAtendimento,
    Finalizada,
    Cancelada,
    Faltou,
}

impl AppointmentStatus {
    /// Cancelled visits are invisible to the conflict check.
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelada)
    }
}

/// Visit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    PrimeiraConsulta,
    Retorno,
    Urgencia,
    Exame,
    Procedimento,
}

/// Scheduled visit for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub data: String,
    pub hora_inicio: String,
    pub hora_fim: String,
    pub tipo: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convenio: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

/// Appointment creation payload.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: String,
    pub data: String,
    pub hora_inicio: String,
    pub hora_fim: String,
    pub tipo: AppointmentType,
    pub status: AppointmentStatus,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub valor: Option<f64>,
    pub convenio: Option<bool>,
}

impl NewAppointment {
    pub fn into_appointment(self, id: String, now: String) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            data: self.data,
            hora_inicio: self.hora_inicio,
            hora_fim: self.hora_fim,
            tipo: self.tipo,
            status: self.status,
            motivo: self.motivo,
            observacoes: self.observacoes,
            valor: self.valor,
            convenio: self.convenio,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update for an appointment. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub patient_id: Option<String>,
    pub data: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
    pub tipo: Option<AppointmentType>,
    pub status: Option<AppointmentStatus>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub valor: Option<f64>,
    pub convenio: Option<bool>,
}

impl AppointmentPatch {
    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(v) = &self.patient_id {
            appointment.patient_id = v.clone();
        }
        if let Some(v) = &self.data {
            appointment.data = v.clone();
        }
        if let Some(v) = &self.hora_inicio {
            appointment.hora_inicio = v.clone();
        }
        if let Some(v) = &self.hora_fim {
            appointment.hora_fim = v.clone();
        }
        if let Some(v) = self.tipo {
            appointment.tipo = v;
        }
        if let Some(v) = self.status {
            appointment.status = v;
        }
        if let Some(v) = &self.motivo {
            appointment.motivo = Some(v.clone());
        }
        if let Some(v) = &self.observacoes {
            appointment.observacoes = Some(v.clone());
        }
        if let Some(v) = self.valor {
            appointment.valor = Some(v);
        }
        if let Some(v) = self.convenio {
            appointment.convenio = Some(v);
        }
    }
}
