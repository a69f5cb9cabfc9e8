//! Patient domain model.
//!
//! # Responsibility
//! - Define the patient record and its nested contact/clinical blocks.
//! - Provide CPF normalization and checksum validation helpers.
//!
//! # Invariants
//! - `cpf` is the patient's unique business key; the store compares CPFs by
//!   their digit sequence, ignoring formatting.
//! - The checksum validator is advisory for callers; uniqueness is the only
//!   CPF rule the store enforces (legacy records carry free-form CPFs).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("static pattern"));

/// Postal address block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub logradouro: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

/// Health-insurance plan reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub nome: String,
    pub numero: String,
    pub validade: String,
}

/// Consent grant with its lifecycle timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub tipo: String,
    pub concedido: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concedido_em: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revogado_em: Option<String>,
}

/// Biological sex marker used on printed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

/// Patient master record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub nome: String,
    pub cpf: String,
    pub data_nascimento: String,
    pub sexo: Sex,
    pub telefone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub endereco: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convenio: Option<InsurancePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alergias: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicamentos_em_uso: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historico_familiar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consentimentos: Option<Vec<ConsentRecord>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Patient creation payload: a [`Patient`] minus the store-owned fields.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub nome: String,
    pub cpf: String,
    pub data_nascimento: String,
    pub sexo: Sex,
    pub telefone: String,
    pub email: Option<String>,
    pub endereco: Address,
    pub convenio: Option<InsurancePlan>,
    pub alergias: Option<Vec<String>>,
    pub medicamentos_em_uso: Option<Vec<String>>,
    pub historico_familiar: Option<String>,
    pub observacoes: Option<String>,
    pub consentimentos: Option<Vec<ConsentRecord>>,
}

impl NewPatient {
    /// Materializes the stored record; both timestamps start equal.
    pub fn into_patient(self, id: String, now: String) -> Patient {
        Patient {
            id,
            nome: self.nome,
            cpf: self.cpf,
            data_nascimento: self.data_nascimento,
            sexo: self.sexo,
            telefone: self.telefone,
            email: self.email,
            endereco: self.endereco,
            convenio: self.convenio,
            alergias: self.alergias,
            medicamentos_em_uso: self.medicamentos_em_uso,
            historico_familiar: self.historico_familiar,
            observacoes: self.observacoes,
            consentimentos: self.consentimentos,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update for a patient. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<String>,
    pub sexo: Option<Sex>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<Address>,
    pub convenio: Option<InsurancePlan>,
    pub alergias: Option<Vec<String>>,
    pub medicamentos_em_uso: Option<Vec<String>>,
    pub historico_familiar: Option<String>,
    pub observacoes: Option<String>,
    pub consentimentos: Option<Vec<ConsentRecord>>,
}

impl PatientPatch {
    pub fn apply_to(&self, patient: &mut Patient) {
        if let Some(v) = &self.nome {
            patient.nome = v.clone();
        }
        if let Some(v) = &self.cpf {
            patient.cpf = v.clone();
        }
        if let Some(v) = &self.data_nascimento {
            patient.data_nascimento = v.clone();
        }
        if let Some(v) = self.sexo {
            patient.sexo = v;
        }
        if let Some(v) = &self.telefone {
            patient.telefone = v.clone();
        }
        if let Some(v) = &self.email {
            patient.email = Some(v.clone());
        }
        if let Some(v) = &self.endereco {
            patient.endereco = v.clone();
        }
        if let Some(v) = &self.convenio {
            patient.convenio = Some(v.clone());
        }
        if let Some(v) = &self.alergias {
            patient.alergias = Some(v.clone());
        }
        if let Some(v) = &self.medicamentos_em_uso {
            patient.medicamentos_em_uso = Some(v.clone());
        }
        if let Some(v) = &self.historico_familiar {
            patient.historico_familiar = Some(v.clone());
        }
        if let Some(v) = &self.observacoes {
            patient.observacoes = Some(v.clone());
        }
        if let Some(v) = &self.consentimentos {
            patient.consentimentos = Some(v.clone());
        }
    }
}

/// Strips everything but digits from a CPF (or phone) value.
pub fn normalize_cpf(value: &str) -> String {
    NON_DIGITS.replace_all(value, "").into_owned()
}

/// Validates a CPF's mod-11 check digits.
///
/// Repeated-digit sequences (`111.111.111-11` etc.) are rejected even though
/// their checksum holds.
pub fn is_valid_cpf(value: &str) -> bool {
    let digits: Vec<u32> = normalize_cpf(value)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |count: usize| -> u32 {
        let sum: u32 = digits
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, &d)| d * (count as u32 + 1 - i as u32))
            .sum();
        let remainder = (sum * 10) % 11;
        if remainder >= 10 {
            0
        } else {
            remainder
        }
    };

    check(9) == digits[9] && check(10) == digits[10]
}
