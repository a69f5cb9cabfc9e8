//! Patient text search normalization and matching.
//!
//! # Responsibility
//! - Provide case- and diacritic-insensitive substring matching across a
//!   patient's name, CPF, phone and email.
//!
//! # Invariants
//! - Matching is pure substring containment after folding; no ranking.
//! - Numeric fields (CPF, phone) are compared digit-to-digit so formatting
//!   punctuation never affects a match.

use crate::model::{normalize_cpf, Patient};

/// Lowercases and strips the pt-BR diacritics that appear in patient names.
pub fn fold_text(value: &str) -> String {
    value.to_lowercase().chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Whether `patient` matches `raw_query`. A blank query matches everyone.
pub fn patient_matches(patient: &Patient, raw_query: &str) -> bool {
    let query = fold_text(raw_query.trim());
    if query.is_empty() {
        return true;
    }

    if fold_text(&patient.nome).contains(&query) {
        return true;
    }
    if let Some(email) = &patient.email {
        if fold_text(email).contains(&query) {
            return true;
        }
    }

    // Digit comparison only makes sense when the query carries digits;
    // otherwise every patient with any phone number would match.
    let query_digits = normalize_cpf(&query);
    if !query_digits.is_empty() {
        if normalize_cpf(&patient.cpf).contains(&query_digits) {
            return true;
        }
        if normalize_cpf(&patient.telefone).contains(&query_digits) {
            return true;
        }
    }

    false
}
