use clinica_core::model::{
    DocumentStatus, DocumentType, MedicalDocumentPatch, NewMedicalDocument, NewPayment,
    PaymentMethod, PaymentPatch, PaymentStatus,
};
use clinica_core::{ClinicStore, ValidationError};

fn charge(patient_id: &str, valor: f64) -> NewPayment {
    NewPayment {
        patient_id: patient_id.to_string(),
        appointment_id: None,
        valor,
        descricao: "Consulta".to_string(),
        forma_pagamento: PaymentMethod::Pix,
        status: PaymentStatus::Pendente,
        data_pagamento: None,
        data_vencimento: Some("2025-06-30".to_string()),
        numero_recibo: None,
        observacoes: None,
    }
}

fn atestado(patient_id: &str) -> NewMedicalDocument {
    NewMedicalDocument {
        patient_id: patient_id.to_string(),
        kind: DocumentType::AtestadoMedico,
        title: "Atestado médico".to_string(),
        content: Some("Afastamento por 3 dias".to_string()),
        medico_nome: Some("Dr. Lucas Duarte".to_string()),
        medico_crm: Some("000000/SP".to_string()),
        medico_especialidade: None,
        dias_afastamento: Some(3),
        data_inicio: Some("2025-06-10".to_string()),
        data_fim: Some("2025-06-12".to_string()),
        cid10: None,
        exibir_cid: Some(false),
        exames_solicitados: None,
        indicacao_clinica: None,
        especialidade: None,
        motivo_encaminhamento: None,
        urgencia: None,
        finalidade: None,
        hora_chegada: None,
        hora_saida: None,
        conclusao: None,
        prescricoes: None,
    }
}

#[test]
fn settling_a_charge_keeps_the_rest_of_the_payment_intact() {
    let mut store = ClinicStore::new();
    let pending = store.add_payment(charge("p1", 250.0));
    assert_eq!(pending.status, PaymentStatus::Pendente);

    let patch = PaymentPatch {
        status: Some(PaymentStatus::Pago),
        data_pagamento: Some("2025-06-11".to_string()),
        numero_recibo: Some("REC-2025-010".to_string()),
        ..PaymentPatch::default()
    };
    store.update_payment(&pending.id, &patch);

    let paid = store.get_payment(&pending.id).unwrap();
    assert_eq!(paid.status, PaymentStatus::Pago);
    assert_eq!(paid.numero_recibo.as_deref(), Some("REC-2025-010"));
    assert!((paid.valor - 250.0).abs() < f64::EPSILON);
    assert_eq!(paid.data_vencimento.as_deref(), Some("2025-06-30"));
}

#[test]
fn payments_filter_by_patient_and_removal_is_silent() {
    let mut store = ClinicStore::new();
    store.add_payment(charge("p1", 100.0));
    store.add_payment(charge("p1", 200.0));
    let other = store.add_payment(charge("p2", 300.0));

    assert_eq!(store.payments_by_patient("p1").len(), 2);
    assert_eq!(store.payments_by_patient("p2").len(), 1);

    store.remove_payment(&other.id);
    store.remove_payment(&other.id);
    assert!(store.payments_by_patient("p2").is_empty());
    assert_eq!(store.list_payments().len(), 2);
}

#[test]
fn documents_always_enter_as_drafts() {
    let mut store = ClinicStore::new();
    let document = store.add_document(atestado("p1"));
    assert_eq!(document.status, DocumentStatus::Rascunho);
    assert!(document.emitido_at.is_none());
}

#[test]
fn issuing_stamps_the_timestamp_and_locks_the_draft_state() {
    let mut store = ClinicStore::new();
    let document = store.add_document(atestado("p1"));

    store.issue_document(&document.id).unwrap();
    let issued = store.get_document(&document.id).unwrap();
    assert_eq!(issued.status, DocumentStatus::Emitido);
    assert!(issued.emitido_at.is_some());

    // Issuing twice runs against the one-directional lifecycle.
    let err = store.issue_document(&document.id).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::DocumentTransition {
            from: DocumentStatus::Emitido,
            to: DocumentStatus::Emitido,
        }
    ));
}

#[test]
fn cancelled_documents_are_terminal() {
    let mut store = ClinicStore::new();
    let document = store.add_document(atestado("p1"));

    store.issue_document(&document.id).unwrap();
    store.cancel_document(&document.id).unwrap();

    let err = store.issue_document(&document.id).unwrap_err();
    assert!(matches!(err, ValidationError::DocumentTransition { .. }));
    assert_eq!(
        store.get_document(&document.id).unwrap().status,
        DocumentStatus::Cancelado
    );
}

#[test]
fn a_draft_may_be_cancelled_without_ever_being_issued() {
    let mut store = ClinicStore::new();
    let document = store.add_document(atestado("p1"));

    store.cancel_document(&document.id).unwrap();
    let cancelled = store.get_document(&document.id).unwrap();
    assert_eq!(cancelled.status, DocumentStatus::Cancelado);
    assert!(cancelled.emitido_at.is_none());
}

#[test]
fn payload_updates_never_move_the_status() {
    let mut store = ClinicStore::new();
    let document = store.add_document(atestado("p1"));
    store.issue_document(&document.id).unwrap();

    let patch = MedicalDocumentPatch {
        dias_afastamento: Some(5),
        ..MedicalDocumentPatch::default()
    };
    store.update_document(&document.id, &patch);

    let loaded = store.get_document(&document.id).unwrap();
    assert_eq!(loaded.dias_afastamento, Some(5));
    assert_eq!(loaded.status, DocumentStatus::Emitido);
}

#[test]
fn transitions_on_unknown_ids_are_silent() {
    let mut store = ClinicStore::new();
    store.issue_document("missing").unwrap();
    store.cancel_document("missing").unwrap();
    assert!(store.list_documents().is_empty());
}

#[test]
fn documents_filter_by_patient_and_kind() {
    let mut store = ClinicStore::new();
    store.add_document(atestado("p1"));
    store.add_document(atestado("p2"));
    let mut receita = atestado("p1");
    receita.kind = DocumentType::Receita;
    receita.title = "Receita".to_string();
    store.add_document(receita);

    assert_eq!(store.documents_by_patient("p1").len(), 2);
    assert_eq!(store.documents_by_type(DocumentType::AtestadoMedico).len(), 2);
    assert_eq!(store.documents_by_type(DocumentType::Receita).len(), 1);
}
