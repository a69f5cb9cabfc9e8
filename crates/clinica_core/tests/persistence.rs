use std::time::{Duration, Instant};

use clinica_core::model::{
    Address, NewPatient, NewPayment, PaymentMethod, PaymentStatus, Sex,
};
use clinica_core::storage::KeyValueStore;
use clinica_core::{
    ClinicService, ClinicStore, Collection, MemoryKeyValueStore, PersistenceGateway,
    SqliteKeyValueStore, DEBOUNCE_WINDOW,
};

fn sample_patient(nome: &str, cpf: &str) -> NewPatient {
    NewPatient {
        nome: nome.to_string(),
        cpf: cpf.to_string(),
        data_nascimento: "1990-01-01".to_string(),
        sexo: Sex::Female,
        telefone: "(11) 90000-0000".to_string(),
        email: None,
        endereco: Address {
            logradouro: "Rua A".to_string(),
            numero: "1".to_string(),
            complemento: None,
            bairro: "Centro".to_string(),
            cidade: "São Paulo".to_string(),
            estado: "SP".to_string(),
            cep: "01000-000".to_string(),
        },
        convenio: None,
        alergias: None,
        medicamentos_em_uso: None,
        historico_familiar: None,
        observacoes: None,
        consentimentos: None,
    }
}

#[test]
fn writes_wait_out_the_full_debounce_window() {
    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();

    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new());
    let t0 = Instant::now();
    gateway.mark_dirty(Collection::Patients, t0);

    assert_eq!(gateway.poll(t0 + Duration::from_millis(299), &store), 0);
    assert!(gateway.is_pending(Collection::Patients));

    assert_eq!(gateway.poll(t0 + DEBOUNCE_WINDOW, &store), 1);
    assert!(!gateway.is_pending(Collection::Patients));
    assert!(gateway
        .storage()
        .get(Collection::Patients.storage_key())
        .unwrap()
        .is_some());
}

#[test]
fn burst_of_mutations_coalesces_into_one_write_of_the_final_state() {
    let mut store = ClinicStore::new();
    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new());
    let t0 = Instant::now();

    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();
    gateway.mark_dirty(Collection::Patients, t0);
    store.add_patient(sample_patient("Bia", "987.654.321-00")).unwrap();
    gateway.mark_dirty(Collection::Patients, t0 + Duration::from_millis(200));

    // The second mutation rescheduled the deadline to t0+500ms.
    assert_eq!(gateway.poll(t0 + Duration::from_millis(350), &store), 0);
    assert_eq!(gateway.poll(t0 + Duration::from_millis(500), &store), 1);

    let payload = gateway
        .storage()
        .get(Collection::Patients.storage_key())
        .unwrap()
        .unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
    assert_eq!(items.len(), 2);

    // Nothing left to write.
    assert_eq!(gateway.poll(t0 + Duration::from_secs(5), &store), 0);
}

#[test]
fn empty_collections_are_skipped_except_documents() {
    let store = ClinicStore::new();
    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new());
    let t0 = Instant::now();

    gateway.mark_all_dirty(t0);
    gateway.poll(t0 + DEBOUNCE_WINDOW, &store);

    for collection in Collection::ALL {
        let stored = gateway.storage().get(collection.storage_key()).unwrap();
        if collection == Collection::Documents {
            assert_eq!(stored.as_deref(), Some("[]"));
        } else {
            assert_eq!(stored, None, "{collection} must not be overwritten when empty");
        }
    }
}

#[test]
fn write_failures_are_swallowed_and_not_retried() {
    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();

    let mut backend = MemoryKeyValueStore::new();
    backend.set_fail_writes(true);
    let mut gateway = PersistenceGateway::new(backend);

    let t0 = Instant::now();
    gateway.mark_dirty(Collection::Patients, t0);
    assert_eq!(gateway.poll(t0 + DEBOUNCE_WINDOW, &store), 1);

    // The attempt consumed the deadline; there is no retry loop.
    assert!(!gateway.is_pending(Collection::Patients));
    assert!(gateway.storage().is_empty());
}

#[test]
fn quota_exhaustion_is_tolerated_like_any_other_failure() {
    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();

    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new().with_quota(8));
    let t0 = Instant::now();
    gateway.mark_dirty(Collection::Patients, t0);
    gateway.poll(t0 + DEBOUNCE_WINDOW, &store);

    assert!(!gateway.is_pending(Collection::Patients));
    assert!(gateway.storage().is_empty());
}

#[test]
fn flush_writes_pending_collections_immediately() {
    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();

    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new());
    gateway.mark_dirty(Collection::Patients, Instant::now());
    gateway.flush(&store);

    assert!(!gateway.is_pending(Collection::Patients));
    assert!(gateway
        .storage()
        .get(Collection::Patients.storage_key())
        .unwrap()
        .is_some());
}

#[test]
fn corrupt_blobs_load_as_absent() {
    let mut backend = MemoryKeyValueStore::new();
    backend
        .set(Collection::Patients.storage_key(), "definitely not json")
        .unwrap();

    let mut gateway: PersistenceGateway<MemoryKeyValueStore> = PersistenceGateway::new(backend);
    let loaded = gateway.load();
    assert!(loaded.patients.is_none());
    assert!(loaded.documents.is_none());
}

#[test]
fn erase_all_clears_keys_and_pending_deadlines() {
    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();

    let mut gateway = PersistenceGateway::new(MemoryKeyValueStore::new());
    gateway.mark_dirty(Collection::Patients, Instant::now());
    gateway.flush(&store);
    gateway.mark_dirty(Collection::Patients, Instant::now());

    gateway.erase_all();
    assert!(!gateway.is_pending(Collection::Patients));
    assert!(gateway.storage().is_empty());
}

#[test]
fn sqlite_roundtrip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("clinica.db");

    let mut store = ClinicStore::new();
    store.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();
    store.add_payment(NewPayment {
        patient_id: store.list_patients()[0].id.clone(),
        appointment_id: None,
        valor: 250.0,
        descricao: "Consulta".to_string(),
        forma_pagamento: PaymentMethod::Pix,
        status: PaymentStatus::Pago,
        data_pagamento: Some("2025-06-10".to_string()),
        data_vencimento: None,
        numero_recibo: None,
        observacoes: None,
    });

    {
        let backend = SqliteKeyValueStore::open(&db_path).unwrap();
        let mut gateway = PersistenceGateway::new(backend);
        let t0 = Instant::now();
        gateway.mark_dirty(Collection::Patients, t0);
        gateway.mark_dirty(Collection::Payments, t0);
        gateway.flush(&store);
    }

    let backend = SqliteKeyValueStore::open(&db_path).unwrap();
    let mut gateway = PersistenceGateway::new(backend);
    let loaded = gateway.load();

    let patients = loaded.patients.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].nome, "Ana");
    let payments = loaded.payments.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].status, PaymentStatus::Pago);
    // Untouched collections stay absent.
    assert!(loaded.appointments.is_none());
}

#[test]
fn service_seeds_demo_data_and_persists_mutations() {
    let mut service = ClinicService::new(MemoryKeyValueStore::new());
    assert_eq!(service.list_patients().len(), 3);
    assert_eq!(service.list_appointments().len(), 3);

    service.add_payment(NewPayment {
        patient_id: service.list_patients()[0].id.clone(),
        appointment_id: None,
        valor: 120.0,
        descricao: "Procedimento".to_string(),
        forma_pagamento: PaymentMethod::Dinheiro,
        status: PaymentStatus::Pendente,
        data_pagamento: None,
        data_vencimento: None,
        numero_recibo: None,
        observacoes: None,
    });

    assert!(service.poll_persistence(Instant::now() + DEBOUNCE_WINDOW) >= 1);
    let stored = service
        .storage()
        .get(Collection::Payments.storage_key())
        .unwrap()
        .unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(items.len(), 3);
}

#[test]
fn clear_all_data_is_gated_by_confirmation() {
    let mut service = ClinicService::new(MemoryKeyValueStore::new());
    service.add_patient(sample_patient("Ana", "111.444.777-35")).unwrap();
    assert_eq!(service.list_patients().len(), 4);

    assert!(!service.clear_all_data(|| false));
    assert_eq!(service.list_patients().len(), 4);

    assert!(service.clear_all_data(|| true));
    assert_eq!(service.list_patients().len(), 3);
    assert!(service.storage().is_empty());
}
