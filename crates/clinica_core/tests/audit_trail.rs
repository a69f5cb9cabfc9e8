use clinica_core::model::{
    AccessAction, AuditLog, CarePlan, MedicalRecordPatch, NewMedicalRecord, Subjective,
};
use clinica_core::{ClinicStore, RetentionPolicy};

fn sample_record(patient_id: &str) -> NewMedicalRecord {
    NewMedicalRecord {
        patient_id: patient_id.to_string(),
        data: "2025-06-10".to_string(),
        subjetivo: Subjective {
            queixa_principal: "Cefaleia frequente".to_string(),
            historico_doenca_atual: "Dor há 2 semanas".to_string(),
            ..Subjective::default()
        },
        plano: CarePlan {
            conduta: "Observação".to_string(),
            ..CarePlan::default()
        },
        ..NewMedicalRecord::default()
    }
}

fn conduct_patch(conduta: &str, edited_by: Option<&str>) -> MedicalRecordPatch {
    MedicalRecordPatch {
        plano: Some(CarePlan {
            conduta: conduta.to_string(),
            ..CarePlan::default()
        }),
        edited_by: edited_by.map(str::to_string),
        ..MedicalRecordPatch::default()
    }
}

#[test]
fn new_record_starts_with_an_empty_seeded_log() {
    let mut store = ClinicStore::new();
    let record = store.add_medical_record(sample_record("p1"));

    assert_eq!(record.audit.created_at, record.created_at);
    assert!(record.audit.versions.is_empty());
    assert!(record.audit.access_history.is_empty());
    assert!(record.audit.last_edited_by.is_none());
}

#[test]
fn caller_seeded_log_keeps_created_by() {
    let mut store = ClinicStore::new();
    let mut data = sample_record("p1");
    data.audit = Some(AuditLog {
        created_by: Some("dr.lucas".to_string()),
        ..AuditLog::default()
    });

    let record = store.add_medical_record(data);
    assert_eq!(record.audit.created_by.as_deref(), Some("dr.lucas"));
    // created_at was left blank by the caller and is stamped at insert.
    assert_eq!(record.audit.created_at, record.created_at);
}

#[test]
fn every_edit_appends_one_version_with_the_previous_body() {
    let mut store = ClinicStore::new();
    let record = store.add_medical_record(sample_record("p1"));

    store.update_medical_record(&record.id, conduct_patch("Conduta A", Some("Dra. Ana")));
    store.update_medical_record(&record.id, conduct_patch("Conduta B", None));
    store.update_medical_record(&record.id, conduct_patch("Conduta C", Some("Dr. Beto")));

    let loaded = store.get_medical_record(&record.id).unwrap();
    let numbers: Vec<u32> = loaded.audit.versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(loaded.plano.conduta, "Conduta C");
    assert_eq!(loaded.audit.last_edited_by.as_deref(), Some("Dr. Beto"));

    // Version 2's snapshot is the body as Conduta A left it, audit excluded.
    let snapshot = loaded.audit.versions[1]
        .snapshot
        .as_object()
        .expect("snapshot is an object");
    assert_eq!(snapshot["plano"]["conduta"], serde_json::json!("Conduta A"));
    assert!(!snapshot.contains_key("audit"));

    // Version 1 was edited by the named clinician; version 2 fell back.
    assert_eq!(loaded.audit.versions[0].edited_by, "Dra. Ana");
    assert_eq!(loaded.audit.versions[1].edited_by, "Usuário do Sistema");
}

#[test]
fn edit_of_unknown_record_is_a_silent_noop() {
    let mut store = ClinicStore::new();
    store.update_medical_record("missing", conduct_patch("Conduta X", None));
    assert!(store.list_medical_records().is_empty());
}

#[test]
fn access_log_tracks_reads_without_bumping_updated_at() {
    let mut store = ClinicStore::new();
    let record = store.add_medical_record(sample_record("p1"));

    store.record_access(&record.id, AccessAction::View, "u1", "Dra. Ana");
    store.record_access(&record.id, AccessAction::Print, "u2", "Recepção");

    let loaded = store.get_medical_record(&record.id).unwrap();
    assert_eq!(loaded.audit.access_history.len(), 2);
    assert_eq!(loaded.audit.access_history[0].action, AccessAction::View);
    assert_eq!(loaded.audit.access_history[1].user_name, "Recepção");
    assert_eq!(loaded.updated_at, record.updated_at);
    assert!(loaded.audit.versions.is_empty());
}

#[test]
fn retention_keeps_only_the_newest_versions() {
    let mut store = ClinicStore::new();
    let record = store.add_medical_record(sample_record("p1"));
    for step in 1..=5 {
        store.update_medical_record(&record.id, conduct_patch(&format!("Conduta {step}"), None));
    }

    let policy = RetentionPolicy {
        access_history_days: 365,
        max_versions: 2,
    };
    store.apply_record_retention(&record.id, &policy);

    let loaded = store.get_medical_record(&record.id).unwrap();
    let numbers: Vec<u32> = loaded.audit.versions.iter().map(|v| v.version).collect();
    // Numbering survives the trim; the next edit would be version 6.
    assert_eq!(numbers, vec![4, 5]);

    store.update_medical_record(&record.id, conduct_patch("Conduta 6", None));
    let loaded = store.get_medical_record(&record.id).unwrap();
    assert_eq!(loaded.audit.versions.last().unwrap().version, 6);
}

#[test]
fn retention_keeps_recent_access_entries() {
    let mut store = ClinicStore::new();
    let record = store.add_medical_record(sample_record("p1"));
    store.record_access(&record.id, AccessAction::View, "u1", "Dra. Ana");

    let policy = RetentionPolicy {
        access_history_days: 30,
        max_versions: 10,
    };
    store.apply_record_retention(&record.id, &policy);

    // The entry was stamped just now, so a 30-day window keeps it.
    let loaded = store.get_medical_record(&record.id).unwrap();
    assert_eq!(loaded.audit.access_history.len(), 1);
}
