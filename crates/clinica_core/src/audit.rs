//! Medical-record audit trail transformations.
//!
//! # Responsibility
//! - Build and extend the version history and access log embedded in each
//!   medical record.
//! - Apply the retention policy that bounds both logs.
//!
//! All operations are pure: they take a record (plus an explicit clock
//! value) and return the transformed record, which keeps the append-only and
//! snapshot invariants testable independently of storage and UI.
//!
//! # Invariants
//! - Version numbers continue from the newest surviving entry, so they are
//!   1-based, strictly increasing and never reused even after retention has
//!   trimmed older entries from the front.
//! - A version snapshot is the pre-update record body without its `audit`
//!   field; snapshots never nest audit trails.
//! - `record_access` never touches clinical content or `updated_at`.

use chrono::{DateTime, Duration, Utc};

use crate::model::{AccessAction, AccessEntry, AuditLog, MedicalRecord, MedicalRecordPatch, VersionEntry};

/// Editor recorded when the caller does not identify one.
pub const DEFAULT_EDITOR: &str = "Usuário do Sistema";

/// Change summary recorded when the caller does not provide one.
pub const DEFAULT_CHANGE_NOTE: &str = "Atualização de prontuário";

/// Bounds applied by [`apply_retention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Access-log entries older than this many days are dropped.
    pub access_history_days: i64,
    /// Only the most recent N version entries are kept.
    pub max_versions: usize,
}

/// Seeds the audit log for a newly created record.
///
/// A caller-provided log (e.g. carrying `created_by`) is preserved; only a
/// missing `created_at` is stamped with `now`.
pub fn seeded_log(existing: Option<AuditLog>, now: &str) -> AuditLog {
    match existing {
        Some(mut log) => {
            if log.created_at.is_empty() {
                log.created_at = now.to_string();
            }
            log
        }
        None => AuditLog {
            created_at: now.to_string(),
            ..AuditLog::default()
        },
    }
}

/// Applies a clinical patch to `current`, appending one version entry whose
/// snapshot is the pre-update body.
pub fn apply_update(current: &MedicalRecord, patch: MedicalRecordPatch, now: &str) -> MedicalRecord {
    let snapshot = body_snapshot(current);
    let next_version = current
        .audit
        .versions
        .last()
        .map(|entry| entry.version + 1)
        .unwrap_or(1);
    let editor = patch
        .edited_by
        .clone()
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    let changes = patch
        .changes
        .clone()
        .unwrap_or_else(|| DEFAULT_CHANGE_NOTE.to_string());

    let mut updated = current.clone();
    patch.apply_to(&mut updated);
    updated.updated_at = now.to_string();
    updated.audit.versions.push(VersionEntry {
        version: next_version,
        timestamp: now.to_string(),
        edited_by: editor.clone(),
        changes,
        snapshot,
    });
    updated.audit.last_edited_by = Some(editor);
    updated.audit.last_edited_at = Some(now.to_string());
    updated
}

/// Appends one access-log entry.
pub fn record_access(
    current: &MedicalRecord,
    action: AccessAction,
    user_id: &str,
    user_name: &str,
    now: &str,
) -> MedicalRecord {
    let mut updated = current.clone();
    updated.audit.access_history.push(AccessEntry {
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        timestamp: now.to_string(),
        action,
    });
    updated
}

/// Applies the retention policy relative to `now`.
///
/// Access entries older than the cutoff are dropped; entries whose timestamp
/// does not parse are dropped as well (an unreadable timestamp cannot prove
/// it is young enough to keep). Versions keep only the newest
/// `max_versions`, trimmed from the front. Idempotent for a fixed `now`.
pub fn apply_retention(
    record: &MedicalRecord,
    policy: &RetentionPolicy,
    now: DateTime<Utc>,
) -> MedicalRecord {
    let cutoff = now - Duration::days(policy.access_history_days);

    let mut updated = record.clone();
    updated.audit.access_history.retain(|entry| {
        DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|ts| ts.with_timezone(&Utc) >= cutoff)
            .unwrap_or(false)
    });

    let excess = updated
        .audit
        .versions
        .len()
        .saturating_sub(policy.max_versions);
    if excess > 0 {
        updated.audit.versions.drain(..excess);
    }

    updated
}

fn body_snapshot(record: &MedicalRecord) -> serde_json::Value {
    let mut value = serde_json::to_value(record).unwrap_or(serde_json::Value::Null);
    if let Some(map) = value.as_object_mut() {
        map.remove("audit");
    }
    value
}
