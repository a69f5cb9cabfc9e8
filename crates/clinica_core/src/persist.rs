//! Debounced persistence gateway between the store and the durable medium.
//!
//! # Responsibility
//! - Coalesce bursts of mutations into at most one write per collection per
//!   debounce window.
//! - Classify and swallow storage failures so they never propagate into
//!   caller code; the in-memory store stays authoritative for the session.
//!
//! # Invariants
//! - One pending deadline per collection, reset on every new mutation
//!   (cancel-and-reschedule): N mutations inside the window produce exactly
//!   one write reflecting the final state.
//! - Empty collections are skipped except Documents (see
//!   [`Collection::persist_when_empty`]).
//! - No retries, ever; a failed write waits for the next mutation.
//!
//! Deadlines are plain [`Instant`]s supplied by the caller, which keeps the
//! gateway single-threaded and deterministic under test. The host event loop
//! drives [`PersistenceGateway::poll`].

use std::time::{Duration, Instant};

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Appointment, MedicalDocument, MedicalRecord, Patient, Payment};
use crate::storage::KeyValueStore;
use crate::store::{ClinicStore, Collection};

/// Quiet period after the last mutation before a collection is written.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Collections read back from the durable medium at startup. `None` means
/// the key was absent or undecodable and the caller should fall back to
/// seed data for that collection.
#[derive(Debug, Default)]
pub struct LoadedState {
    pub patients: Option<Vec<Patient>>,
    pub appointments: Option<Vec<Appointment>>,
    pub records: Option<Vec<MedicalRecord>>,
    pub payments: Option<Vec<Payment>>,
    pub documents: Option<Vec<MedicalDocument>>,
}

/// Debounced, failure-tolerant writer over a [`KeyValueStore`].
pub struct PersistenceGateway<S: KeyValueStore> {
    storage: S,
    deadlines: [Option<Instant>; Collection::ALL.len()],
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            deadlines: [None; Collection::ALL.len()],
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Schedules (or reschedules) a write for `collection`.
    pub fn mark_dirty(&mut self, collection: Collection, now: Instant) {
        self.deadlines[collection.index()] = Some(now + DEBOUNCE_WINDOW);
    }

    pub fn mark_all_dirty(&mut self, now: Instant) {
        for collection in Collection::ALL {
            self.mark_dirty(collection, now);
        }
    }

    /// Whether a write is scheduled for `collection`.
    pub fn is_pending(&self, collection: Collection) -> bool {
        self.deadlines[collection.index()].is_some()
    }

    /// Writes every collection whose debounce window has elapsed. Returns
    /// the number of collections attempted.
    pub fn poll(&mut self, now: Instant, store: &ClinicStore) -> usize {
        let mut attempted = 0;
        for collection in Collection::ALL {
            if let Some(deadline) = self.deadlines[collection.index()] {
                if deadline <= now {
                    self.write_collection(collection, store);
                    self.deadlines[collection.index()] = None;
                    attempted += 1;
                }
            }
        }
        attempted
    }

    /// Writes every pending collection immediately, ignoring deadlines.
    pub fn flush(&mut self, store: &ClinicStore) {
        for collection in Collection::ALL {
            if self.deadlines[collection.index()].take().is_some() {
                self.write_collection(collection, store);
            }
        }
    }

    /// Removes every persisted collection key and drops pending deadlines.
    pub fn erase_all(&mut self) {
        for collection in Collection::ALL {
            self.deadlines[collection.index()] = None;
            if let Err(err) = self.storage.remove(collection.storage_key()) {
                error!(
                    "event=persist_erase module=persist status=error collection={} error={}",
                    collection, err
                );
            }
        }
    }

    /// Reads every collection back from storage.
    pub fn load(&mut self) -> LoadedState {
        LoadedState {
            patients: self.load_collection(Collection::Patients),
            appointments: self.load_collection(Collection::Appointments),
            records: self.load_collection(Collection::Records),
            payments: self.load_collection(Collection::Payments),
            documents: self.load_collection(Collection::Documents),
        }
    }

    fn load_collection<T: DeserializeOwned>(&mut self, collection: Collection) -> Option<Vec<T>> {
        let text = match self.storage.get(collection.storage_key()) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                error!(
                    "event=persist_load module=persist status=error collection={} error={}",
                    collection, err
                );
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(items) => Some(items),
            Err(err) => {
                // A corrupt blob is dropped rather than trusted; the caller
                // reseeds this collection.
                error!(
                    "event=persist_load module=persist status=error collection={} error_code=decode_failed error={}",
                    collection, err
                );
                None
            }
        }
    }

    fn write_collection(&mut self, collection: Collection, store: &ClinicStore) {
        let payload = match serialize_collection(collection, store) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(
                    "event=persist_write module=persist status=skipped collection={} reason=empty",
                    collection
                );
                return;
            }
            Err(err) => {
                error!(
                    "event=persist_write module=persist status=error collection={} error_code=serialize_failed error={}",
                    collection, err
                );
                return;
            }
        };

        match self.storage.set(collection.storage_key(), &payload) {
            Ok(()) => debug!(
                "event=persist_write module=persist status=ok collection={} bytes={}",
                collection,
                payload.len()
            ),
            Err(err) if err.is_quota() => warn!(
                "event=persist_write module=persist status=degraded collection={} error_code=quota_exceeded error={}",
                collection, err
            ),
            Err(err) => error!(
                "event=persist_write module=persist status=error collection={} error={}",
                collection, err
            ),
        }
    }
}

fn serialize_collection(
    collection: Collection,
    store: &ClinicStore,
) -> Result<Option<String>, serde_json::Error> {
    match collection {
        Collection::Patients => serialize_items(store.patients(), collection),
        Collection::Appointments => serialize_items(store.appointments(), collection),
        Collection::Records => serialize_items(store.medical_records(), collection),
        Collection::Payments => serialize_items(store.payments(), collection),
        Collection::Documents => serialize_items(store.documents(), collection),
    }
}

fn serialize_items<T: Serialize>(
    items: &[T],
    collection: Collection,
) -> Result<Option<String>, serde_json::Error> {
    if items.is_empty() && !collection.persist_when_empty() {
        return Ok(None);
    }
    serde_json::to_string(items).map(Some)
}
