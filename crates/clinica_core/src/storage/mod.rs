//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the external storage contract the persistence gateway writes
//!   through: string blobs addressed by key.
//! - Provide the SQLite-backed durable implementation and an in-memory
//!   implementation for tests and embedding hosts.
//!
//! # Invariants
//! - The gateway is the only writer of this resource, so there is no
//!   write-write race by construction.
//! - Implementations report capacity exhaustion as
//!   [`StorageError::QuotaExceeded`] so callers can classify it apart from
//!   backend faults.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure writing to or reading from the durable medium.
#[derive(Debug)]
pub enum StorageError {
    /// The value would not fit the medium's capacity budget.
    QuotaExceeded { key: String, attempted_bytes: usize },
    /// A collection could not be serialized to JSON.
    Serialization(serde_json::Error),
    /// The SQLite backend failed.
    Backend(rusqlite::Error),
    /// The medium is unreachable or refused the operation.
    Unavailable(String),
}

impl StorageError {
    /// Quota exhaustion is logged as a warning and tolerated; everything
    /// else is an error-level event.
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                attempted_bytes,
            } => write!(f, "storage quota exceeded writing {attempted_bytes} bytes to `{key}`"),
            Self::Serialization(err) => write!(f, "{err}"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::QuotaExceeded { .. } => None,
            Self::Serialization(err) => Some(err),
            Self::Backend(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Durable medium contract: get/set/remove string blobs by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
