//! Core domain logic for the clinic management data layer.
//! This crate is the single source of truth for business invariants:
//! patient identity, scheduling, record auditing, billing and documents.

pub mod audit;
pub mod logging;
pub mod model;
pub mod persist;
pub mod schedule;
pub mod search;
pub mod seed;
pub mod service;
pub mod stats;
pub mod storage;
pub mod store;

pub use audit::RetentionPolicy;
pub use logging::{default_log_level, init_logging};
pub use persist::{LoadedState, PersistenceGateway, DEBOUNCE_WINDOW};
pub use service::ClinicService;
pub use stats::DashboardStats;
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};
pub use store::{ClinicSnapshot, ClinicStore, Collection, StoreResult, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
