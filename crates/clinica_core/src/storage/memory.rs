//! In-memory key-value storage.
//!
//! Used by tests and by hosts that supply their own durability (the gateway
//! only needs the trait surface). Supports the same quota semantics as the
//! SQLite backend plus a switchable failure mode for exercising the
//! gateway's error tolerance.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, StorageResult};

/// HashMap-backed store with optional quota and write-failure injection.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    fail_writes: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the total stored payload at `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Makes every subsequent `set` fail with a non-quota error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(_, value)| value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(
                "write failure injected".to_string(),
            ));
        }
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_excluding(key) + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes: value.len(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn quota_and_failure_injection() {
        let mut store = MemoryKeyValueStore::new().with_quota(4);
        store.set("a", "1234").expect("fits");
        assert!(store.set("b", "5").expect_err("over quota").is_quota());

        store.set_fail_writes(true);
        let err = store.set("a", "1").expect_err("injected failure");
        assert!(!err.is_quota());
    }
}
