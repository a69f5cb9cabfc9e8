//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open and bootstrap the durable store (file or in-memory).
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Returned stores have the `kv` schema applied and a busy timeout set.
//! - An optional byte quota caps the total stored payload, mirroring the
//!   capacity limit of the browser storage this medium replaces.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyValueStore, StorageError, StorageResult};

const KV_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// Durable key-value store on a SQLite database.
pub struct SqliteKeyValueStore {
    conn: Connection,
    quota_bytes: Option<usize>,
}

impl SqliteKeyValueStore {
    /// Opens (creating if needed) a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=storage status=start mode=file");

        let result = Connection::open(path).and_then(|conn| {
            bootstrap(&conn)?;
            Ok(conn)
        });
        match result {
            Ok(conn) => {
                info!(
                    "event=kv_open module=storage status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn,
                    quota_bytes: None,
                })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Opens a transient in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=storage status=start mode=memory");

        let result = Connection::open_in_memory().and_then(|conn| {
            bootstrap(&conn)?;
            Ok(conn)
        });
        match result {
            Ok(conn) => {
                info!(
                    "event=kv_open module=storage status=ok mode=memory duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn,
                    quota_bytes: None,
                })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Caps the total stored payload at `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    fn used_bytes_excluding(&self, key: &str) -> StorageResult<usize> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM kv WHERE key != ?1;",
            params![key],
            |row| row.get(0),
        )?;
        Ok(used.max(0) as usize)
    }
}

fn bootstrap(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(KV_SCHEMA)?;
    Ok(())
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            let used = self.used_bytes_excluding(key)?;
            if used + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes: value.len(),
                });
            }
        }

        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1;", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn set_get_remove_roundtrip() {
        let mut store = SqliteKeyValueStore::open_in_memory().expect("open in-memory store");

        assert_eq!(store.get("missing").expect("get"), None);

        store.set("k", "v1").expect("first write");
        store.set("k", "v2").expect("overwrite");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v2"));

        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("get"), None);
        store.remove("k").expect("removing absent key is fine");
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let mut store = SqliteKeyValueStore::open_in_memory()
            .expect("open in-memory store")
            .with_quota(10);

        store.set("a", "12345").expect("fits");
        let err = store.set("b", "123456789").expect_err("does not fit");
        assert!(err.is_quota());

        // Replacing a key only counts the other keys against the budget.
        store.set("a", "1234567890").expect("replacement fits alone");
    }
}
