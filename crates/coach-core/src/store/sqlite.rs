//! SQLite-backed persistent store.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyValueStore, StoreWrite};
use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM cache_entries WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO cache_entries (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM cache_entries WHERE key = ?1";
const SELECT_KEYS_SQL: &str =
    "SELECT key FROM cache_entries WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key";
const SELECT_UPDATED_AT_SQL: &str = "SELECT updated_at FROM cache_entries WHERE key = ?1";

/// A [`KeyValueStore`] persisted in a single SQLite table.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and initializes the
    /// schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        let schema_sql = include_str!("../../assets/schema.sql");
        connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// When the entry under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Result<Option<Timestamp>> {
        let raw: Option<String> = self
            .connection()
            .query_row(SELECT_UPDATED_AT_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read entry timestamp")?;
        Ok(raw.and_then(|value| value.parse().ok()))
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection()
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read cache entry")
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection()
            .execute(UPSERT_VALUE_SQL, params![key, value, now])
            .db_context("Failed to write cache entry")?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.connection()
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete cache entry")?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let connection = self.connection();
        let mut stmt = connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare key listing")?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get(0))
            .db_context("Failed to list cache keys")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to read cache key")?;
        Ok(keys)
    }

    fn apply(&self, writes: &[StoreWrite]) -> Result<()> {
        let now = Timestamp::now().to_string();
        let mut connection = self.connection();
        let tx = connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for write in writes {
            match write {
                StoreWrite::Set { key, value } => tx
                    .execute(UPSERT_VALUE_SQL, params![key, value, now])
                    .db_context("Failed to write cache entry")?,
                StoreWrite::Delete { key } => tx
                    .execute(DELETE_VALUE_SQL, params![key])
                    .db_context("Failed to delete cache entry")?,
            };
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("cache.db");

        {
            let store = SqliteStore::open(&db_path).expect("Failed to open store");
            store.set("workoutPlan", "{\"a\":1}").unwrap();
            store.set("workoutPlan", "{\"a\":2}").unwrap();
            assert!(store.updated_at("workoutPlan").unwrap().is_some());
        }

        let store = SqliteStore::open(&db_path).expect("Failed to reopen store");
        assert_eq!(
            store.get("workoutPlan").unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        store.delete("workoutPlan").unwrap();
        store.delete("workoutPlan").unwrap();
        assert!(store.get("workoutPlan").unwrap().is_none());
    }

    #[test]
    fn test_apply_rolls_back_on_failure() {
        let store = SqliteStore::open_in_memory().expect("Failed to open store");
        store.set("bodyAnalysis", "old").unwrap();
        store
            .connection()
            .execute_batch(
                "CREATE TRIGGER reject_plan BEFORE INSERT ON cache_entries \
                 WHEN NEW.key = 'workoutPlan' BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = store.apply(&[
            StoreWrite::delete("bodyAnalysis"),
            StoreWrite::set("workoutPlan", "{}"),
        ]);
        assert!(result.is_err());
        assert_eq!(store.get("bodyAnalysis").unwrap().as_deref(), Some("old"));
        assert!(store.get("workoutPlan").unwrap().is_none());

        store
            .apply(&[
                StoreWrite::delete("bodyAnalysis"),
                StoreWrite::set("exercise-details-Squat", "{}"),
            ])
            .unwrap();
        assert!(store.get("bodyAnalysis").unwrap().is_none());
        assert!(store.get("exercise-details-Squat").unwrap().is_some());
    }

    #[test]
    fn test_keys_with_prefix_matches_literally() {
        let store = SqliteStore::open_in_memory().expect("Failed to open store");
        store.set("exercise-details-Squat", "{}").unwrap();
        store.set("exercise-details-100%_Effort", "{}").unwrap();
        store.set("exercise-detailsX", "{}").unwrap();
        store.set("bodyAnalysis", "{}").unwrap();

        let keys = store.keys_with_prefix("exercise-details-").unwrap();
        assert_eq!(
            keys,
            vec!["exercise-details-100%_Effort", "exercise-details-Squat"]
        );
    }
}
