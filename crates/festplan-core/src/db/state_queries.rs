//! Planner state reads and writes.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_STATE_SQL: &str = "SELECT value FROM planner_state WHERE key = ?1";
const UPSERT_STATE_SQL: &str = "INSERT INTO planner_state (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const SELECT_KEYS_SQL: &str = "SELECT key FROM planner_state ORDER BY key";

impl super::Database {
    /// Returns the raw value stored under `key`.
    pub fn get_state(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_STATE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query planner state")
    }

    /// Stores `value` under `key` in a single upsert statement.
    pub fn put_state(&self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_STATE_SQL, params![key, value, now])
            .db_context("Failed to store planner state")?;
        Ok(())
    }

    /// Lists every stored key in order.
    pub fn state_keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare query")?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query planner state keys")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to read planner state key")?;
        Ok(keys)
    }
}
