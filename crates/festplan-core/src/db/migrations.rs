//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

/// Version recorded in `PRAGMA user_version` once the schema is in place.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Creates the schema from the embedded SQL file and stamps its version.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute_batch(include_str!("../../assets/schema.sql"))
            .db_context("Failed to initialize database schema")?;

        if self.schema_version()? < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
