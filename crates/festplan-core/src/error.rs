//! Error types for the festival planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the planner core can report.
///
/// Lineup problems (`Validation`, `FestivalNotFound`) make a festival
/// unloadable. Storage problems (`Database`, `Serialization`) are reported
/// by the session as notifications and never roll back in-memory state.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A lineup document broke a structural rule. `path` names the first
    /// offending field, e.g. `festival.sets[3].bandName`.
    #[error("Invalid lineup at '{path}': {reason}")]
    Validation { path: String, reason: String },

    #[error("Festival '{id}' not found")]
    FestivalNotFound { id: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No usable data directory for the default database location
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// A caller-supplied value was rejected, e.g. an unknown day or a URL
    /// that does not parse
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Storage refused an operation for reasons outside the planner
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Names the field of an [`PlannerError::InvalidInput`] before its reason is
/// known.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Starts an input error for `field`; finish it with
    /// [`InvalidInputBuilder::with_reason`].
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder {
            field: field.into(),
        }
    }

    /// A lineup validation error for the field at `path`.
    pub fn validation(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that make a festival unloadable.
    pub fn is_lineup_failure(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::FestivalNotFound { .. }
        )
    }
}

/// Attaches a message to SQLite errors.
pub trait DatabaseResultExt<T> {
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| PlannerError::Database {
            message: message.to_string(),
            source,
        })
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let error = PlannerError::validation("festival.sets[0].dayId", "unknown day 'sun'");
        assert_eq!(
            error.to_string(),
            "Invalid lineup at 'festival.sets[0].dayId': unknown day 'sun'"
        );
        assert!(error.is_lineup_failure());

        let error = PlannerError::invalid_input("day").with_reason("'mon' is not a day");
        assert_eq!(error.to_string(), "Invalid day: 'mon' is not a day");
        assert!(!error.is_lineup_failure());
    }

    #[test]
    fn test_db_context_keeps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::InvalidQuery);
        match result.db_context("Failed to read") {
            Err(PlannerError::Database { message, source }) => {
                assert_eq!(message, "Failed to read");
                assert!(matches!(source, rusqlite::Error::InvalidQuery));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
