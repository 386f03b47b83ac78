//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    lineup::Catalog,
    session::DEFAULT_BASE_URL,
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    base_url: Option<String>,
    lineup_files: Vec<PathBuf>,
    catalog: Option<Catalog>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            base_url: None,
            lineup_files: Vec::new(),
            catalog: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/festplan/festplan.db` or
    /// `~/.local/share/festplan/festplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the base URL share links are built on.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: Option<S>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = Some(base_url.into());
        }
        self
    }

    /// Registers an extra lineup document read from disk at build time. A
    /// document using a built-in festival ID replaces the built-in lineup.
    pub fn with_lineup_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.lineup_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Starts from `catalog` instead of the built-in festivals.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database path or a lineup
    /// file is unusable, `PlannerError::Validation` if a lineup file is not
    /// a valid document, and `PlannerError::Database` if database
    /// initialization fails.
    pub fn build(self) -> Result<Planner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Database::new(&db_path)?;

        let mut catalog = self.catalog.unwrap_or_else(Catalog::builtin);
        for path in &self.lineup_files {
            let document = std::fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
                path: path.clone(),
                source: e,
            })?;
            let meta = catalog.register_document(document)?;
            debug!("Registered lineup '{}' from {}", meta.id, path.display());
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Planner::new(db_path, catalog, base_url))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("festplan")
            .place_data_file("festplan.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
