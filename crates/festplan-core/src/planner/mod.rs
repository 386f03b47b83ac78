//! High-level planner API: configured entry point for opening sessions.
//!
//! [`Planner`] owns the configuration shared by every session (database
//! location, festival catalog, base URL) and opens [`PlannerSession`]s backed
//! by the SQLite [`Database`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  PlannerBuilder │───▶│     Planner     │───▶│ PlannerSession  │
//! │ (db path, URL,  │    │ (catalog, conf) │    │ (store, filters,│
//! │  lineup files)  │    │                 │    │  notifications) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use festplan_core::PlannerBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/festplan.db"))
//!     .build()?;
//!
//! let mut session = planner.open_session("doom-valley-2026", None)?;
//! session.toggle_planned("dv-sat-valley-1");
//! println!("{}", session.share_url());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

pub mod builder;


pub use builder::PlannerBuilder;

use crate::{
    db::Database,
    error::Result,
    lineup::Catalog,
    models::{Festival, FestivalMeta},
    session::{Location, PlannerSession},
};

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) catalog: Catalog,
    pub(crate) base_url: String,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, catalog: Catalog, base_url: String) -> Self {
        Self {
            db_path,
            catalog,
            base_url,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Festivals available to plan, in registration order.
    pub fn festivals(&self) -> Vec<FestivalMeta> {
        self.catalog.festivals().cloned().collect()
    }

    /// Loads and validates a festival lineup.
    pub fn festival(&self, festival_id: &str) -> Result<Festival> {
        self.catalog.load(festival_id)
    }

    /// The festival page location, without a plan.
    pub fn location_for(&self, festival_id: &str) -> Result<Location> {
        Location::for_festival(&self.base_url, festival_id)
    }

    /// Opens a session on `festival_id` backed by the planner database.
    ///
    /// `plan_link` is an optional `plan` query value to import, as found in a
    /// shared link.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FestivalNotFound` or `PlannerError::Validation`
    /// if the lineup cannot be loaded, and `PlannerError::Database` if the
    /// database cannot be opened.
    pub fn open_session(
        &self,
        festival_id: &str,
        plan_link: Option<&str>,
    ) -> Result<PlannerSession<Database>> {
        let mut location = self.location_for(festival_id)?;
        if let Some(plan) = plan_link.filter(|p| !p.is_empty()) {
            location.replace_param(crate::plan_url::PLAN_PARAM, Some(plan));
        }
        let database = Database::new(&self.db_path)?;
        PlannerSession::builder(self.catalog.clone(), database)
            .with_location(location)
            .open(festival_id)
    }
}
