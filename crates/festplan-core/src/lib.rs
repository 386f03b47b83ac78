//! Core library for the Festplan festival schedule planner.
//!
//! This crate provides the planning logic behind Festplan: validated festival
//! lineups, a per-festival plan of chosen sets and favorites, conflict
//! detection between overlapping planned sets, lineup filtering, and
//! shareable plan links.
//!
//! # Architecture
//!
//! - **Lineups** ([`lineup`]): structural validation of festival documents
//!   and the [`lineup::Catalog`] they are loaded from
//! - **Pure engines** ([`conflicts`], [`filtering`], [`plan_url`]): stateless
//!   functions over lineup data
//! - **Plan store** ([`store`]): planned and favorite set IDs, persisted on
//!   every change through a [`db::Storage`]
//! - **Session** ([`session`]): keeps store, filters and share link in sync
//!   and drives undo notifications and deferred actions
//! - **Display** ([`display`]): markdown rendering for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use festplan_core::{db::MemoryStorage, lineup::Catalog, session::PlannerSession};
//!
//! let mut session = PlannerSession::builder(Catalog::builtin(), MemoryStorage::new())
//!     .open("antihero-fest-2026")
//!     .unwrap();
//!
//! session.toggle_planned("ahf-fri-main-1");
//! session.toggle_planned("ahf-fri-pit-1");
//!
//! // Glass Hollow and Static Saints overlap by 15 minutes
//! assert_eq!(session.conflicts().len(), 1);
//! assert!(session.share_url().ends_with("?plan=ahf-fri-main-1%2Cahf-fri-pit-1"));
//! ```

pub mod conflicts;
pub mod db;
pub mod display;
pub mod error;
pub mod filtering;
pub mod lineup;
pub mod models;
pub mod params;
pub mod plan_url;
pub mod planner;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use db::{Database, MemoryStorage, Storage};
pub use display::{FestivalList, Lineup, PlanView};
pub use error::{PlannerError, Result};
pub use lineup::Catalog;
pub use models::{
    Conflict, Festival, FestivalDay, FestivalMeta, FestivalSet, FestivalStage, Filters,
    PlannerState, ViewMode,
};
pub use params::{LineupQuery, OpenFestival, SetSelection};
pub use planner::{Planner, PlannerBuilder};
pub use session::{PlannerSession, ShareOutcome};
pub use store::PlanStore;
