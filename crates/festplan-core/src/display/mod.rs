//! Display formatting for festivals, lineups and plans.
//!
//! Domain models implement [`std::fmt::Display`] directly for standalone use;
//! wrapper types add the context a model lacks on its own (stage labels,
//! plan and favorite markers, conflicts). Everything renders as markdown for
//! the CLI's terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ PlannerSession  │    │    Wrappers     │    │    Markdown     │
//! │ (view-models)   │───▶│ (Lineup, Plan-  │───▶│     Output      │
//! │                 │    │  View, ...)     │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`FestivalList`], [`Lineup`] and [`PlanView`]
//! - [`datetime`]: 12-hour set time formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use festplan_core::{
//!     db::MemoryStorage, display::PlanView, lineup::Catalog, session::PlannerSession,
//! };
//!
//! let mut session = PlannerSession::builder(Catalog::builtin(), MemoryStorage::new())
//!     .open("doom-valley-2026")
//!     .unwrap();
//! session.toggle_planned("dv-sat-valley-1");
//!
//! let output = PlanView::new(&session).to_string();
//! assert!(output.contains("## Saturday"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{FestivalList, Lineup, PlanView};
pub use datetime::{SetTime, TimeRange};
