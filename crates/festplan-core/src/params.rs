//! Parameter structures for planner operations.
//!
//! These structures carry a request from an interface layer (the CLI) to the
//! core without any framework derives. Interface crates define their own
//! argument types with clap attributes and convert them with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    CLI Args     │    │  Core Params    │    │ PlannerSession  │
//! │ (clap derives)  │───▶│ (minimal deps)  │───▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

/// Identifies a festival and optionally a shared plan to import on open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFestival {
    pub festival_id: String,
    /// A `plan` query value, e.g. `s1,s2`
    pub plan: Option<String>,
}

/// Filter selection applied to a session's lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupQuery {
    /// Day to show; the festival's first day when `None`
    pub day: Option<String>,
    pub search: Option<String>,
    pub genres: Vec<String>,
    pub favorites_only: bool,
}

/// One or more sets of a festival to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSelection {
    pub festival_id: String,
    pub set_ids: Vec<String>,
}
