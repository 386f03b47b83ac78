//! Data models for festival lineups and visitor plans.
//!
//! Lineup types ([`Festival`], [`FestivalDay`], [`FestivalStage`],
//! [`FestivalSet`]) are immutable once loaded. [`PlannerState`] is the only
//! persisted model; [`Filters`] and [`Conflict`] are ephemeral. Display
//! implementations live in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use festplan_core::models::{FestivalSet, pair_key};
//!
//! let a = FestivalSet {
//!     id: "s1".to_string(),
//!     day_id: "fri".to_string(),
//!     stage_id: "main".to_string(),
//!     band_name: "Night Verses".to_string(),
//!     genres: vec!["Post-Rock".to_string()],
//!     start: "2026-07-17T18:00:00".parse().unwrap(),
//!     end: "2026-07-17T19:00:00".parse().unwrap(),
//!     image_url: None,
//!     external_artist_ref: None,
//! };
//! let mut b = a.clone();
//! b.id = "s2".to_string();
//! b.start = "2026-07-17T19:00:00".parse().unwrap();
//! b.end = "2026-07-17T20:00:00".parse().unwrap();
//!
//! // Touching endpoints are not an overlap
//! assert!(!a.overlaps(&b));
//! assert!(a.has_genre("post-rock"));
//! assert_eq!(pair_key("s2", "s1"), pair_key("s1", "s2"));
//! ```

pub mod conflict;
pub mod festival;
pub mod filters;
pub mod state;


pub use conflict::{pair_key, Conflict};
pub use festival::{Festival, FestivalDay, FestivalMeta, FestivalSet, FestivalStage};
pub use filters::{Filters, ViewMode};
pub use state::PlannerState;

/// Trims and lowercases text for case-insensitive comparisons.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
