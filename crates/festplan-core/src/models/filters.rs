//! Ephemeral filter selection driving the visible lineup.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::FestivalDay;

/// How the lineup is being browsed. Carried for the view; filtering ignores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Per-stage columns of set cards
    #[default]
    List,

    /// Time-scaled grid
    Timeline,

    /// Only the visitor's plan
    Plan,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "timeline" => Ok(ViewMode::Timeline),
            "plan" => Ok(ViewMode::Plan),
            _ => Err(format!("Invalid view mode: {s}")),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::List => "list",
            ViewMode::Timeline => "timeline",
            ViewMode::Plan => "plan",
        })
    }
}

/// Current filter selection. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Only sets on this day are visible
    pub day_id: String,

    /// Band-name substring, matched case-insensitively after trimming
    pub search_query: String,

    /// Any-of genre selection; empty means no genre restriction
    pub selected_genres: BTreeSet<String>,

    /// Restrict to favorited sets
    pub favorites_only: bool,

    pub view_mode: ViewMode,
}

impl Filters {
    /// Defaults for a freshly loaded festival: first day, nothing else selected.
    pub fn for_days(days: &[FestivalDay]) -> Self {
        Self {
            day_id: days.first().map(|d| d.id.clone()).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Adds the genre if absent, removes it if present.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
    }
}
