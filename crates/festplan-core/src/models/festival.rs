//! Lineup model: festival days, stages and scheduled sets.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// A calendar day of the festival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FestivalDay {
    pub id: String,
    pub label: String,
}

/// A performance venue within the festival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FestivalStage {
    pub id: String,
    pub label: String,
}

/// A single scheduled performance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FestivalSet {
    /// Unique identifier within the festival
    pub id: String,

    /// Day the set is played on
    pub day_id: String,

    /// Stage the set is played on
    pub stage_id: String,

    /// Performing act
    pub band_name: String,

    /// Genre tags; order carries no meaning for matching
    #[serde(default)]
    pub genres: Vec<String>,

    /// Local start time
    pub start: DateTime,

    /// Local end time, expected to be after `start`
    pub end: DateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Streaming-service artist reference
    #[serde(
        default,
        rename = "spotifyArtistId",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_artist_ref: Option<String>,
}

impl FestivalSet {
    /// Half-open interval overlap: sets that merely touch do not overlap.
    pub fn overlaps(&self, other: &FestivalSet) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Case-insensitive exact match against one of the set's genre tags.
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = super::normalize(genre);
        self.genres.iter().any(|g| super::normalize(g) == wanted)
    }
}

/// The aggregate root: everything published for one festival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Festival {
    pub id: String,
    pub name: String,
    pub days: Vec<FestivalDay>,
    pub stages: Vec<FestivalStage>,
    #[serde(default)]
    pub sets: Vec<FestivalSet>,
}

impl Festival {
    /// Looks up a set by ID.
    pub fn set(&self, id: &str) -> Option<&FestivalSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Returns true when a set with this ID exists in the lineup.
    pub fn contains_set(&self, id: &str) -> bool {
        self.set(id).is_some()
    }

    pub fn day(&self, id: &str) -> Option<&FestivalDay> {
        self.days.iter().find(|d| d.id == id)
    }

    pub fn stage(&self, id: &str) -> Option<&FestivalStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// ID of the first day, which is where browsing starts.
    pub fn first_day_id(&self) -> Option<&str> {
        self.days.first().map(|d| d.id.as_str())
    }
}

/// Catalog metadata shown on the festival list. Not part of the lineup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FestivalMeta {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}
