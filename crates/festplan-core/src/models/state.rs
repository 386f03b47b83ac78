//! Persisted per-festival planner state.

use serde::{Deserialize, Serialize};

/// The visitor's planned and favorited set IDs for one festival.
///
/// Both lists keep insertion order and never hold duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    #[serde(default)]
    pub planned_set_ids: Vec<String>,
    #[serde(default)]
    pub favorite_set_ids: Vec<String>,
}

impl PlannerState {
    /// Parses stored text, treating anything unreadable as empty state.
    ///
    /// Each list is recovered independently: a well-formed `plannedSetIds`
    /// survives a mangled `favoriteSetIds` and vice versa.
    pub fn from_stored(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let object = value.as_object()?;
        Some(Self {
            planned_set_ids: string_list(object.get("plannedSetIds")),
            favorite_set_ids: string_list(object.get("favoriteSetIds")),
        })
    }
}

fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    let Some(items) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for id in items.iter().filter_map(|v| v.as_str()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
