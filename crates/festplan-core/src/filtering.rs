//! Filter engine: which sets are visible for the current selection.

use std::collections::{BTreeSet, HashSet};

use crate::models::{normalize, FestivalSet, Filters};

/// Returns the sets passing every active filter, in input order.
///
/// A set is visible when it is on the selected day, is a favorite (if
/// favorites-only is on), has a band name containing the trimmed query
/// (case-insensitive), and carries at least one selected genre (exact tag,
/// case-insensitive). Empty query and empty genre selection match everything.
pub fn apply_filters<'a>(
    sets: &'a [FestivalSet],
    filters: &Filters,
    favorite_ids: &HashSet<String>,
) -> Vec<&'a FestivalSet> {
    let query = normalize(&filters.search_query);

    sets.iter()
        .filter(|s| s.day_id == filters.day_id)
        .filter(|s| !filters.favorites_only || favorite_ids.contains(&s.id))
        .filter(|s| query.is_empty() || normalize(&s.band_name).contains(&query))
        .filter(|s| {
            filters.selected_genres.is_empty()
                || filters.selected_genres.iter().any(|g| s.has_genre(g))
        })
        .collect()
}

/// Every genre tag used anywhere in the lineup, sorted and deduplicated.
pub fn collect_genres(sets: &[FestivalSet]) -> Vec<String> {
    sets.iter()
        .flat_map(|s| s.genres.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
