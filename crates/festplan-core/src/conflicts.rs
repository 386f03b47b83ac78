//! Time-overlap detection between planned sets.

use crate::models::{Conflict, FestivalSet};

/// Finds every pair of overlapping sets.
///
/// Sets are sorted by start time (stable on ties) and each one is compared
/// against later-starting sets only while they start before it ends. Once a
/// later set starts at or after `i.end`, every set after it does too, so the
/// scan stops there. Output follows discovery order: ascending by the earlier
/// set's start.
///
/// ```rust
/// use festplan_core::{conflicts::compute_conflicts, models::FestivalSet};
///
/// let set = |id: &str, start: &str, end: &str| FestivalSet {
///     id: id.to_string(),
///     day_id: "fri".to_string(),
///     stage_id: "main".to_string(),
///     band_name: id.to_uppercase(),
///     genres: vec![],
///     start: start.parse().unwrap(),
///     end: end.parse().unwrap(),
///     image_url: None,
///     external_artist_ref: None,
/// };
///
/// let conflicts = compute_conflicts(&[
///     set("s3", "2026-07-17T11:00:00", "2026-07-17T12:00:00"),
///     set("s1", "2026-07-17T10:00:00", "2026-07-17T11:00:00"),
///     set("s2", "2026-07-17T10:30:00", "2026-07-17T11:30:00"),
/// ]);
/// let keys: Vec<_> = conflicts.iter().map(|c| c.pair_key.as_str()).collect();
/// assert_eq!(keys, ["s1|s2", "s2|s3"]);
/// ```
pub fn compute_conflicts(planned: &[FestivalSet]) -> Vec<Conflict> {
    let mut sorted: Vec<&FestivalSet> = planned.iter().collect();
    sorted.sort_by_key(|s| s.start);

    let mut conflicts = Vec::new();
    for (i, current) in sorted.iter().enumerate() {
        for later in &sorted[i + 1..] {
            if later.start >= current.end {
                break;
            }
            if current.id == later.id || !current.overlaps(later) {
                continue;
            }
            conflicts.push(Conflict::new((*current).clone(), (*later).clone()));
        }
    }
    conflicts
}
