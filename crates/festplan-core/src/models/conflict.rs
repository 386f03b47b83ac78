//! Derived conflict records.

use serde::Serialize;

use super::FestivalSet;

/// Separator used inside canonical pair keys.
pub const PAIR_KEY_SEPARATOR: char = '|';

/// Two planned sets whose time intervals overlap. Recomputed, never stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The earlier-starting set
    pub a: FestivalSet,
    pub b: FestivalSet,
    /// Canonical unordered-pair identifier
    pub pair_key: String,
}

impl Conflict {
    pub fn new(a: FestivalSet, b: FestivalSet) -> Self {
        let pair_key = pair_key(&a.id, &b.id);
        Self { a, b, pair_key }
    }

    /// Returns true if either side of the conflict is the given set.
    pub fn involves(&self, set_id: &str) -> bool {
        self.a.id == set_id || self.b.id == set_id
    }
}

/// Builds the key for an unordered pair: the two IDs sorted and joined, so
/// `pair_key(x, y) == pair_key(y, x)`.
pub fn pair_key(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}{PAIR_KEY_SEPARATOR}{hi}")
}
