//! Plan URL codec: the `plan` query value used for share links.
//!
//! The encoded form is the sorted, deduplicated set of IDs joined with commas,
//! so two plans with the same members always produce the same URL.

use std::collections::BTreeSet;

/// Name of the query parameter carrying the encoded plan.
pub const PLAN_PARAM: &str = "plan";

const SEPARATOR: char = ',';

/// Splits a raw `plan` value into IDs. Tokens are trimmed and empty tokens
/// dropped; `None` or an empty value yields no IDs.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Encodes IDs into the canonical `plan` value.
pub fn encode<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = ids
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect();
    unique.into_iter().collect::<Vec<_>>().join(",")
}
