//! Lineup loading: structural validation of festival documents and the
//! catalog they are looked up in.
//!
//! Documents use the `{"festival": {...}}` envelope. Validation reports the
//! first violation it finds as [`PlannerError::Validation`], with a path such
//! as `festival.sets[2].dayId`.

mod catalog;


use std::collections::HashSet;

use jiff::civil::DateTime;
use log::warn;
use serde::Deserialize;

pub use catalog::Catalog;

use crate::{
    error::{PlannerError, Result},
    models::{Festival, FestivalDay, FestivalSet, FestivalStage},
};

#[derive(Deserialize)]
struct RawDocument {
    festival: Option<RawFestival>,
}

#[derive(Deserialize)]
struct RawFestival {
    id: Option<String>,
    name: Option<String>,
    days: Option<Vec<RawEntry>>,
    stages: Option<Vec<RawEntry>>,
    sets: Option<Vec<RawSet>>,
}

#[derive(Deserialize)]
struct RawEntry {
    id: Option<String>,
    label: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSet {
    id: Option<String>,
    day_id: Option<String>,
    stage_id: Option<String>,
    band_name: Option<String>,
    genres: Option<Vec<String>>,
    start: Option<String>,
    end: Option<String>,
    image_url: Option<String>,
    spotify_artist_id: Option<String>,
}

/// Parses and validates a lineup document.
///
/// # Errors
///
/// Returns `PlannerError::Validation` for malformed JSON, a field of the wrong
/// type, a missing or empty required field, an empty `days`/`stages` list, a
/// duplicate ID, an unparsable timestamp, or a set referencing an unknown day
/// or stage.
pub fn parse_document(document: &str) -> Result<Festival> {
    let raw: RawDocument = serde_json::from_str(document)
        .map_err(|e| PlannerError::validation("$", e.to_string()))?;
    let festival = raw
        .festival
        .ok_or_else(|| PlannerError::validation("festival", "is required"))?;
    validate_festival(festival)
}

fn validate_festival(raw: RawFestival) -> Result<Festival> {
    let id = required(raw.id, "festival.id")?;
    let name = required(raw.name, "festival.name")?;

    let days = entries(raw.days, "festival.days")?
        .into_iter()
        .map(|(id, label)| FestivalDay { id, label })
        .collect::<Vec<_>>();
    let stages = entries(raw.stages, "festival.stages")?
        .into_iter()
        .map(|(id, label)| FestivalStage { id, label })
        .collect::<Vec<_>>();

    let day_ids: HashSet<&str> = days.iter().map(|d| d.id.as_str()).collect();
    let stage_ids: HashSet<&str> = stages.iter().map(|s| s.id.as_str()).collect();

    let raw_sets = raw.sets.unwrap_or_default();
    let mut sets = Vec::with_capacity(raw_sets.len());
    let mut seen = HashSet::new();
    for (index, raw_set) in raw_sets.into_iter().enumerate() {
        let path = format!("festival.sets[{index}]");
        let set = validate_set(raw_set, &path, &day_ids, &stage_ids)?;
        if !seen.insert(set.id.clone()) {
            return Err(PlannerError::validation(
                format!("{path}.id"),
                format!("duplicate set id '{}'", set.id),
            ));
        }
        sets.push(set);
    }

    Ok(Festival {
        id,
        name,
        days,
        stages,
        sets,
    })
}

fn validate_set(
    raw: RawSet,
    path: &str,
    day_ids: &HashSet<&str>,
    stage_ids: &HashSet<&str>,
) -> Result<FestivalSet> {
    let id = required(raw.id, &format!("{path}.id"))?;

    let day_id = required(raw.day_id, &format!("{path}.dayId"))?;
    if !day_ids.contains(day_id.as_str()) {
        return Err(PlannerError::validation(
            format!("{path}.dayId"),
            format!("unknown day '{day_id}'"),
        ));
    }

    let stage_id = required(raw.stage_id, &format!("{path}.stageId"))?;
    if !stage_ids.contains(stage_id.as_str()) {
        return Err(PlannerError::validation(
            format!("{path}.stageId"),
            format!("unknown stage '{stage_id}'"),
        ));
    }

    let band_name = required(raw.band_name, &format!("{path}.bandName"))?;

    let genres = raw.genres.unwrap_or_default();
    if let Some(index) = genres.iter().position(|g| g.trim().is_empty()) {
        return Err(PlannerError::validation(
            format!("{path}.genres[{index}]"),
            "must not be empty",
        ));
    }

    let start = timestamp(raw.start, &format!("{path}.start"))?;
    let end = timestamp(raw.end, &format!("{path}.end"))?;
    if end <= start {
        warn!("Set '{id}' ends at {end}, not after its start {start}");
    }

    if let Some(ref image_url) = raw.image_url {
        check_image_url(image_url, &format!("{path}.imageUrl"))?;
    }

    Ok(FestivalSet {
        id,
        day_id,
        stage_id,
        band_name,
        genres,
        start,
        end,
        image_url: raw.image_url,
        external_artist_ref: raw.spotify_artist_id,
    })
}

fn required(value: Option<String>, path: &str) -> Result<String> {
    match value {
        None => Err(PlannerError::validation(path, "is required")),
        Some(v) if v.trim().is_empty() => Err(PlannerError::validation(path, "must not be empty")),
        Some(v) => Ok(v),
    }
}

fn entries(value: Option<Vec<RawEntry>>, path: &str) -> Result<Vec<(String, String)>> {
    let raw = value.ok_or_else(|| PlannerError::validation(path, "is required"))?;
    if raw.is_empty() {
        return Err(PlannerError::validation(path, "must contain at least one entry"));
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let id = required(entry.id, &format!("{path}[{index}].id"))?;
        let label = required(entry.label, &format!("{path}[{index}].label"))?;
        if !seen.insert(id.clone()) {
            return Err(PlannerError::validation(
                format!("{path}[{index}].id"),
                format!("duplicate id '{id}'"),
            ));
        }
        out.push((id, label));
    }
    Ok(out)
}

fn timestamp(value: Option<String>, path: &str) -> Result<DateTime> {
    let text = required(value, path)?;
    text.trim()
        .parse::<DateTime>()
        .map_err(|e| PlannerError::validation(path, format!("invalid timestamp '{text}': {e}")))
}

fn check_image_url(value: &str, path: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| PlannerError::validation(path, format!("invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PlannerError::validation(
            path,
            format!("unsupported URL scheme '{other}'"),
        )),
    }
}
