//! Collection wrapper types for displaying festivals, lineups and plans.
//!
//! Each wrapper borrows what it renders and handles the empty case with a
//! one-line message.

use std::{collections::HashSet, fmt};

use super::datetime::TimeRange;
use crate::{
    db::Storage,
    models::{Conflict, Festival, FestivalMeta, FestivalSet},
    session::{conflicts_phrase, sets_phrase, DayPlan, PlannerSession, StageLineup},
};

/// Newtype wrapper for displaying the festivals available to plan.
///
/// # Examples
///
/// ```rust
/// use festplan_core::{display::FestivalList, lineup::Catalog};
///
/// let list = FestivalList(Catalog::builtin().festivals().cloned().collect());
/// let output = format!("{list}");
/// assert!(output.contains("Doom Valley"));
/// ```
pub struct FestivalList(pub Vec<FestivalMeta>);

impl FestivalList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FestivalMeta> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FestivalList {
    type Item = &'a FestivalMeta;
    type IntoIter = std::slice::Iter<'a, FestivalMeta>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FestivalList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No festivals found.")
        } else {
            for festival in &self.0 {
                write!(f, "{festival}")?;
            }
            Ok(())
        }
    }
}

/// Markers shown next to a set: planned, favorite, in conflict.
fn write_markers(
    f: &mut fmt::Formatter<'_>,
    set: &FestivalSet,
    planned: &HashSet<String>,
    favorites: &HashSet<String>,
    conflicting: &HashSet<String>,
) -> fmt::Result {
    if planned.contains(&set.id) {
        write!(f, " ✓")?;
    }
    if favorites.contains(&set.id) {
        write!(f, " ★")?;
    }
    if conflicting.contains(&set.id) {
        write!(f, " ⚠")?;
    }
    Ok(())
}

/// The visible sets of the selected day, grouped by stage.
///
/// Planned sets are marked `✓`, favorites `★` and sets in a planned
/// conflict `⚠`.
pub struct Lineup<'a> {
    festival: &'a Festival,
    day_id: &'a str,
    stages: Vec<StageLineup<'a>>,
    planned: &'a HashSet<String>,
    favorites: &'a HashSet<String>,
    conflicting: HashSet<String>,
}

impl<'a> Lineup<'a> {
    /// Captures the session's current filtered lineup.
    pub fn new<S: Storage>(session: &'a PlannerSession<S>) -> Self {
        Self {
            festival: session.festival(),
            day_id: &session.filters().day_id,
            stages: session.sets_by_stage(),
            planned: session.store().planned(),
            favorites: session.store().favorites(),
            conflicting: session.conflicting_ids(),
        }
    }

    /// Number of sets shown.
    pub fn len(&self) -> usize {
        self.stages.iter().map(|s| s.sets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> fmt::Display for Lineup<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.festival.day(self.day_id) {
            Some(day) => writeln!(f, "# {} · {}", self.festival.name, day.label)?,
            None => writeln!(f, "# {}", self.festival.name)?,
        }
        writeln!(f)?;

        if self.is_empty() {
            return writeln!(f, "No sets match the current filters.");
        }

        for stage in self.stages.iter().filter(|s| !s.sets.is_empty()) {
            writeln!(f, "## {}", stage.stage.label)?;
            writeln!(f)?;
            for set in &stage.sets {
                write!(f, "- {set}")?;
                write_markers(f, set, self.planned, self.favorites, &self.conflicting)?;
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The planned sets grouped by day, followed by any conflicts.
pub struct PlanView<'a> {
    festival: &'a Festival,
    days: Vec<DayPlan<'a>>,
    conflicts: Vec<Conflict>,
    share_url: String,
}

impl<'a> PlanView<'a> {
    pub fn new<S: Storage>(session: &'a PlannerSession<S>) -> Self {
        Self {
            festival: session.festival(),
            days: session.plan_by_day(),
            conflicts: session.conflicts(),
            share_url: session.share_url(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}

impl<'a> fmt::Display for PlanView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# My plan · {}", self.festival.name)?;
        writeln!(f)?;

        if self.days.is_empty() {
            return writeln!(f, "No sets planned yet.");
        }

        let planned: usize = self.days.iter().map(|d| d.sets.len()).sum();
        writeln!(
            f,
            "{} planned, {}.",
            sets_phrase(planned),
            conflicts_phrase(self.conflicts.len())
        )?;
        writeln!(f)?;

        for day in &self.days {
            writeln!(f, "## {}", day.day.label)?;
            writeln!(f)?;
            for set in &day.sets {
                let stage = self
                    .festival
                    .stage(&set.stage_id)
                    .map_or(set.stage_id.as_str(), |s| s.label.as_str());
                write!(f, "- {} **{}** · {stage}", TimeRange(set), set.band_name)?;
                if self.conflicts.iter().any(|c| c.involves(&set.id)) {
                    write!(f, " ⚠")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        if !self.conflicts.is_empty() {
            writeln!(f, "## Conflicts")?;
            writeln!(f)?;
            for conflict in &self.conflicts {
                writeln!(f, "- {conflict}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Share: <{}>", self.share_url)
    }
}
