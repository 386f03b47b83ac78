//! Planner session: one visitor browsing one festival.
//!
//! The session ties the lineup, the [`PlanStore`], the filters and the page
//! [`Location`] together and keeps them consistent:
//!
//! ```text
//! festival load ──▶ hydrate store ──▶ import plan from link (once) ──▶ export
//!                                                                       ▲
//! toggle / clear / undo / navigate ─────────────────────────────────────┘
//! ```
//!
//! Import reads the `plan` query value only when a festival is loaded.
//! Export rewrites the query value after every plan change, replacing the
//! current history entry. Export never triggers import, so the two cannot
//! feed each other.
//!
//! Destructive actions (removing a set, clearing the plan) push a
//! notification carrying an [`UndoAction`]; its auto-dismiss timer is
//! canceled when the notification is dismissed, activated or evicted.
//! Deferred work only runs from [`PlannerSession::tick`].
//!
//! Derived view-models (`visible_sets`, `planned_sets`, `conflicts`, ...) are
//! computed on demand from the current inputs and never cached.

mod builder;
pub mod clock;
pub mod location;
pub mod notifications;
pub mod share;
pub mod timers;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde::Serialize;

pub use builder::{SessionBuilder, DEFAULT_BASE_URL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use location::Location;
pub use notifications::{
    NewNotification, Notification, NotificationAction, NotificationCenter, NotificationId,
    NotificationVariant, UndoAction,
};
pub use share::{Clipboard, ClipboardError, ShareOutcome};
pub use timers::{TimerHandle, Timers};

use crate::{
    conflicts::compute_conflicts,
    db::Storage,
    error::{PlannerError, Result},
    filtering::{apply_filters, collect_genres},
    lineup::Catalog,
    models::{Conflict, Festival, FestivalDay, FestivalSet, FestivalStage, Filters, ViewMode},
    params::LineupQuery,
    plan_url::{self, PLAN_PARAM},
    store::PlanStore,
};

/// Undo window after removing a single set.
pub const REMOVE_UNDO_MS: u64 = 5000;
/// Undo window after clearing the plan.
pub const CLEAR_UNDO_MS: u64 = 6000;
/// How long restore confirmations stay up.
pub const RESTORED_MS: u64 = 2000;
/// How long the manual-copy hint stays up.
pub const MANUAL_COPY_MS: u64 = 3200;
/// Delay before scrolling, so the plan drawer can finish closing.
pub const SCROLL_DELAY_MS: u64 = 80;
/// How long a jumped-to set stays highlighted.
pub const HIGHLIGHT_MS: u64 = 1000;

/// Asks the view to scroll a set into view and highlight it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSignal {
    pub target_set_id: String,
    pub highlight_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerEvent {
    Dismiss(NotificationId),
    ScrollTo(String),
    ClearHighlight(String),
}

/// Planned sets falling on one festival day.
#[derive(Debug, Clone)]
pub struct DayPlan<'a> {
    pub day: &'a FestivalDay,
    pub sets: Vec<&'a FestivalSet>,
}

/// Visible sets on one stage, sorted by start.
#[derive(Debug, Clone)]
pub struct StageLineup<'a> {
    pub stage: &'a FestivalStage,
    pub sets: Vec<&'a FestivalSet>,
}

/// Orchestrates lineup, plan store, filters and location for one festival at
/// a time.
pub struct PlannerSession<S: Storage> {
    catalog: Catalog,
    festival: Festival,
    store: PlanStore<S>,
    filters: Filters,
    location: Location,
    notifications: NotificationCenter,
    timers: Timers<TimerEvent>,
    clock: Box<dyn Clock>,
    drawer_open: bool,
    highlighted_set_id: Option<String>,
    jump_timers: Vec<TimerHandle>,
    scroll_signals: Vec<ScrollSignal>,
    imports: usize,
    imported_sets: usize,
}

impl<S: Storage> PlannerSession<S> {
    /// Starts building a session over `catalog` and `storage`.
    pub fn builder(catalog: Catalog, storage: S) -> SessionBuilder<S> {
        SessionBuilder::new(catalog, storage)
    }

    pub(crate) fn open(
        catalog: Catalog,
        festival_id: &str,
        storage: S,
        location: Location,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let festival = catalog.load(festival_id)?;
        let store = PlanStore::open(festival_id, storage);
        let filters = Filters::for_days(&festival.days);

        let mut session = Self {
            catalog,
            festival,
            store,
            filters,
            location,
            notifications: NotificationCenter::new(),
            timers: Timers::new(),
            clock,
            drawer_open: false,
            highlighted_set_id: None,
            jump_timers: Vec::new(),
            scroll_signals: Vec::new(),
            imports: 0,
            imported_sets: 0,
        };
        session.after_festival_load();
        Ok(session)
    }

    /// Handles a route change to another festival. Loading the same festival
    /// again is a no-op and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `FestivalNotFound` or `Validation` if the lineup cannot be
    /// loaded; the session then stays on the current festival.
    pub fn switch_festival(&mut self, festival_id: &str, location: Location) -> Result<bool> {
        if festival_id == self.festival.id {
            return Ok(false);
        }
        let festival = self.catalog.load(festival_id)?;

        for timer in self.notifications.clear() {
            self.timers.cancel(timer);
        }
        self.store.reopen(festival_id);
        self.filters = Filters::for_days(&festival.days);
        self.festival = festival;
        self.location.navigate(location);
        self.drawer_open = false;
        self.cancel_jump();
        self.highlighted_set_id = None;

        self.after_festival_load();
        Ok(true)
    }

    fn after_festival_load(&mut self) {
        debug!(
            "Loaded festival '{}' with {} sets",
            self.festival.id,
            self.festival.sets.len()
        );
        let festival = &self.festival;
        match self.store.retain_known(|id| festival.contains_set(id)) {
            Ok(0) => {}
            Ok(removed) => warn!("Dropped {removed} stored set ids unknown to '{}'", festival.id),
            Err(e) => self.save_failed(&e),
        }
        self.import_from_link();
        self.export_to_link();
    }

    /// Applies the `plan` query value to the store. Runs once per festival
    /// load.
    fn import_from_link(&mut self) {
        self.imports += 1;
        self.imported_sets = 0;
        let requested = plan_url::decode(self.location.param(PLAN_PARAM).as_deref());
        if requested.is_empty() {
            return;
        }

        let mut seen = HashSet::new();
        let valid: Vec<String> = requested
            .into_iter()
            .filter(|id| self.festival.contains_set(id))
            .filter(|id| seen.insert(id.clone()))
            .collect();
        if valid.is_empty() {
            debug!("Plan link matched no sets in '{}'", self.festival.id);
            return;
        }

        let count = valid.len();
        self.imported_sets = count;
        debug!("Importing {count} sets from plan link");
        if let Err(e) = self.store.set_plan(valid) {
            self.save_failed(&e);
        }
        self.notify(
            NewNotification::new(format!("Loaded {} from shared link.", sets_phrase(count)))
                .with_title("Plan loaded")
                .with_variant(NotificationVariant::Success),
        );
    }

    /// Rewrites the `plan` query value from the store when it differs,
    /// without adding a history entry.
    fn export_to_link(&mut self) {
        let next = plan_url::encode(self.store.planned_ids());
        let current = self.location.param(PLAN_PARAM).unwrap_or_default();
        if current == next {
            return;
        }
        debug!("Updating plan link to '{next}'");
        let value = (!next.is_empty()).then_some(next.as_str());
        self.location.replace_param(PLAN_PARAM, value);
    }

    /// Runs a store mutation, reports a failed save, and re-exports the link.
    fn mutate<F>(&mut self, op: F)
    where
        F: FnOnce(&mut PlanStore<S>) -> Result<()>,
    {
        if let Err(e) = op(&mut self.store) {
            self.save_failed(&e);
        }
        self.export_to_link();
    }

    fn save_failed(&mut self, error: &PlannerError) {
        warn!("Failed to save plan for '{}': {error}", self.festival.id);
        self.notify(
            NewNotification::new("Your changes are kept for this session only.")
                .with_title("Couldn't save plan")
                .with_variant(NotificationVariant::Danger),
        );
    }

    fn notify(&mut self, draft: NewNotification) -> NotificationId {
        let id = self.notifications.next_id();
        let deadline = clock::after_ms(self.clock.now(), draft.duration_ms());
        let timer = self.timers.schedule(deadline, TimerEvent::Dismiss(id));
        for evicted in self.notifications.push(id, draft, timer) {
            self.timers.cancel(evicted);
        }
        id
    }

    // ------------------------------------------------------------------
    // Plan mutations
    // ------------------------------------------------------------------

    /// Toggles a set in the plan. Removing goes through
    /// [`PlannerSession::remove_from_plan`] and is undoable; adding is not.
    /// Unknown set IDs are ignored.
    pub fn toggle_planned(&mut self, set_id: &str) {
        if !self.festival.contains_set(set_id) {
            debug!("Ignoring toggle of unknown set '{set_id}'");
            return;
        }
        if self.store.is_planned(set_id) {
            self.remove_from_plan(set_id);
        } else {
            self.mutate(|store| store.toggle_planned(set_id).map(|_| ()));
        }
    }

    /// Removes a planned set and offers an undo. Returns the notification ID,
    /// or `None` if the set was not planned.
    pub fn remove_from_plan(&mut self, set_id: &str) -> Option<NotificationId> {
        if !self.store.is_planned(set_id) {
            return None;
        }
        let band_name = self.band_name(set_id);
        self.mutate(|store| store.toggle_planned(set_id).map(|_| ()));

        Some(
            self.notify(
                NewNotification::new(band_name.clone())
                    .with_title("Removed from plan")
                    .with_duration_ms(REMOVE_UNDO_MS)
                    .with_undo(UndoAction::RestoreSet {
                        set_id: set_id.to_string(),
                        band_name,
                    }),
            ),
        )
    }

    /// Toggles a favorite. Unknown set IDs are ignored.
    pub fn toggle_favorite(&mut self, set_id: &str) {
        if !self.festival.contains_set(set_id) {
            debug!("Ignoring favorite of unknown set '{set_id}'");
            return;
        }
        self.mutate(|store| store.toggle_favorite(set_id).map(|_| ()));
    }

    /// Clears the plan and offers an undo restoring the exact snapshot.
    /// Clearing an empty plan does nothing and returns `None`.
    pub fn clear_plan(&mut self) -> Option<NotificationId> {
        let snapshot = self.store.planned_ids().to_vec();
        if snapshot.is_empty() {
            return None;
        }
        self.mutate(|store| store.clear_plan());

        Some(
            self.notify(
                NewNotification::new(format!("Removed {}.", sets_phrase(snapshot.len())))
                    .with_title("Plan cleared")
                    .with_duration_ms(CLEAR_UNDO_MS)
                    .with_undo(UndoAction::RestorePlan { snapshot }),
            ),
        )
    }

    // ------------------------------------------------------------------
    // Notifications and timers
    // ------------------------------------------------------------------

    /// Active notifications, newest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn notification(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.get(id)
    }

    /// Dismisses a notification and cancels its timer. Returns false if it
    /// was no longer active.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.notifications.remove(id) {
            Some((_, timer)) => {
                self.timers.cancel(timer);
                true
            }
            None => false,
        }
    }

    /// Runs a notification's action and dismisses it. Returns false if the
    /// notification is gone or has no action.
    pub fn activate(&mut self, id: NotificationId) -> bool {
        let Some(action) = self.notification(id).and_then(|n| n.action.clone()) else {
            return false;
        };
        self.dismiss(id);

        match action.undo {
            UndoAction::RestoreSet { set_id, .. } if !self.festival.contains_set(&set_id) => {
                debug!("Ignoring undo for set '{set_id}' outside '{}'", self.festival.id);
                return false;
            }
            UndoAction::RestoreSet { set_id, band_name } => {
                if !self.store.is_planned(&set_id) {
                    self.mutate(|store| store.toggle_planned(&set_id).map(|_| ()));
                }
                self.notify(
                    NewNotification::new(band_name)
                        .with_title("Restored")
                        .with_variant(NotificationVariant::Success)
                        .with_duration_ms(RESTORED_MS),
                );
            }
            UndoAction::RestorePlan { mut snapshot } => {
                snapshot.retain(|id| self.festival.contains_set(id));
                if snapshot.is_empty() {
                    debug!("Ignoring plan undo with no sets in '{}'", self.festival.id);
                    return false;
                }
                self.mutate(|store| store.set_plan(snapshot));
                self.notify(
                    NewNotification::new("Your plan is back.")
                        .with_title("Restored")
                        .with_variant(NotificationVariant::Success)
                        .with_duration_ms(RESTORED_MS),
                );
            }
        }
        true
    }

    /// Fires every timer that is due. Returns the number fired.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((deadline, event)) = self.timers.pop_due(now) {
            fired += 1;
            match event {
                TimerEvent::Dismiss(id) => {
                    self.notifications.remove(id);
                }
                TimerEvent::ScrollTo(set_id) => {
                    debug!("Scrolling to set '{set_id}'");
                    self.jump_timers.clear();
                    self.scroll_signals.push(ScrollSignal {
                        target_set_id: set_id.clone(),
                        highlight_duration_ms: HIGHLIGHT_MS,
                    });
                    self.highlighted_set_id = Some(set_id.clone());
                    let clear_at = clock::after_ms(deadline, HIGHLIGHT_MS);
                    let timer = self
                        .timers
                        .schedule(clear_at, TimerEvent::ClearHighlight(set_id));
                    self.jump_timers.push(timer);
                }
                TimerEvent::ClearHighlight(set_id) => {
                    self.jump_timers.clear();
                    if self.highlighted_set_id.as_deref() == Some(set_id.as_str()) {
                        self.highlighted_set_id = None;
                    }
                }
            }
        }
        fired
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ------------------------------------------------------------------
    // Conflict jump and drawer
    // ------------------------------------------------------------------

    /// Closes the drawer, then after a short delay asks the view to scroll
    /// to the set and highlights it briefly. A newer jump supersedes a
    /// pending one.
    pub fn resolve_conflict(&mut self, set_id: &str) {
        if !self.festival.contains_set(set_id) {
            return;
        }
        self.drawer_open = false;
        self.cancel_jump();
        let deadline = clock::after_ms(self.clock.now(), SCROLL_DELAY_MS);
        let timer = self
            .timers
            .schedule(deadline, TimerEvent::ScrollTo(set_id.to_string()));
        self.jump_timers.push(timer);
    }

    fn cancel_jump(&mut self) {
        for timer in self.jump_timers.drain(..) {
            self.timers.cancel(timer);
        }
    }

    /// Scroll requests emitted since the last call.
    pub fn take_scroll_signals(&mut self) -> Vec<ScrollSignal> {
        std::mem::take(&mut self.scroll_signals)
    }

    pub fn highlighted_set_id(&self) -> Option<&str> {
        self.highlighted_set_id.as_deref()
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Selects a day. Unknown days are ignored; returns whether it changed.
    pub fn set_day(&mut self, day_id: &str) -> bool {
        if self.festival.day(day_id).is_none() || self.filters.day_id == day_id {
            return false;
        }
        self.filters.day_id = day_id.to_string();
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.filters.toggle_genre(genre);
    }

    pub fn toggle_favorites_only(&mut self) {
        self.filters.favorites_only = !self.filters.favorites_only;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.filters.view_mode = view_mode;
    }

    /// Replaces the filter selection in one go. The view mode is kept.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for a day the festival does not
    /// have; the filters are left unchanged.
    pub fn apply_query(&mut self, query: &LineupQuery) -> Result<()> {
        let day_id = match &query.day {
            Some(day) if self.festival.day(day).is_some() => day.clone(),
            Some(day) => {
                let known: Vec<&str> = self.festival.days.iter().map(|d| d.id.as_str()).collect();
                return Err(PlannerError::invalid_input("day").with_reason(format!(
                    "'{day}' is not a day of {} (expected one of: {})",
                    self.festival.name,
                    known.join(", ")
                )));
            }
            None => self.festival.first_day_id().unwrap_or_default().to_string(),
        };

        self.filters = Filters {
            day_id,
            search_query: query.search.clone().unwrap_or_default(),
            selected_genres: query.genres.iter().cloned().collect(),
            favorites_only: query.favorites_only,
            view_mode: self.filters.view_mode,
        };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Location and sharing
    // ------------------------------------------------------------------

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// A user edit of the URL for the current festival. The plan is not
    /// re-imported; the link is brought back in line with the plan instead.
    pub fn navigate(&mut self, location: Location) {
        self.location.navigate(location);
        self.export_to_link();
    }

    /// The link that reproduces the current plan.
    pub fn share_url(&self) -> String {
        self.location.to_string()
    }

    /// Copies the share link. When the clipboard refuses, the link is
    /// returned for manual copying instead of failing.
    pub fn copy_share_link(&mut self, clipboard: &mut dyn Clipboard) -> ShareOutcome {
        let url = self.share_url();
        match clipboard.copy(&url) {
            Ok(()) => {
                self.notify(
                    NewNotification::new("Share link copied to clipboard.")
                        .with_title("Link copied")
                        .with_variant(NotificationVariant::Success),
                );
                ShareOutcome::Copied(url)
            }
            Err(e) => {
                warn!("{e}; falling back to manual copy");
                self.notify(
                    NewNotification::new("Clipboard access was blocked. Copy the link manually.")
                        .with_title("Copy link")
                        .with_duration_ms(MANUAL_COPY_MS),
                );
                ShareOutcome::Manual(url)
            }
        }
    }

    /// How many times import-from-link has run for this session.
    pub fn import_count(&self) -> usize {
        self.imports
    }

    /// Sets taken from the plan link at the latest festival load; zero when
    /// the link was absent or matched nothing.
    pub fn imported_sets(&self) -> usize {
        self.imported_sets
    }

    // ------------------------------------------------------------------
    // View-models
    // ------------------------------------------------------------------

    pub fn festival(&self) -> &Festival {
        &self.festival
    }

    pub fn store(&self) -> &PlanStore<S> {
        &self.store
    }

    /// Every genre in the lineup, sorted.
    pub fn all_genres(&self) -> Vec<String> {
        collect_genres(&self.festival.sets)
    }

    /// Sets passing the current filters.
    pub fn visible_sets(&self) -> Vec<&FestivalSet> {
        apply_filters(&self.festival.sets, &self.filters, self.store.favorites())
    }

    /// Visible sets grouped under every stage, each sorted by start.
    pub fn sets_by_stage(&self) -> Vec<StageLineup<'_>> {
        let visible = self.visible_sets();
        self.festival
            .stages
            .iter()
            .map(|stage| {
                let mut sets: Vec<&FestivalSet> = visible
                    .iter()
                    .copied()
                    .filter(|s| s.stage_id == stage.id)
                    .collect();
                sets.sort_by_key(|s| s.start);
                StageLineup { stage, sets }
            })
            .collect()
    }

    /// Planned sets resolved against the lineup, sorted by start.
    pub fn planned_sets(&self) -> Vec<&FestivalSet> {
        let by_id: HashMap<&str, &FestivalSet> = self
            .festival
            .sets
            .iter()
            .map(|s| (s.id.as_str(), s))
            .collect();
        let mut sets: Vec<&FestivalSet> = self
            .store
            .planned_ids()
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();
        sets.sort_by_key(|s| s.start);
        sets
    }

    /// Planned sets grouped by festival day, in day order. Days without
    /// planned sets are omitted.
    pub fn plan_by_day(&self) -> Vec<DayPlan<'_>> {
        let planned = self.planned_sets();
        self.festival
            .days
            .iter()
            .map(|day| DayPlan {
                day,
                sets: planned
                    .iter()
                    .copied()
                    .filter(|s| s.day_id == day.id)
                    .collect(),
            })
            .filter(|d| !d.sets.is_empty())
            .collect()
    }

    /// Overlapping pairs among the planned sets.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let planned: Vec<FestivalSet> = self.planned_sets().into_iter().cloned().collect();
        compute_conflicts(&planned)
    }

    /// IDs of every set involved in at least one conflict.
    pub fn conflicting_ids(&self) -> HashSet<String> {
        self.conflicts()
            .into_iter()
            .flat_map(|c| [c.a.id, c.b.id])
            .collect()
    }

    fn band_name(&self, set_id: &str) -> String {
        self.festival
            .set(set_id)
            .map(|s| s.band_name.clone())
            .unwrap_or_else(|| "Set".to_string())
    }
}

/// "1 set" / "3 sets".
pub(crate) fn sets_phrase(count: usize) -> String {
    counted(count, "set", "sets")
}

/// "1 conflict" / "2 conflicts".
pub(crate) fn conflicts_phrase(count: usize) -> String {
    counted(count, "conflict", "conflicts")
}

fn counted(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
