//! Per-festival plan store: planned and favorited set IDs, persisted on every
//! change.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{db::Storage, error::Result, models::PlannerState};

/// Namespace for persisted planner state keys.
pub const STORAGE_PREFIX: &str = "festplan.planner.v1";

/// Storage key for a festival's planner state: `<prefix>:<festivalId>`.
pub fn storage_key(festival_id: &str) -> String {
    format!("{STORAGE_PREFIX}:{festival_id}")
}

/// Owns the planner state for one festival.
///
/// Opening a store hydrates it from storage; every mutation writes the full
/// state back under the festival's key. If a write fails the in-memory change
/// is kept and the error returned, so the next successful write catches
/// storage up.
pub struct PlanStore<S: Storage> {
    festival_id: String,
    key: String,
    state: PlannerState,
    planned: HashSet<String>,
    favorites: HashSet<String>,
    storage: S,
}

impl<S: Storage> PlanStore<S> {
    /// Opens the store for `festival_id`. Missing, unreadable or malformed
    /// stored state yields empty collections.
    pub fn open(festival_id: &str, storage: S) -> Self {
        let mut store = Self {
            festival_id: String::new(),
            key: String::new(),
            state: PlannerState::default(),
            planned: HashSet::new(),
            favorites: HashSet::new(),
            storage,
        };
        store.reopen(festival_id);
        store
    }

    /// Re-targets the store at another festival and hydrates from its key.
    /// Nothing is written.
    pub fn reopen(&mut self, festival_id: &str) {
        let key = storage_key(festival_id);
        let state = match self.storage.read(&key) {
            Ok(Some(raw)) => PlannerState::from_stored(&raw).unwrap_or_else(|| {
                warn!("Ignoring malformed planner state under '{key}'");
                PlannerState::default()
            }),
            Ok(None) => PlannerState::default(),
            Err(e) => {
                warn!("Could not read planner state under '{key}': {e}");
                PlannerState::default()
            }
        };
        debug!(
            "Opened plan store '{key}' with {} planned, {} favorites",
            state.planned_set_ids.len(),
            state.favorite_set_ids.len()
        );

        self.planned = state.planned_set_ids.iter().cloned().collect();
        self.favorites = state.favorite_set_ids.iter().cloned().collect();
        self.festival_id = festival_id.to_string();
        self.key = key;
        self.state = state;
    }

    /// Closes the store, handing back its storage.
    pub fn close(self) -> S {
        self.storage
    }

    pub fn festival_id(&self) -> &str {
        &self.festival_id
    }

    /// Planned IDs in insertion order.
    pub fn planned_ids(&self) -> &[String] {
        &self.state.planned_set_ids
    }

    /// Favorite IDs in insertion order.
    pub fn favorite_ids(&self) -> &[String] {
        &self.state.favorite_set_ids
    }

    pub fn planned(&self) -> &HashSet<String> {
        &self.planned
    }

    pub fn favorites(&self) -> &HashSet<String> {
        &self.favorites
    }

    pub fn is_planned(&self, set_id: &str) -> bool {
        self.planned.contains(set_id)
    }

    pub fn is_favorite(&self, set_id: &str) -> bool {
        self.favorites.contains(set_id)
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds the ID to the plan if absent, removes it if present. Returns
    /// whether the set is planned afterwards.
    pub fn toggle_planned(&mut self, set_id: &str) -> Result<bool> {
        let now_planned = toggle(&mut self.state.planned_set_ids, &mut self.planned, set_id);
        self.persist()?;
        Ok(now_planned)
    }

    /// Same as [`PlanStore::toggle_planned`] for favorites.
    pub fn toggle_favorite(&mut self, set_id: &str) -> Result<bool> {
        let now_favorite =
            toggle(&mut self.state.favorite_set_ids, &mut self.favorites, set_id);
        self.persist()?;
        Ok(now_favorite)
    }

    /// Empties the plan. Favorites are untouched.
    pub fn clear_plan(&mut self) -> Result<()> {
        self.state.planned_set_ids.clear();
        self.planned.clear();
        self.persist()
    }

    /// Replaces the whole plan. Duplicates keep their first position.
    pub fn set_plan<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut planned = HashSet::new();
        let mut ordered = Vec::new();
        for id in ids {
            let id = id.into();
            if planned.insert(id.clone()) {
                ordered.push(id);
            }
        }
        self.state.planned_set_ids = ordered;
        self.planned = planned;
        self.persist()
    }

    /// Drops planned and favorite IDs rejected by `known`. Writes only when
    /// something was removed; returns the number of IDs dropped.
    pub fn retain_known<F>(&mut self, known: F) -> Result<usize>
    where
        F: Fn(&str) -> bool,
    {
        let before = self.state.planned_set_ids.len() + self.state.favorite_set_ids.len();
        self.state.planned_set_ids.retain(|id| known(id));
        self.state.favorite_set_ids.retain(|id| known(id));
        let removed =
            before - self.state.planned_set_ids.len() - self.state.favorite_set_ids.len();
        if removed == 0 {
            return Ok(0);
        }

        self.planned = self.state.planned_set_ids.iter().cloned().collect();
        self.favorites = self.state.favorite_set_ids.iter().cloned().collect();
        self.persist()?;
        Ok(removed)
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.state)?;
        self.storage.write(&self.key, &payload)
    }
}

fn toggle(ids: &mut Vec<String>, members: &mut HashSet<String>, set_id: &str) -> bool {
    if members.remove(set_id) {
        ids.retain(|id| id != set_id);
        false
    } else {
        members.insert(set_id.to_string());
        ids.push(set_id.to_string());
        true
    }
}
