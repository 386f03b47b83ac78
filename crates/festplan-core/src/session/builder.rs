//! Builder for opening planner sessions.

use super::{clock::SystemClock, Clock, Location, PlannerSession};
use crate::{db::Storage, error::Result, lineup::Catalog};

/// Base URL used when no location is supplied.
pub const DEFAULT_BASE_URL: &str = "https://festplan.app";

/// Collects the collaborators of a [`PlannerSession`].
///
/// ```
/// use festplan_core::{db::MemoryStorage, lineup::Catalog, session::PlannerSession};
///
/// let session = PlannerSession::builder(Catalog::builtin(), MemoryStorage::new())
///     .open("doom-valley-2026")
///     .unwrap();
/// assert_eq!(session.festival().name, "Doom Valley");
/// ```
pub struct SessionBuilder<S: Storage> {
    catalog: Catalog,
    storage: S,
    clock: Option<Box<dyn Clock>>,
    location: Option<Location>,
    base_url: String,
}

impl<S: Storage> SessionBuilder<S> {
    pub fn new(catalog: Catalog, storage: S) -> Self {
        Self {
            catalog,
            storage,
            clock: None,
            location: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Replaces the wall clock, e.g. with a [`super::ManualClock`] in tests.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Starts from an existing page location, typically one carrying a
    /// shared `plan` value.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Base URL used to build the festival page location when none is given.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Loads the festival and opens the session on it.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FestivalNotFound` or `PlannerError::Validation`
    /// if the lineup cannot be loaded, and `PlannerError::InvalidInput` if
    /// the base URL does not parse.
    pub fn open(self, festival_id: &str) -> Result<PlannerSession<S>> {
        let location = match self.location {
            Some(location) => location,
            None => Location::for_festival(&self.base_url, festival_id)?,
        };
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        PlannerSession::open(self.catalog, festival_id, self.storage, location, clock)
    }
}
