//! Static registry of festival lineups keyed by festival ID.

use crate::{
    error::{PlannerError, Result},
    models::{Festival, FestivalMeta},
};

const ANTIHERO_FEST: &str = include_str!("../../assets/lineups/antihero-fest.json");
const DOOM_VALLEY: &str = include_str!("../../assets/lineups/doom-valley.json");

#[derive(Clone)]
struct CatalogEntry {
    meta: FestivalMeta,
    document: String,
}

/// Festival lineups available to the planner.
///
/// Documents are stored unparsed and validated on every [`Catalog::load`], so
/// a broken entry only fails the festival that uses it.
#[derive(Default, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog with no festivals.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The festivals that ship with the planner.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.register(
            FestivalMeta {
                id: "antihero-fest-2026".to_string(),
                name: "Antihero Fest".to_string(),
                location: Some("Kansas City".to_string()),
                dates: Some("Jul 17–18, 2026".to_string()),
            },
            ANTIHERO_FEST,
        );
        catalog.register(
            FestivalMeta {
                id: "doom-valley-2026".to_string(),
                name: "Doom Valley".to_string(),
                location: Some("Chicago".to_string()),
                dates: Some("Aug 22–23, 2026".to_string()),
            },
            DOOM_VALLEY,
        );
        catalog
    }

    /// Adds or replaces the document registered under `meta.id`.
    pub fn register(&mut self, meta: FestivalMeta, document: impl Into<String>) {
        let document = document.into();
        match self.entries.iter_mut().find(|e| e.meta.id == meta.id) {
            Some(entry) => {
                entry.meta = meta;
                entry.document = document;
            }
            None => self.entries.push(CatalogEntry { meta, document }),
        }
    }

    /// Validates a document and registers it under its own festival ID and
    /// name.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Validation` if the document is malformed.
    pub fn register_document(&mut self, document: impl Into<String>) -> Result<FestivalMeta> {
        let document = document.into();
        let festival = super::parse_document(&document)?;
        let meta = FestivalMeta {
            id: festival.id,
            name: festival.name,
            location: None,
            dates: None,
        };
        self.register(meta.clone(), document);
        Ok(meta)
    }

    /// Metadata for every registered festival, in registration order.
    pub fn festivals(&self) -> impl Iterator<Item = &FestivalMeta> {
        self.entries.iter().map(|e| &e.meta)
    }

    pub fn meta(&self, id: &str) -> Option<&FestivalMeta> {
        self.festivals().find(|m| m.id == id)
    }

    /// Loads and validates the lineup for a festival.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FestivalNotFound` for an unknown ID and
    /// `PlannerError::Validation` for a malformed document.
    pub fn load(&self, id: &str) -> Result<Festival> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.meta.id == id)
            .ok_or_else(|| PlannerError::FestivalNotFound { id: id.to_string() })?;
        super::parse_document(&entry.document)
    }
}
