//! Query service implementation
//!
//! Owns the store and the population source, and gates every read behind
//! the one-time startup sequence:
//!
//! ```text
//! Uninitialized --ensure_ready--> Ready
//! ```
//!
//! `Ready` is terminal. A failed `ensure_ready` leaves the service
//! `Uninitialized`, so the call can simply be repeated once the cause (a
//! missing spreadsheet, a locked database) is fixed.

use std::sync::{Mutex, OnceLock};

use crate::entry::{Entry, Language};
use crate::source::EntrySource;
use crate::storage::{DictionaryStats, DictionaryStore, PopulateOutcome};
use crate::{Error, Result};

/// Read interface for UI clients
pub struct QueryService {
    store: DictionaryStore,
    source: Box<dyn EntrySource>,
    startup: Mutex<()>,
    ready: OnceLock<PopulateOutcome>,
}

impl QueryService {
    /// Create a service over `store`, populating from `source` on first startup
    pub fn new(store: DictionaryStore, source: impl EntrySource + 'static) -> Self {
        Self {
            store,
            source: Box::new(source),
            startup: Mutex::new(()),
            ready: OnceLock::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get().is_some()
    }

    /// Create the schema and populate an empty table, once.
    ///
    /// Concurrent callers are serialized on the startup lock; the first one
    /// does the work and the rest observe its recorded outcome. Across
    /// processes the store's write transaction provides the same guarantee.
    pub fn ensure_ready(&self) -> Result<PopulateOutcome> {
        if let Some(outcome) = self.ready.get() {
            return Ok(outcome.clone());
        }

        // Holding () only, so a poisoned lock carries no broken state
        let _guard = self.startup.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(outcome) = self.ready.get() {
            return Ok(outcome.clone());
        }

        self.store.ensure_schema()?;
        let outcome = self.store.populate_if_empty(&*self.source)?;
        tracing::info!("Dictionary ready: {:?}", outcome);

        Ok(self.ready.get_or_init(|| outcome).clone())
    }

    /// Search the column selected by `language` for `query`.
    ///
    /// `language` must be exactly one of `Amharic`, `OromLatin`, `OromSaba`
    /// or `English`. An empty query, or any other selector, yields an empty
    /// result rather than an error.
    pub fn search(&self, language: &str, query: &str) -> Result<Vec<Entry>> {
        self.require_ready()?;
        match Language::from_selector(language) {
            Some(language) => self.search_in(language, query),
            None => {
                tracing::debug!("Unrecognized language selector {:?}", language);
                Ok(Vec::new())
            }
        }
    }

    /// Case-insensitive substring search on one language column
    pub fn search_in(&self, language: Language, query: &str) -> Result<Vec<Entry>> {
        self.require_ready()?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.store.search_column(language, &query.to_lowercase())?;
        tracing::debug!("Search {} for {:?}: {} results", language, query, results.len());
        Ok(results)
    }

    /// One entry picked with uniform probability, or `None` if the dictionary is empty
    pub fn random_entry(&self) -> Result<Option<Entry>> {
        self.require_ready()?;
        self.store.random_entry()
    }

    pub fn stats(&self) -> Result<DictionaryStats> {
        self.require_ready()?;
        self.store.stats()
    }

    fn require_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(Error::NotReady)
        }
    }
}
