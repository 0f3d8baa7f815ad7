//! Filter panel model: draft editing, debounced search and presets.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel edits a draft `FilterState` seeded from the committed value.
//! Edits stay local until Apply (or the debounced search) emits the draft.
//! Presets are a JSON list persisted under [`SAVED_FILTERS_KEY`]. Entries are
//! decoded one by one: a malformed entry is skipped when listing and kept
//! untouched when the list is rewritten.
//!
//! The model owns no timers. `set_search_query` returns a ticket the view
//! arms a timer for; `fire_search` with that ticket yields the commit only if
//! no later keystroke superseded it and the panel has not been disposed.

#[cfg(test)]
#[path = "filter_panel_test.rs"]
mod filter_panel_test;

use serde_json::Value;
use uuid::Uuid;

use super::filters::{FilterState, RangeField, SavedFilterEntry, parse_property_type};
use crate::util::debounce::{DebounceTicket, Debouncer};
use crate::util::storage::{KeyValueStore, StorageError, load_json, save_json};

/// Local storage key of the preset list.
pub const SAVED_FILTERS_KEY: &str = "savedFilters";

/// Preset persistence failures. Reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("saved filter list is unreadable and was left untouched: {0}")]
    Corrupt(String),

    #[error("could not save filter set: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for PresetError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Parse { reason, .. } => Self::Corrupt(reason),
            other => Self::Storage(other),
        }
    }
}

/// Decode every well-formed entry of a raw preset list.
fn decode_presets(raw: &[Value]) -> Vec<SavedFilterEntry> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<SavedFilterEntry>(value.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("filters: skipping malformed preset #{index}: {e}");
                None
            }
        })
        .collect()
}

/// `"Filter Set N"` with N = list length + 1, bumped until unused.
pub fn next_preset_name(existing: &[SavedFilterEntry]) -> String {
    let mut n = existing.len() + 1;
    loop {
        let name = format!("Filter Set {n}");
        if !existing.iter().any(|e| e.name == name) {
            return name;
        }
        n += 1;
    }
}

#[derive(Debug)]
pub struct FilterPanelModel {
    draft: FilterState,
    presets: Vec<SavedFilterEntry>,
    search: Debouncer<String>,
}

impl FilterPanelModel {
    /// Seed the draft and read the persisted preset list.
    ///
    /// A value that is not a JSON array is logged and shown as empty.
    pub fn new(committed: FilterState, store: &dyn KeyValueStore) -> Self {
        let presets = match load_json::<Vec<Value>>(store, SAVED_FILTERS_KEY) {
            Ok(raw) => decode_presets(&raw.unwrap_or_default()),
            Err(e) => {
                log::warn!("filters: could not load presets: {e}");
                Vec::new()
            }
        };
        Self { draft: committed, presets, search: Debouncer::new() }
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    pub fn presets(&self) -> &[SavedFilterEntry] {
        &self.presets
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    // --- Draft edits ---

    /// Update the search text now and schedule its commit.
    ///
    /// Returns the ticket to fire after the debounce delay, or `None` once
    /// the panel has been disposed.
    pub fn set_search_query(&mut self, text: &str) -> Option<DebounceTicket> {
        if self.search.is_disposed() {
            return None;
        }
        self.draft.search_query = normalize_search(text);
        self.search.schedule(text.to_owned())
    }

    /// Commit the debounced search if `ticket` is still live.
    pub fn fire_search(&mut self, ticket: DebounceTicket) -> Option<FilterState> {
        let text = self.search.fire(ticket)?;
        self.draft.search_query = normalize_search(&text);
        Some(self.draft.clone())
    }

    /// Set the type from a selector value; `"all"` clears it.
    pub fn set_property_type(&mut self, raw: &str) {
        self.draft.property_type = parse_property_type(raw);
    }

    pub fn set_range(&mut self, field: RangeField, range: Option<(f64, f64)>) {
        field.set(&mut self.draft, range);
    }

    pub fn set_range_min(&mut self, field: RangeField, min: f64) {
        let range = field.with_min(field.get(&self.draft), min);
        field.set(&mut self.draft, Some(range));
    }

    pub fn set_range_max(&mut self, field: RangeField, max: f64) {
        let range = field.with_max(field.get(&self.draft), max);
        field.set(&mut self.draft, Some(range));
    }

    // --- Commits ---

    /// Emit the full draft. A pending search commit is folded in.
    pub fn apply(&mut self) -> FilterState {
        self.search.cancel();
        self.draft.clone()
    }

    /// Clear every constraint and emit the empty state.
    pub fn reset(&mut self) -> FilterState {
        self.search.cancel();
        self.draft = FilterState::default();
        self.draft.clone()
    }

    // --- Presets ---

    /// Append the draft to the persisted list and return its generated name.
    ///
    /// The list is re-read first so entries written by another tab survive;
    /// malformed entries are written back as they were.
    ///
    /// # Errors
    ///
    /// Fails without writing when the stored value is not a JSON array or
    /// storage rejects the write.
    pub fn save_preset(&mut self, store: &dyn KeyValueStore, timestamp: String) -> Result<String, PresetError> {
        let mut raw: Vec<Value> = load_json(store, SAVED_FILTERS_KEY)?.unwrap_or_default();
        let mut presets = decode_presets(&raw);
        let name = next_preset_name(&presets);
        let entry = SavedFilterEntry {
            id: Some(Uuid::new_v4()),
            name: name.clone(),
            filters: self.draft.clone(),
            timestamp,
        };
        raw.push(serde_json::to_value(&entry).map_err(|e| StorageError::Serialize(e.to_string()))?);
        save_json(store, SAVED_FILTERS_KEY, &raw)?;
        log::info!("filters: saved preset '{name}' ({} stored)", raw.len());
        presets.push(entry);
        self.presets = presets;
        Ok(name)
    }

    /// Replace the draft with the named preset and emit it.
    ///
    /// Unknown names are a no-op.
    pub fn load_preset(&mut self, name: &str) -> Option<FilterState> {
        let entry = self.presets.iter().find(|e| e.name == name)?;
        self.draft = entry.filters.clone();
        self.search.cancel();
        Some(self.draft.clone())
    }

    /// Cancel any pending search commit and ignore later ones.
    pub fn dispose(&mut self) {
        self.search.dispose();
    }
}

/// Blank or whitespace-only search text means no search.
fn normalize_search(text: &str) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text.to_owned()) }
}
