//! Saved map viewport persistence.

#[cfg(test)]
#[path = "map_view_test.rs"]
mod map_view_test;

use mapview::geo::{InitialView, MapViewState};

use crate::util::storage::{KeyValueStore, StorageError, load_json, save_json};

/// Local storage key of the saved viewport.
pub const SAVED_MAP_VIEW_KEY: &str = "savedMapView";

/// Viewport to open the map with: the saved one when readable and valid,
/// otherwise the default continental-US view.
pub fn load_initial_view(store: &dyn KeyValueStore) -> InitialView {
    match load_json::<MapViewState>(store, SAVED_MAP_VIEW_KEY) {
        Ok(Some(state)) if state.is_valid() => InitialView::from(state),
        Ok(Some(_)) => {
            log::warn!("map: ignoring saved view with invalid coordinates");
            InitialView::default()
        }
        Ok(None) => InitialView::default(),
        Err(e) => {
            log::warn!("map: saved view unreadable: {e}");
            InitialView::default()
        }
    }
}

/// Persist `state` as the viewport for the next mount.
///
/// # Errors
///
/// Storage or serialization failure.
pub fn save_map_view(store: &dyn KeyValueStore, state: &MapViewState) -> Result<(), StorageError> {
    save_json(store, SAVED_MAP_VIEW_KEY, state)
}
