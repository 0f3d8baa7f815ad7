use crate::consts::{FIT_PADDING_PX, MAX_CLUSTER_RADIUS_PX};
use crate::geo::{Bounds, InitialView, MapViewState};
use crate::marker::{MarkerIcon, MarkerPoint, MarkerSpec};
use crate::surface::{ClusterOptions, MapSurface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// What a marker rebuild did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RebuildOutcome {
    /// Markers handed to the surface.
    pub placed: usize,
    /// Points dropped for unusable coordinates.
    pub skipped: usize,
    /// Whether the viewport was refit to the new markers.
    pub refit: bool,
}

/// Marker, selection and viewport logic for the property map.
///
/// Owns its surface exclusively for its lifetime; dropping the engine destroys
/// the surface.
pub struct MapEngine<S: MapSurface> {
    surface: S,
    markers: Vec<MarkerPoint>,
    selected: Option<String>,
    destroyed: bool,
}

impl<S: MapSurface> MapEngine<S> {
    /// Take ownership of a freshly created surface, position it and attach
    /// the cluster layer.
    pub fn new(mut surface: S, initial: InitialView) -> Self {
        surface.set_view(initial.center, initial.zoom);
        surface.cluster_markers(ClusterOptions { max_cluster_radius_px: MAX_CLUSTER_RADIUS_PX, chunked_loading: true });
        Self { surface, markers: Vec::new(), selected: None, destroyed: false }
    }

    // --- Data inputs ---

    /// Replace every marker with one per placeable point.
    ///
    /// The viewport is refit to the new markers only when there is at least
    /// one and `loading` is false, so in-flight fetches don't move the map.
    pub fn set_properties(&mut self, points: Vec<MarkerPoint>, loading: bool) -> RebuildOutcome {
        if self.destroyed {
            return RebuildOutcome::default();
        }

        self.surface.clear_markers();

        let total = points.len();
        let placeable: Vec<MarkerPoint> = points.into_iter().filter(MarkerPoint::is_placeable).collect();
        let skipped = total - placeable.len();
        if skipped > 0 {
            log::warn!("map: skipped {skipped} properties with unusable coordinates");
        }

        let keep_selection = self.selected.as_deref().is_some_and(|id| placeable.iter().any(|p| p.id == id));
        if !keep_selection {
            self.selected = None;
        }

        for point in &placeable {
            let selected = self.selected.as_deref() == Some(point.id.as_str());
            self.surface.add_marker(&MarkerSpec::for_point(point, selected));
        }

        let mut refit = false;
        if !loading {
            if let Some(bounds) = Bounds::from_points(placeable.iter().map(MarkerPoint::position)) {
                self.surface.fit_bounds(bounds, FIT_PADDING_PX);
                refit = true;
            }
        }

        let placed = placeable.len();
        self.markers = placeable;
        log::debug!("map: rebuilt {placed} markers (loading={loading}, refit={refit})");
        RebuildOutcome { placed, skipped, refit }
    }

    // --- Selection ---

    /// Select the clicked marker's property. Unknown ids leave the selection
    /// unchanged.
    pub fn handle_marker_click(&mut self, id: &str) -> Option<&MarkerPoint> {
        if self.destroyed {
            return None;
        }
        let index = self.markers.iter().position(|p| p.id == id)?;
        if self.selected.as_deref() != Some(id) {
            self.restore_selected_icon();
            let point = &self.markers[index];
            self.surface.set_marker_icon(&point.id, &MarkerSpec::for_point(point, true).icon);
            self.selected = Some(point.id.clone());
        }
        self.markers.get(index)
    }

    /// Drop the current selection, if any.
    pub fn clear_selection(&mut self) {
        if self.destroyed {
            return;
        }
        self.restore_selected_icon();
        self.selected = None;
    }

    fn restore_selected_icon(&mut self) {
        let Some(id) = self.selected.as_deref() else {
            return;
        };
        if let Some(point) = self.markers.iter().find(|p| p.id == id) {
            self.surface.set_marker_icon(&point.id, &MarkerIcon::dot(point.tier()));
        }
    }

    // --- Viewport ---

    /// Viewport snapshot to publish after a pan or zoom settles.
    #[must_use]
    pub fn handle_view_settled(&self) -> Option<MapViewState> {
        self.snapshot()
    }

    /// Current viewport, used by "save current view".
    #[must_use]
    pub fn snapshot(&self) -> Option<MapViewState> {
        if self.destroyed {
            return None;
        }
        self.surface.view_state()
    }

    // --- Queries ---

    #[must_use]
    pub fn selected(&self) -> Option<&MarkerPoint> {
        let id = self.selected.as_deref()?;
        self.markers.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerPoint] {
        &self.markers
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // --- Teardown ---

    /// Tear down the surface. Idempotent; every later call is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.markers.clear();
        self.selected = None;
        self.surface.destroy();
    }
}

impl<S: MapSurface> Drop for MapEngine<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
