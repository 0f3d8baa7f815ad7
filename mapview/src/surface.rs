//! Capability interface over the map rendering library.
//!
//! [`crate::engine::MapEngine`] drives a surface through this trait only, so
//! the marker, selection and refit rules run unchanged against Leaflet in the
//! browser and against a recording fake in tests.

use crate::geo::{Bounds, LatLng, MapViewState};
use crate::marker::{MarkerIcon, MarkerSpec};

/// Options for the library-side cluster layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    pub max_cluster_radius_px: f64,
    pub chunked_loading: bool,
}

/// Rendering operations the map engine needs.
pub trait MapSurface {
    /// Attach the cluster layer. Markers added afterwards are clustered and
    /// styled with [`crate::cluster::ClusterStyle::for_values`].
    fn cluster_markers(&mut self, options: ClusterOptions);

    fn add_marker(&mut self, marker: &MarkerSpec);

    /// Replace the icon of an existing marker, keeping its position.
    fn set_marker_icon(&mut self, id: &str, icon: &MarkerIcon);

    fn clear_markers(&mut self);

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: f64);

    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Current viewport, or `None` once the surface is gone.
    fn view_state(&self) -> Option<MapViewState>;

    /// Release the map and every listener registered on it.
    fn destroy(&mut self);
}
