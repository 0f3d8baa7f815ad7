use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CENTER, DEFAULT_ZOOM};

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Degenerate bounds covering a single point.
    #[must_use]
    pub fn around(point: LatLng) -> Self {
        Self { south: point.lat, west: point.lng, north: point.lat, east: point.lng }
    }

    /// Smallest bounds containing every point, or `None` for an empty set.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::around(first), |mut acc, p| {
            acc.extend(p);
            acc
        }))
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south && point.lat <= self.north && point.lng >= self.west && point.lng <= self.east
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng { lat: (self.south + self.north) / 2.0, lng: (self.west + self.east) / 2.0 }
    }
}

/// Snapshot of the map viewport reported to the host.
///
/// Serialized as `{ center: [lat, lng], zoom, bounds: [[south, west], [north, east]] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewState {
    pub center: (f64, f64),
    pub zoom: f64,
    pub bounds: ((f64, f64), (f64, f64)),
}

impl MapViewState {
    #[must_use]
    pub fn new(center: LatLng, zoom: f64, bounds: Bounds) -> Self {
        Self {
            center: (center.lat, center.lng),
            zoom,
            bounds: ((bounds.south, bounds.west), (bounds.north, bounds.east)),
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center.0, self.center.1)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let ((south, west), (north, east)) = self.bounds;
        Bounds { south, west, north, east }
    }

    /// True when every coordinate is finite, the center latitude is on the
    /// globe and the bounds are not inverted. Longitudes may exceed ±180 when
    /// the view wraps.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let ((south, west), (north, east)) = self.bounds;
        [self.center.0, self.center.1, self.zoom, south, west, north, east]
            .iter()
            .all(|v| v.is_finite())
            && (-90.0..=90.0).contains(&self.center.0)
            && south <= north
            && west <= east
    }
}

/// Where the map starts when nothing has been saved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        Self { center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1), zoom: DEFAULT_ZOOM }
    }
}

impl From<MapViewState> for InitialView {
    fn from(state: MapViewState) -> Self {
        Self { center: state.center(), zoom: state.zoom }
    }
}
