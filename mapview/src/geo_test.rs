#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn bounds_from_points_empty_is_none() {
    assert!(Bounds::from_points(Vec::<LatLng>::new()).is_none());
}

#[test]
fn bounds_from_single_point_is_degenerate() {
    let b = Bounds::from_points([LatLng::new(40.0, -74.0)]).unwrap();
    assert_eq!(b, Bounds { south: 40.0, west: -74.0, north: 40.0, east: -74.0 });
}

#[test]
fn bounds_from_points_covers_all() {
    let points = [LatLng::new(40.7, -74.0), LatLng::new(34.0, -118.2), LatLng::new(41.9, -87.6)];
    let b = Bounds::from_points(points).unwrap();
    assert_eq!(b.south, 34.0);
    assert_eq!(b.north, 41.9);
    assert_eq!(b.west, -118.2);
    assert_eq!(b.east, -74.0);
    for p in points {
        assert!(b.contains(p));
    }
    assert!(!b.contains(LatLng::new(50.0, -90.0)));
}

#[test]
fn bounds_center_is_midpoint() {
    let b = Bounds { south: 10.0, west: 20.0, north: 30.0, east: 40.0 };
    assert_eq!(b.center(), LatLng::new(20.0, 30.0));
}

#[test]
fn map_view_state_serializes_as_nested_arrays() {
    let state = MapViewState::new(
        LatLng::new(37.0, -95.0),
        4.0,
        Bounds { south: 30.0, west: -100.0, north: 44.0, east: -90.0 },
    );
    let json = serde_json::to_value(state).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "center": [37.0, -95.0],
            "zoom": 4.0,
            "bounds": [[30.0, -100.0], [44.0, -90.0]],
        })
    );
    let back: MapViewState = serde_json::from_value(json).unwrap();
    assert_eq!(back.bounds(), state.bounds());
    assert_eq!(back.center(), state.center());
}

#[test]
fn map_view_state_validity_rejects_inverted_bounds() {
    let good = MapViewState { center: (1.0, 2.0), zoom: 3.0, bounds: ((0.0, 0.0), (5.0, 5.0)) };
    assert!(good.is_valid());
    let inverted = MapViewState { bounds: ((5.0, 0.0), (0.0, 5.0)), ..good };
    assert!(!inverted.is_valid());
    let nan = MapViewState { zoom: f64::NAN, ..good };
    assert!(!nan.is_valid());
    let off_globe = MapViewState { center: (123.0, 2.0), ..good };
    assert!(!off_globe.is_valid());
}

#[test]
fn initial_view_defaults_to_continental_us() {
    let view = InitialView::default();
    assert_eq!(view.center, LatLng::new(37.0902, -95.7129));
    assert_eq!(view.zoom, 4.0);
}
