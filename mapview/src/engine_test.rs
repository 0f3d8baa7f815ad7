#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::geo::LatLng;
use crate::marker::{IconAsset, ValueTier};

// =============================================================
// Helpers
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Cluster(ClusterOptions),
    Add(MarkerSpec),
    SetIcon(String, MarkerIcon),
    Clear,
    Fit(Bounds, f64),
    SetView(LatLng, f64),
    Destroy,
}

#[derive(Clone, Default)]
struct RecordingSurface {
    calls: Rc<RefCell<Vec<Call>>>,
    view: Option<MapViewState>,
}

impl RecordingSurface {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn reset(&self) {
        self.calls.borrow_mut().clear();
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }
}

impl MapSurface for RecordingSurface {
    fn cluster_markers(&mut self, options: ClusterOptions) {
        self.calls.borrow_mut().push(Call::Cluster(options));
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.calls.borrow_mut().push(Call::Add(marker.clone()));
    }

    fn set_marker_icon(&mut self, id: &str, icon: &MarkerIcon) {
        self.calls.borrow_mut().push(Call::SetIcon(id.to_owned(), icon.clone()));
    }

    fn clear_markers(&mut self) {
        self.calls.borrow_mut().push(Call::Clear);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: f64) {
        self.calls.borrow_mut().push(Call::Fit(bounds, padding_px));
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.calls.borrow_mut().push(Call::SetView(center, zoom));
    }

    fn view_state(&self) -> Option<MapViewState> {
        self.view
    }

    fn destroy(&mut self) {
        self.calls.borrow_mut().push(Call::Destroy);
    }
}

fn point(id: &str, lat: f64, lng: f64, value: f64) -> MarkerPoint {
    MarkerPoint { id: id.to_owned(), lat, lng, value }
}

fn sample_points() -> Vec<MarkerPoint> {
    vec![
        point("a", 40.7, -74.0, 6_000_000.0),
        point("b", 34.0, -118.2, 3_000_000.0),
        point("c", 41.9, -87.6, 1_000_000.0),
    ]
}

fn engine() -> (MapEngine<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::default();
    let recorder = surface.clone();
    let engine = MapEngine::new(surface, InitialView::default());
    recorder.reset();
    (engine, recorder)
}

fn is_fit(c: &Call) -> bool {
    matches!(c, Call::Fit(..))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_sets_initial_view_and_attaches_clusters() {
    let surface = RecordingSurface::default();
    let recorder = surface.clone();
    let _engine = MapEngine::new(surface, InitialView::default());
    assert_eq!(
        recorder.calls(),
        vec![
            Call::SetView(LatLng::new(37.0902, -95.7129), 4.0),
            Call::Cluster(ClusterOptions { max_cluster_radius_px: 50.0, chunked_loading: true }),
        ]
    );
}

// =============================================================
// Rebuild + refit
// =============================================================

#[test]
fn loading_suppresses_refit() {
    let (mut engine, recorder) = engine();
    let outcome = engine.set_properties(sample_points(), true);
    assert_eq!(outcome, RebuildOutcome { placed: 3, skipped: 0, refit: false });
    assert_eq!(recorder.count(is_fit), 0);
}

#[test]
fn settled_properties_refit_to_all_markers() {
    let (mut engine, recorder) = engine();
    let outcome = engine.set_properties(sample_points(), false);
    assert!(outcome.refit);
    let fits: Vec<Call> = recorder.calls().into_iter().filter(is_fit).collect();
    assert_eq!(
        fits,
        vec![Call::Fit(Bounds { south: 34.0, west: -118.2, north: 41.9, east: -74.0 }, 50.0)]
    );
}

#[test]
fn empty_list_clears_without_refit() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    recorder.reset();
    let outcome = engine.set_properties(Vec::new(), false);
    assert_eq!(outcome, RebuildOutcome::default());
    assert_eq!(recorder.calls(), vec![Call::Clear]);
    assert!(engine.markers().is_empty());
}

#[test]
fn rebuild_clears_before_adding() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), true);
    let calls = recorder.calls();
    assert_eq!(calls[0], Call::Clear);
    assert_eq!(recorder.count(|c| matches!(c, Call::Add(_))), 3);
}

#[test]
fn markers_are_tier_colored_dots() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), true);
    let icons: Vec<MarkerIcon> = recorder
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Add(spec) => Some(spec.icon),
            _ => None,
        })
        .collect();
    assert_eq!(
        icons,
        vec![
            MarkerIcon::dot(ValueTier::High),
            MarkerIcon::dot(ValueTier::Mid),
            MarkerIcon::dot(ValueTier::Low),
        ]
    );
}

#[test]
fn unplaceable_points_are_skipped() {
    let (mut engine, _probe) = engine();
    let mut points = sample_points();
    points.push(point("bad", f64::NAN, 0.0, 1.0));
    let outcome = engine.set_properties(points, false);
    assert_eq!(outcome.placed, 3);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(engine.markers().len(), 3);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn marker_click_selects_and_pins() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    recorder.reset();

    let selected = engine.handle_marker_click("b").map(|p| p.id.clone());
    assert_eq!(selected.as_deref(), Some("b"));
    assert_eq!(engine.selected_id(), Some("b"));
    assert_eq!(recorder.calls(), vec![Call::SetIcon("b".to_owned(), MarkerIcon::Image(IconAsset::pin()))]);
}

#[test]
fn switching_selection_restores_previous_dot() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("a");
    recorder.reset();

    engine.handle_marker_click("c");
    assert_eq!(
        recorder.calls(),
        vec![
            Call::SetIcon("a".to_owned(), MarkerIcon::dot(ValueTier::High)),
            Call::SetIcon("c".to_owned(), MarkerIcon::Image(IconAsset::pin())),
        ]
    );
    assert_eq!(engine.selected().map(|p| p.id.as_str()), Some("c"));
}

#[test]
fn clicking_selected_marker_again_is_stable() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("a");
    recorder.reset();
    assert!(engine.handle_marker_click("a").is_some());
    assert!(recorder.calls().is_empty());
}

#[test]
fn unknown_marker_click_keeps_selection() {
    let (mut engine, _probe) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("a");
    assert!(engine.handle_marker_click("zzz").is_none());
    assert_eq!(engine.selected_id(), Some("a"));
}

#[test]
fn clear_selection_deselects() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("a");
    recorder.reset();
    engine.clear_selection();
    assert!(engine.selected().is_none());
    assert_eq!(recorder.calls(), vec![Call::SetIcon("a".to_owned(), MarkerIcon::dot(ValueTier::High))]);
}

#[test]
fn selection_survives_rebuild_when_still_present() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("b");
    recorder.reset();
    engine.set_properties(sample_points(), false);
    assert_eq!(engine.selected_id(), Some("b"));
    let pinned = recorder.count(|c| matches!(c, Call::Add(spec) if spec.id == "b" && matches!(spec.icon, MarkerIcon::Image(_))));
    assert_eq!(pinned, 1);
}

#[test]
fn selection_dropped_when_property_disappears() {
    let (mut engine, _probe) = engine();
    engine.set_properties(sample_points(), false);
    engine.handle_marker_click("b");
    engine.set_properties(vec![point("a", 40.7, -74.0, 1.0)], false);
    assert!(engine.selected_id().is_none());
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn view_settled_reports_surface_viewport() {
    let state = MapViewState { center: (1.0, 2.0), zoom: 7.0, bounds: ((0.0, 1.0), (2.0, 3.0)) };
    let surface = RecordingSurface { view: Some(state), ..RecordingSurface::default() };
    let engine = MapEngine::new(surface, InitialView::default());
    assert_eq!(engine.handle_view_settled(), Some(state));
    assert_eq!(engine.snapshot(), Some(state));
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn destroy_is_idempotent_and_disables_engine() {
    let (mut engine, recorder) = engine();
    engine.set_properties(sample_points(), false);
    recorder.reset();
    engine.destroy();
    engine.destroy();
    assert_eq!(recorder.calls(), vec![Call::Destroy]);
    assert!(engine.is_destroyed());
    assert_eq!(engine.set_properties(sample_points(), false), RebuildOutcome::default());
    assert!(engine.handle_marker_click("a").is_none());
    assert!(engine.snapshot().is_none());
    assert_eq!(recorder.calls(), vec![Call::Destroy]);
}

#[test]
fn drop_destroys_surface() {
    let (engine, recorder) = engine();
    drop(engine);
    assert_eq!(recorder.calls(), vec![Call::Destroy]);
}
