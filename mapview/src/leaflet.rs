//! [`MapSurface`] backed by Leaflet and `leaflet.markercluster`.
//!
//! The host page loads both libraries (global `L`). Every JS call that can
//! throw is caught and logged; a failed marker or icon update never takes the
//! map down.

use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, HtmlImageElement};

use crate::cluster::ClusterStyle;
use crate::consts::PLACEHOLDER_ICON_URL;
use crate::geo::{Bounds, LatLng, MapViewState};
use crate::marker::{IconAsset, MarkerIcon, MarkerSpec};
use crate::surface::{ClusterOptions, MapSurface};

#[wasm_bindgen]
extern "C" {
    type LeafletMap;
    type LeafletLatLng;
    type LeafletBounds;
    type LeafletLayer;
    type ClusterGroup;
    type LeafletMarker;
    type MarkerCluster;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &HtmlElement, options: &Object) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = fitBounds)]
    fn fit_bounds(this: &LeafletMap, bounds: &Array, options: &Object) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &LeafletMap) -> LeafletLatLng;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &LeafletMap) -> f64;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &LeafletMap) -> LeafletBounds;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LeafletMap, layer: &ClusterGroup);

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &LeafletMap, control: &JsValue);

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &LeafletMap, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = off)]
    fn off(this: &LeafletMap, event: &str);

    #[wasm_bindgen(method, js_name = remove)]
    fn remove(this: &LeafletMap);

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LeafletLatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LeafletLatLng) -> f64;

    #[wasm_bindgen(method, js_name = getSouth)]
    fn get_south(this: &LeafletBounds) -> f64;

    #[wasm_bindgen(method, js_name = getWest)]
    fn get_west(this: &LeafletBounds) -> f64;

    #[wasm_bindgen(method, js_name = getNorth)]
    fn get_north(this: &LeafletBounds) -> f64;

    #[wasm_bindgen(method, js_name = getEast)]
    fn get_east(this: &LeafletBounds) -> f64;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &Object) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LeafletLayer, map: &LeafletMap);

    #[wasm_bindgen(catch, js_namespace = ["L", "control"], js_name = zoom)]
    fn zoom_control(options: &Object) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = markerClusterGroup)]
    fn marker_cluster_group(options: &Object) -> Result<ClusterGroup, JsValue>;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_marker_layer(this: &ClusterGroup, marker: &LeafletMarker);

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &ClusterGroup);

    #[wasm_bindgen(method, js_name = getAllChildMarkers)]
    fn get_all_child_markers(this: &MarkerCluster) -> Array;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn create_marker(position: &Array, options: &Object) -> Result<LeafletMarker, JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on_marker(this: &LeafletMarker, event: &str, handler: &Function);

    #[wasm_bindgen(catch, method, js_name = setIcon)]
    fn set_icon(this: &LeafletMarker, icon: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    fn div_icon(options: &Object) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = icon)]
    fn image_icon(options: &Object) -> Result<JsValue, JsValue>;
}

/// Raster tile endpoint for the base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl TileSource {
    /// Mapbox streets raster tiles for the given access token.
    #[must_use]
    pub fn mapbox(access_token: &str) -> Self {
        Self {
            url_template: format!(
                "https://api.mapbox.com/styles/v1/mapbox/streets-v12/tiles/512/{{z}}/{{x}}/{{y}}?access_token={access_token}"
            ),
            attribution: "&copy; <a href=\"https://www.mapbox.com/about/maps/\">Mapbox</a> &copy; \
                          <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_owned(),
        }
    }
}

/// Host callbacks for map events. They run inside Leaflet event dispatch, so
/// they must not call back into the surface synchronously.
#[derive(Clone)]
pub struct SurfaceHandlers {
    pub on_marker_click: Rc<dyn Fn(String)>,
    pub on_map_click: Rc<dyn Fn()>,
    pub on_move_end: Rc<dyn Fn()>,
}

/// A live Leaflet map bound to a container element.
pub struct LeafletSurface {
    map: Option<LeafletMap>,
    cluster_group: Option<ClusterGroup>,
    markers: HashMap<String, LeafletMarker>,
    handlers: SurfaceHandlers,
    marker_closures: Vec<Closure<dyn FnMut()>>,
    map_closures: Vec<Closure<dyn FnMut()>>,
    icon_create: Option<Closure<dyn FnMut(MarkerCluster) -> JsValue>>,
    icon_error: Option<Closure<dyn FnMut(Event)>>,
}

impl LeafletSurface {
    /// Create the map inside `container` with the base tiles, zoom control and
    /// event listeners installed.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if Leaflet is missing or rejects the options.
    pub fn create(container: &HtmlElement, tiles: &TileSource, handlers: SurfaceHandlers) -> Result<Self, JsValue> {
        let map = create_map(container, &options(&[("zoomControl", JsValue::FALSE)])?)?;

        let tile_options = options(&[
            ("attribution", JsValue::from_str(&tiles.attribution)),
            ("className", JsValue::from_str("map-tiles")),
            ("errorTileUrl", JsValue::from_str(PLACEHOLDER_ICON_URL)),
            ("tileSize", JsValue::from_f64(512.0)),
            ("zoomOffset", JsValue::from_f64(-1.0)),
        ])?;
        tile_layer(&tiles.url_template, &tile_options)?.add_to(&map);
        map.add_control(&zoom_control(&options(&[("position", JsValue::from_str("bottomright"))])?)?);

        let mut surface = Self {
            map: Some(map),
            cluster_group: None,
            markers: HashMap::new(),
            handlers,
            marker_closures: Vec::new(),
            map_closures: Vec::new(),
            icon_create: None,
            icon_error: None,
        };
        surface.install_map_listeners();
        surface.install_icon_fallback()?;
        Ok(surface)
    }

    fn install_map_listeners(&mut self) {
        let Some(map) = self.map.as_ref() else {
            return;
        };

        let on_move_end = Rc::clone(&self.handlers.on_move_end);
        let move_end = Closure::<dyn FnMut()>::new(move || on_move_end());
        map.on("moveend", move_end.as_ref().unchecked_ref());

        let on_map_click = Rc::clone(&self.handlers.on_map_click);
        let click = Closure::<dyn FnMut()>::new(move || on_map_click());
        map.on("click", click.as_ref().unchecked_ref());

        self.map_closures.push(move_end);
        self.map_closures.push(click);
    }

    /// Swap marker images that fail to load for a same-size placeholder.
    fn install_icon_fallback(&mut self) -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(());
        };
        let fallback = IconAsset::pin().fallback();
        let on_error = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(img) = target.dyn_ref::<HtmlImageElement>() else {
                return;
            };
            if !img.class_list().contains("leaflet-marker-icon") || img.src().ends_with(&fallback.url) {
                return;
            }
            img.set_src(&fallback.url);
            let style = img.style();
            for (prop, px) in [("width", fallback.width), ("height", fallback.height)] {
                if let Err(err) = style.set_property(prop, &format!("{px}px")) {
                    log::warn!("leaflet: placeholder {prop} not applied: {err:?}");
                }
            }
        });
        document.add_event_listener_with_callback_and_bool("error", on_error.as_ref().unchecked_ref(), true)?;
        self.icon_error = Some(on_error);
        Ok(())
    }

    fn try_cluster_markers(&mut self, options_in: ClusterOptions) -> Result<(), JsValue> {
        let Some(map) = self.map.as_ref() else {
            return Ok(());
        };
        let icon_create = Closure::<dyn FnMut(MarkerCluster) -> JsValue>::new(|cluster: MarkerCluster| {
            let values: Vec<f64> = cluster.get_all_child_markers().iter().map(|m| marker_value(&m)).collect();
            let count = values.len();
            let Some(style) = ClusterStyle::for_values(&values) else {
                return JsValue::NULL;
            };
            match cluster_icon(&style, count) {
                Ok(icon) => icon,
                Err(err) => {
                    log::warn!("leaflet: cluster icon failed: {err:?}");
                    JsValue::NULL
                }
            }
        });
        let group = marker_cluster_group(&options(&[
            ("chunkedLoading", JsValue::from_bool(options_in.chunked_loading)),
            ("maxClusterRadius", JsValue::from_f64(options_in.max_cluster_radius_px)),
            ("iconCreateFunction", icon_create.as_ref().clone()),
        ])?)?;
        map.add_layer(&group);
        self.cluster_group = Some(group);
        self.icon_create = Some(icon_create);
        Ok(())
    }

    fn try_add_marker(&mut self, spec: &MarkerSpec) -> Result<(), JsValue> {
        let Some(group) = self.cluster_group.as_ref() else {
            return Ok(());
        };
        let marker = create_marker(
            &pair(spec.position.lat, spec.position.lng),
            &options(&[("icon", build_icon(&spec.icon)?), ("value", JsValue::from_f64(spec.value))])?,
        )?;

        let on_marker_click = Rc::clone(&self.handlers.on_marker_click);
        let id = spec.id.clone();
        let click = Closure::<dyn FnMut()>::new(move || on_marker_click(id.clone()));
        marker.on_marker("click", click.as_ref().unchecked_ref());

        group.add_marker_layer(&marker);
        self.marker_closures.push(click);
        self.markers.insert(spec.id.clone(), marker);
        Ok(())
    }

    fn try_fit_bounds(&self, bounds: Bounds, padding_px: f64) -> Result<(), JsValue> {
        let Some(map) = self.map.as_ref() else {
            return Ok(());
        };
        let corners = Array::of2(&pair(bounds.south, bounds.west), &pair(bounds.north, bounds.east));
        map.fit_bounds(&corners, &options(&[("padding", pair(padding_px, padding_px).into())])?)
    }

    fn remove_icon_fallback(&mut self) {
        let Some(on_error) = self.icon_error.take() else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Err(err) =
            document.remove_event_listener_with_callback_and_bool("error", on_error.as_ref().unchecked_ref(), true)
        {
            log::warn!("leaflet: icon error listener not removed: {err:?}");
        }
    }
}

impl MapSurface for LeafletSurface {
    fn cluster_markers(&mut self, options: ClusterOptions) {
        if let Err(err) = self.try_cluster_markers(options) {
            log::error!("leaflet: cluster layer unavailable: {err:?}");
        }
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        if let Err(err) = self.try_add_marker(marker) {
            log::warn!("leaflet: marker {} not added: {err:?}", marker.id);
        }
    }

    fn set_marker_icon(&mut self, id: &str, icon: &MarkerIcon) {
        let Some(marker) = self.markers.get(id) else {
            return;
        };
        if let Err(err) = build_icon(icon).and_then(|icon| marker.set_icon(&icon)) {
            log::warn!("leaflet: icon for marker {id} not updated: {err:?}");
        }
    }

    fn clear_markers(&mut self) {
        if let Some(group) = self.cluster_group.as_ref() {
            group.clear_layers();
        }
        self.markers.clear();
        self.marker_closures.clear();
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: f64) {
        if let Err(err) = self.try_fit_bounds(bounds, padding_px) {
            log::warn!("leaflet: fitBounds failed: {err:?}");
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        let Some(map) = self.map.as_ref() else {
            return;
        };
        if let Err(err) = map.set_view(&pair(center.lat, center.lng), zoom) {
            log::warn!("leaflet: setView failed: {err:?}");
        }
    }

    fn view_state(&self) -> Option<MapViewState> {
        let map = self.map.as_ref()?;
        let center = map.get_center();
        let bounds = map.get_bounds();
        Some(MapViewState::new(
            LatLng::new(center.lat(), center.lng()),
            map.get_zoom(),
            Bounds {
                south: bounds.get_south(),
                west: bounds.get_west(),
                north: bounds.get_north(),
                east: bounds.get_east(),
            },
        ))
    }

    fn destroy(&mut self) {
        self.remove_icon_fallback();
        self.clear_markers();
        if let Some(map) = self.map.take() {
            map.off("moveend");
            map.off("click");
            map.remove();
        }
        self.cluster_group = None;
        self.map_closures.clear();
        self.icon_create = None;
    }
}

// ── JS helpers ──────────────────────────────────────────────────

fn options(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj)
}

fn pair(a: f64, b: f64) -> Array {
    Array::of2(&JsValue::from_f64(a), &JsValue::from_f64(b))
}

fn build_icon(icon: &MarkerIcon) -> Result<JsValue, JsValue> {
    match icon {
        MarkerIcon::Dot { size, .. } => {
            let html = icon.html().unwrap_or_default();
            div_icon(&options(&[
                ("className", JsValue::from_str("custom-marker")),
                ("html", JsValue::from_str(&html)),
                ("iconSize", pair(*size, *size).into()),
                ("iconAnchor", pair(size / 2.0, size / 2.0).into()),
            ])?)
        }
        MarkerIcon::Image(asset) => {
            let mut entries = vec![
                ("iconUrl", JsValue::from_str(&asset.url)),
                ("iconSize", pair(asset.width, asset.height).into()),
                ("iconAnchor", pair(asset.anchor_x, asset.anchor_y).into()),
                ("popupAnchor", pair(1.0, -34.0).into()),
                ("className", JsValue::from_str("custom-marker-icon")),
            ];
            if let Some(shadow) = asset.shadow_url.as_deref() {
                entries.push(("shadowUrl", JsValue::from_str(shadow)));
                entries.push(("shadowSize", pair(41.0, 41.0).into()));
                entries.push(("shadowAnchor", pair(20.0, 41.0).into()));
            }
            image_icon(&options(&entries)?)
        }
    }
}

fn cluster_icon(style: &ClusterStyle, count: usize) -> Result<JsValue, JsValue> {
    div_icon(&options(&[
        ("className", JsValue::from_str("property-cluster")),
        ("html", JsValue::from_str(&style.html(count))),
        ("iconSize", pair(style.size, style.size).into()),
    ])?)
}

/// The `value` option stored on a marker at creation, or 0.
fn marker_value(marker: &JsValue) -> f64 {
    let value = Reflect::get(marker, &JsValue::from_str("options"))
        .and_then(|opts| Reflect::get(&opts, &JsValue::from_str("value")));
    match value {
        Ok(v) => v.as_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    }
}

#[cfg(test)]
#[path = "leaflet_test.rs"]
mod leaflet_test;
