//! Bridge component between Leptos props and the imperative `mapview` engine.
//!
//! ARCHITECTURE
//! ============
//! The engine (and the Leaflet surface it owns) lives in a local
//! `StoredValue`. Leaflet callbacks fire inside Leaflet's own dispatch, which
//! can run synchronously from an engine call (`fitBounds` emits `moveend`), so
//! the handlers only bump signals; effects pick those up afterwards and call
//! into the engine. Unmount destroys the engine, which removes the map and
//! every listener it registered.

#[cfg(test)]
#[path = "property_map_test.rs"]
mod property_map_test;

use leptos::html::Div;
use leptos::prelude::*;
use mapview::geo::MapViewState;

use crate::components::property_details::PropertyDetails;
use crate::net::types::Property;
use crate::state::filters::FilterState;
use crate::state::map_view::save_map_view;
use crate::state::toast::ToastState;
use crate::util::notify::Notifier;
use crate::util::storage::BrowserStorage;

#[cfg(feature = "csr")]
use crate::state::map_view::load_initial_view;
#[cfg(feature = "csr")]
use mapview::engine::MapEngine;
#[cfg(feature = "csr")]
use mapview::leaflet::{LeafletSurface, SurfaceHandlers, TileSource};
#[cfg(feature = "csr")]
use mapview::marker::MarkerPoint;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
type EngineSlot = StoredValue<Option<MapEngine<LeafletSurface>>, LocalStorage>;

/// `"3 active filters"` style overlay text.
pub(crate) fn active_filters_label(count: usize) -> String {
    match count {
        0 => "No filters".to_owned(),
        1 => "1 active filter".to_owned(),
        n => format!("{n} active filters"),
    }
}

/// `"12 properties"` style overlay text.
pub(crate) fn property_count_label(count: usize) -> String {
    if count == 1 { "1 property".to_owned() } else { format!("{count} properties") }
}

/// Copyable handle used by button handlers.
#[derive(Clone, Copy)]
struct MapHandle {
    #[cfg(feature = "csr")]
    engine: EngineSlot,
}

impl MapHandle {
    fn snapshot(self) -> Option<MapViewState> {
        #[cfg(feature = "csr")]
        {
            self.engine.try_with_value(|slot| slot.as_ref().and_then(MapEngine::snapshot)).flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn clear_selection(self) {
        #[cfg(feature = "csr")]
        self.engine.try_update_value(|slot| {
            if let Some(engine) = slot.as_mut() {
                engine.clear_selection();
            }
        });
    }
}

/// Property map with clustering, selection details and view persistence.
#[component]
pub fn PropertyMap(
    #[prop(into)] properties: Signal<Vec<Property>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] filters: Signal<FilterState>,
    /// Tile provider access token.
    map_token: String,
    #[prop(optional)] on_view_state_change: Option<Callback<MapViewState>>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let container = NodeRef::<Div>::new();
    let selected = RwSignal::new(None::<Property>);

    #[cfg(feature = "csr")]
    let handle = mount_engine(container, properties, loading, selected, map_token, on_view_state_change);
    #[cfg(not(feature = "csr"))]
    let handle = {
        let _ = (map_token, on_view_state_change);
        MapHandle {}
    };

    let on_save_view = move |_| {
        let Some(state) = handle.snapshot() else {
            toasts.error("Map is not ready yet");
            return;
        };
        match save_map_view(&BrowserStorage, &state) {
            Ok(()) => {
                log::info!("map: saved view at zoom {}", state.zoom);
                toasts.success("Map view saved successfully!");
            }
            Err(e) => {
                log::warn!("map: view not saved: {e}");
                toasts.error("Could not save map view");
            }
        }
    };

    let on_close = Callback::new(move |()| {
        selected.set(None);
        handle.clear_selection();
    });

    view! {
        <div class="property-map">
            <aside class="property-map__details">
                {move || {
                    selected.get().map(|property| view! { <PropertyDetails property=property on_close=on_close/> })
                }}
            </aside>

            <div class="property-map__canvas" node_ref=container></div>

            <Show when=move || loading.get()>
                <div class="property-map__loading">
                    <span class="property-map__loading-text">"Loading properties..."</span>
                </div>
            </Show>

            <div class="property-map__overlay">
                <span>{move || property_count_label(properties.with(Vec::len))}</span>
                <span>{move || active_filters_label(filters.with(FilterState::active_count))}</span>
            </div>

            <div class="property-map__controls">
                <button class="btn btn--secondary" on:click=on_save_view>
                    "Save Current View"
                </button>
            </div>
        </div>
    }
}

#[cfg(feature = "csr")]
fn mount_engine(
    container: NodeRef<Div>,
    properties: Signal<Vec<Property>>,
    loading: Signal<bool>,
    selected: RwSignal<Option<Property>>,
    map_token: String,
    on_view_state_change: Option<Callback<MapViewState>>,
) -> MapHandle {
    let engine: EngineSlot = StoredValue::new_local(None);
    let ready = RwSignal::new(false);
    let marker_clicked = RwSignal::new(None::<String>);
    let map_clicked = RwSignal::new(0_u64);
    let view_settled = RwSignal::new(0_u64);

    let find_property =
        move |id: &str| properties.with_untracked(|list| list.iter().find(|p| p.id == id).cloned());

    // Create the map once the container is attached.
    Effect::new(move || {
        let Some(div) = container.get() else {
            return;
        };
        if engine.with_value(Option::is_some) {
            return;
        }
        let handlers = SurfaceHandlers {
            on_marker_click: Rc::new(move |id| marker_clicked.set(Some(id))),
            on_map_click: Rc::new(move || map_clicked.update(|n| *n += 1)),
            on_move_end: Rc::new(move || view_settled.update(|n| *n += 1)),
        };
        match LeafletSurface::create(&div, &TileSource::mapbox(&map_token), handlers) {
            Ok(surface) => {
                let initial = load_initial_view(&BrowserStorage);
                engine.set_value(Some(MapEngine::new(surface, initial)));
                ready.set(true);
                log::info!("map: created at zoom {}", initial.zoom);
            }
            Err(err) => log::error!("map: could not create map: {err:?}"),
        }
    });

    // Rebuild markers whenever the list or loading flag changes.
    Effect::new(move || {
        let points: Vec<MarkerPoint> = properties.with(|list| list.iter().map(MarkerPoint::from).collect());
        let is_loading = loading.get();
        if !ready.get() {
            return;
        }
        let kept = engine
            .try_update_value(|slot| {
                slot.as_mut().and_then(|e| {
                    e.set_properties(points, is_loading);
                    e.selected_id().map(str::to_owned)
                })
            })
            .flatten();
        match kept {
            Some(id) => selected.set(find_property(&id)),
            None => {
                if selected.with_untracked(Option::is_some) {
                    selected.set(None);
                }
            }
        }
    });

    Effect::new(move || {
        let Some(id) = marker_clicked.get() else {
            return;
        };
        let hit = engine
            .try_update_value(|slot| slot.as_mut().and_then(|e| e.handle_marker_click(&id)).map(|p| p.id.clone()))
            .flatten();
        if let Some(id) = hit {
            selected.set(find_property(&id));
        }
    });

    Effect::new(move || {
        if map_clicked.get() == 0 {
            return;
        }
        engine.try_update_value(|slot| {
            if let Some(e) = slot.as_mut() {
                e.clear_selection();
            }
        });
        selected.set(None);
    });

    Effect::new(move || {
        if view_settled.get() == 0 {
            return;
        }
        let Some(state) = engine.try_with_value(|slot| slot.as_ref().and_then(MapEngine::handle_view_settled)).flatten()
        else {
            return;
        };
        log::debug!("map: view settled at zoom {}", state.zoom);
        if let Some(callback) = on_view_state_change {
            callback.run(state);
        }
    });

    on_cleanup(move || {
        engine.try_update_value(|slot| {
            if let Some(mut e) = slot.take() {
                e.destroy();
            }
        });
    });

    MapHandle { engine }
}
