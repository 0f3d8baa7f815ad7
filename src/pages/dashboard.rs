//! Dashboard page: filter sidebar plus property map.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the committed `FilterState`. Each change starts a fetch tagged with a
//! sequence number from `PropertiesState`; responses for superseded fetches
//! are dropped. The filter panel and the map both read the committed value;
//! the map additionally receives the fetched list as-is and the loading flag.

use leptos::prelude::*;
use mapview::geo::MapViewState;

use crate::components::filter_panel::FilterPanel;
use crate::components::property_map::PropertyMap;
use crate::components::skeletons::PropertyListSkeleton;
use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::state::filters::FilterState;
use crate::state::properties::PropertiesState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let api = expect_context::<StoredValue<ApiClient, LocalStorage>>();
    let filters = RwSignal::new(FilterState::default());
    let properties = RwSignal::new(PropertiesState::default());
    let view_state = RwSignal::new(None::<MapViewState>);

    Effect::new(move || {
        let current = filters.get();
        let Some(seq) = properties.try_update(PropertiesState::begin) else {
            return;
        };
        log::debug!("dashboard: fetch #{seq} with {} active filters", current.active_count());

        #[cfg(feature = "csr")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                let result = client.fetch_properties(&current).await.map_err(|e| e.to_string());
                properties.try_update(|state| state.finish(seq, result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = api;
        }
    });

    let visible = Memo::new(move |_| properties.with(|state| state.items.clone()));
    let loading = Signal::derive(move || properties.with(|state| state.loading));
    let error = Signal::derive(move || properties.with(|state| state.error.clone()));

    let on_filters_change = Callback::new(move |next: FilterState| filters.set(next));
    let on_view_state_change = Callback::new(move |state: MapViewState| view_state.set(Some(state)));

    view! {
        <div class="dashboard">
            <aside class="dashboard__sidebar">
                <FilterPanel filters=filters on_filters_change=on_filters_change loading=loading/>

                <Show when=move || loading.get() && visible.with(Vec::is_empty)>
                    <PropertyListSkeleton/>
                </Show>

                {move || error.get().map(|message| view! { <p class="dashboard__error">{message}</p> })}

                <p class="dashboard__viewport">
                    {move || {
                        view_state
                            .get()
                            .map(|state| format!("Zoom {:.0} at {:.3}, {:.3}", state.zoom, state.center.0, state.center.1))
                    }}
                </p>
            </aside>

            <main class="dashboard__map">
                <PropertyMap
                    properties=visible
                    loading=loading
                    filters=filters
                    map_token=config.mapbox_token.clone()
                    on_view_state_change=on_view_state_change
                />
            </main>
        </div>
    }
}
