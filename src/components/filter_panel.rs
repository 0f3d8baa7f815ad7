//! Filter panel view over [`FilterPanelModel`].
//!
//! ARCHITECTURE
//! ============
//! The model lives in a local `StoredValue`; `draft` and `presets` signals are
//! mirrored from it after each operation so the view re-renders. The debounce
//! timer is a `gloo_timers` timeout kept alongside the model: replacing it
//! cancels the previous one, and the model's ticket check drops any commit
//! that raced the replacement. Unmount disposes both.

use leptos::prelude::*;

use crate::components::range_slider::RangeSlider;
use crate::state::filter_panel::FilterPanelModel;
use crate::state::filters::{ALL_TYPES, FilterState, PROPERTY_TYPES, RangeField, SavedFilterEntry};
use crate::state::toast::ToastState;
use crate::util::clock::now_iso8601;
use crate::util::notify::Notifier;
use crate::util::storage::BrowserStorage;

#[cfg(feature = "csr")]
use crate::util::debounce::SEARCH_DEBOUNCE_MS;
#[cfg(feature = "csr")]
use gloo_timers::callback::Timeout;

/// Search, type, range and preset controls.
///
/// Edits stay in the panel's draft until Apply, a debounced search commit,
/// Reset or a preset load emits through `on_filters_change`.
#[component]
pub fn FilterPanel(
    #[prop(into)] filters: Signal<FilterState>,
    on_filters_change: Callback<FilterState>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let model = StoredValue::new_local(FilterPanelModel::new(filters.get_untracked(), &BrowserStorage));
    let draft = RwSignal::new(model.with_value(|m| m.draft().clone()));
    let presets = RwSignal::new(model.with_value(|m| m.presets().to_vec()));
    let expanded = RwSignal::new(true);

    #[cfg(feature = "csr")]
    let search_timer = StoredValue::new_local(None::<Timeout>);

    let sync = move || {
        let (next_draft, next_presets) = model.with_value(|m| (m.draft().clone(), m.presets().to_vec()));
        draft.set(next_draft);
        presets.set(next_presets);
    };

    let emit = move |next: Option<FilterState>| {
        sync();
        if let Some(next) = next {
            on_filters_change.run(next);
        }
    };

    let on_search = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        let ticket = model.try_update_value(|m| m.set_search_query(&text)).flatten();
        sync();
        #[cfg(feature = "csr")]
        if let Some(ticket) = ticket {
            let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                emit(model.try_update_value(|m| m.fire_search(ticket)).flatten());
            });
            search_timer.set_value(Some(timer));
        }
        #[cfg(not(feature = "csr"))]
        let _ = ticket;
    };

    let on_type = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        model.update_value(|m| m.set_property_type(&raw));
        sync();
    };

    let on_apply = move |_| emit(model.try_update_value(FilterPanelModel::apply));
    let on_reset = move |_| emit(model.try_update_value(FilterPanelModel::reset));

    let on_save = move |_| {
        let timestamp = now_iso8601();
        match model.try_update_value(|m| m.save_preset(&BrowserStorage, timestamp)) {
            Some(Ok(_)) => {
                sync();
                toasts.success("Filter set saved successfully!");
            }
            Some(Err(e)) => {
                log::warn!("filters: preset not saved: {e}");
                toasts.error("Could not save filter set");
            }
            None => {}
        }
    };

    let on_preset = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        if let Some(next) = model.try_update_value(|m| m.load_preset(&name)).flatten() {
            emit(Some(next));
            toasts.success("Filter loaded successfully!");
        }
    };

    on_cleanup(move || {
        model.try_update_value(FilterPanelModel::dispose);
        #[cfg(feature = "csr")]
        search_timer.try_update_value(|t| *t = None);
    });

    let range_row = move |field: RangeField| {
        view! {
            <RangeSlider
                field=field
                value=Signal::derive(move || draft.with(|d| field.effective(d)))
                label=Signal::derive(move || draft.with(|d| field.display(d)))
                on_min=Callback::new(move |v: f64| {
                    model.update_value(|m| m.set_range_min(field, v));
                    sync();
                })
                on_max=Callback::new(move |v: f64| {
                    model.update_value(|m| m.set_range_max(field, v));
                    sync();
                })
            />
        }
    };

    view! {
        <section class="filter-panel">
            <header class="filter-panel__header" on:click=move |_| expanded.update(|e| *e = !*e)>
                <h2 class="filter-panel__title">"Search & Filters"</h2>
                <span class="filter-panel__chevron">{move || if expanded.get() { "▲" } else { "▼" }}</span>
            </header>

            <Show when=move || expanded.get()>
                <div class="filter-panel__body">
                    <input
                        class="filter-panel__search"
                        type="search"
                        placeholder="Search by address or owner name"
                        prop:value=move || draft.with(|d| d.search_query.clone().unwrap_or_default())
                        on:input=on_search
                    />

                    <Show when=move || presets.with(|p| !p.is_empty())>
                        <label class="filter-panel__label">
                            "Saved Filters"
                            <select class="filter-panel__select" prop:value="" on:change=on_preset>
                                <option value="" disabled=true>"Load saved filter"</option>
                                {move || presets.get().into_iter().map(preset_option).collect_view()}
                            </select>
                        </label>
                    </Show>

                    <label class="filter-panel__label">
                        "Property Type"
                        <select
                            class="filter-panel__select"
                            prop:value=move || draft.with(|d| d.property_type.clone().unwrap_or_else(|| ALL_TYPES.to_owned()))
                            on:change=on_type
                        >
                            <option value=ALL_TYPES>"All Types"</option>
                            {PROPERTY_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                        </select>
                    </label>

                    {RangeField::ALL.into_iter().map(range_row).collect_view()}

                    <div class="filter-panel__actions">
                        <button class="btn btn--primary" disabled=move || loading.get() on:click=on_apply>
                            "Apply Filters"
                        </button>
                        <button class="btn btn--outline" disabled=move || loading.get() on:click=on_reset>
                            "Reset"
                        </button>
                        <button class="btn btn--secondary" disabled=move || loading.get() on:click=on_save>
                            "Save"
                        </button>
                    </div>
                </div>
            </Show>
        </section>
    }
}

fn preset_option(entry: SavedFilterEntry) -> impl IntoView {
    let label = entry.label();
    view! { <option value=entry.name>{label}</option> }
}
