//! Details card for the selected property.

use leptos::prelude::*;

use crate::net::types::Property;
use crate::util::format::{format_currency, format_number};

const NOT_AVAILABLE: &str = "N/A";

/// Read-only details of `property` with a close button.
#[component]
pub fn PropertyDetails(property: Property, on_close: Callback<()>) -> impl IntoView {
    let title = property.display_title().to_owned();
    let rows = [
        ("Value", format_currency(property.value)),
        ("Type", property.property_type.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned())),
        ("Size", property.size.map_or_else(|| NOT_AVAILABLE.to_owned(), |s| format!("{} sq ft", format_number(s)))),
        ("Owner", property.owner_name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned())),
        ("Owner Net Worth", property.owner_net_worth.map_or_else(|| NOT_AVAILABLE.to_owned(), format_currency)),
        ("Location", format!("{:.5}, {:.5}", property.latitude, property.longitude)),
    ];

    view! {
        <div class="property-details">
            <header class="property-details__header">
                <h2 class="property-details__title">{title}</h2>
                <button class="btn btn--ghost" title="Close" on:click=move |_| on_close.run(())>
                    "×"
                </button>
            </header>
            <dl class="property-details__rows">
                {rows
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        }
                    })
                    .collect_view()}
            </dl>
        </div>
    }
}
