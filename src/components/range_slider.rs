//! Two-thumb range control for one numeric filter.

use leptos::prelude::*;

use crate::state::filters::{Range, RangeField};

/// Label, current range text and a min/max pair of range inputs.
///
/// Unparseable input events are ignored.
#[component]
pub fn RangeSlider(
    field: RangeField,
    #[prop(into)] value: Signal<Range>,
    #[prop(into)] label: Signal<String>,
    on_min: Callback<f64>,
    on_max: Callback<f64>,
) -> impl IntoView {
    let (lo, hi) = field.bounds();
    let step = field.step();

    view! {
        <div class="range-slider">
            <div class="range-slider__header">
                <span class="range-slider__title">{field.title()}</span>
                <span class="range-slider__value">{move || label.get()}</span>
            </div>
            <input
                class="range-slider__thumb range-slider__thumb--min"
                type="range"
                min=lo
                max=hi
                step=step
                prop:value=move || value.get().0
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                        on_min.run(v);
                    }
                }
            />
            <input
                class="range-slider__thumb range-slider__thumb--max"
                type="range"
                min=lo
                max=hi
                step=step
                prop:value=move || value.get().1
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                        on_max.run(v);
                    }
                }
            />
        </div>
    }
}
