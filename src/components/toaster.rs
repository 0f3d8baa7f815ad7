//! Toast stack rendered above the app.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState};
#[cfg(feature = "csr")]
use crate::state::toast::TOAST_TTL_MS;

/// Renders every toast in `RwSignal<ToastState>` context.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast/> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let id = toast.id;

    #[cfg(feature = "csr")]
    gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
        toasts.try_update(|state| state.dismiss(id));
    })
    .forget();

    view! {
        <div class=toast.kind.class() role="status" on:click=move |_| toasts.update(|state| state.dismiss(id))>
            {toast.message}
        </div>
    }
}
