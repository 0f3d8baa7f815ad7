//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toaster::Toaster;
use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::pages::dashboard::DashboardPage;
use crate::state::toast::ToastState;

/// Root application component.
///
/// Provides the validated config, the toast stack and the API client, and
/// sets up client-side routing.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    let api = StoredValue::new_local(ApiClient::browser(&config, toasts));

    provide_context(toasts);
    provide_context(api);
    provide_context(config);

    view! {
        <Stylesheet id="app" href="/style.css"/>
        <Title text="WealthMap"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>

        <Toaster/>
    }
}

/// Replaces the app when configuration is invalid; nothing else initializes.
#[component]
pub fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="config-error" role="alert">
            <h1>"Invalid environment configuration"</h1>
            <p>{message}</p>
        </div>
    }
}
