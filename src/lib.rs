//! # wealthmap
//!
//! Leptos + WASM frontend for the WealthMap property dashboard.
//!
//! This crate contains the dashboard page, the filter and map components,
//! application state, the authenticated HTTP client, and build-time
//! configuration. It drives the `mapview` crate's engine through the
//! `PropertyMap` host component.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: validate configuration, then mount the app.
///
/// An invalid configuration aborts initialization; only the error screen is
/// mounted and no client, storage or map is touched.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    match config::AppConfig::from_build_env() {
        Ok(config) => {
            log::info!("wealthmap starting (api: {})", config.api_url);
            leptos::mount::mount_to_body(move || view! { <app::App config=config/> });
        }
        Err(err) => {
            log::error!("invalid environment configuration: {err}");
            let message = err.to_string();
            leptos::mount::mount_to_body(move || view! { <app::ConfigErrorScreen message=message/> });
        }
    }
}
