//! Map engine for the WealthMap property dashboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! marker lifecycle for the property map: turning property points into value
//! tinted markers, styling clusters from their members, tracking the selected
//! property, and deciding when the viewport is refit. The Leptos host only
//! wires map events into the engine and publishes the resulting view state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::MapEngine`] state machine over a [`surface::MapSurface`] |
//! | [`surface`] | Capability trait for the rendering library |
//! | [`leaflet`] | `wasm-bindgen` surface backed by Leaflet + markercluster |
//! | [`geo`] | Coordinates, bounds and the [`geo::MapViewState`] snapshot |
//! | [`marker`] | Value tiers, marker points and icon specs |
//! | [`cluster`] | Cluster styling from member count and average value |
//! | [`consts`] | Thresholds, palette and pixel sizes |

pub mod cluster;
pub mod consts;
pub mod engine;
pub mod geo;
pub mod leaflet;
pub mod marker;
pub mod surface;
