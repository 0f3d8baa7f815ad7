//! Application state modules.
//!
//! DESIGN
//! ======
//! Each module is a plain struct (or pure model) with no reactive types, so it
//! can be unit-tested on the host. Components wrap them in `RwSignal`s or
//! `StoredValue`s and provide them via context.

pub mod filter_panel;
pub mod filters;
pub mod map_view;
pub mod properties;
pub mod toast;
