//! UI components for the dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render state from context/props and translate DOM events into
//! model operations. Business rules live in `state` and the `mapview` crate.

pub mod filter_panel;
pub mod property_details;
pub mod property_map;
pub mod range_slider;
pub mod skeletons;
pub mod toaster;
