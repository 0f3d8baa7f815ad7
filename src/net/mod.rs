//! Networking modules for the property API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the request/response model and the transport seam, `api`
//! layers auth, refresh-and-retry and error notification on top, and `types`
//! defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
