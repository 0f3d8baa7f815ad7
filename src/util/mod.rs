//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! navigation, clocks) from page and component logic so the latter stay
//! testable on the host target.

pub mod clock;
pub mod debounce;
pub mod format;
pub mod navigate;
pub mod notify;
pub mod storage;
