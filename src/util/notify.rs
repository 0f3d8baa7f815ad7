//! User-facing notification capability.
//!
//! Non-UI code (the HTTP pipeline, preset persistence) reports outcomes through
//! [`Notifier`]; the app wires it to the toast stack.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }
}

impl Notifier for RwSignal<ToastState> {
    fn notify(&self, kind: ToastKind, message: &str) {
        self.update(|state| {
            state.push(kind, message);
        });
    }
}
