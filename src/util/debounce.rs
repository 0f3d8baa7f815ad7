//! Cancellable trailing-edge debounce, modelled without timers.
//!
//! The caller owns the actual timer (a `gloo_timers` timeout in the browser).
//! Each [`Debouncer::schedule`] returns a ticket; when the timer elapses the
//! caller hands the ticket back to [`Debouncer::fire`], which yields the
//! pending value only if that ticket is still the latest one. Superseded and
//! cancelled tickets fire as no-ops, so stale timers never commit.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// Quiet period before a debounced search commits.
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Handle for one scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    next_ticket: u64,
    pending: Option<(DebounceTicket, T)>,
    disposed: bool,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { next_ticket: 0, pending: None, disposed: false }
    }

    /// Replace any pending value. Returns `None` once disposed.
    pub fn schedule(&mut self, value: T) -> Option<DebounceTicket> {
        if self.disposed {
            return None;
        }
        self.next_ticket += 1;
        let ticket = DebounceTicket(self.next_ticket);
        self.pending = Some((ticket, value));
        Some(ticket)
    }

    /// Take the pending value if `ticket` is the live one.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        match self.pending.take() {
            Some((live, value)) if live == ticket => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Cancel and refuse every later schedule.
    pub fn dispose(&mut self) {
        self.cancel();
        self.disposed = true;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
