//! Fetched property list with stale-response protection.
//!
//! Every fetch takes a sequence number from [`PropertiesState::begin`]; a
//! result is accepted only if no newer fetch started since, so a slow early
//! response can never overwrite newer results.

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;

use crate::net::types::Property;

#[derive(Clone, Debug, Default)]
pub struct PropertiesState {
    pub items: Vec<Property>,
    pub loading: bool,
    pub error: Option<String>,
    request_seq: u64,
}

impl PropertiesState {
    /// Start a fetch and return its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.request_seq += 1;
        self.loading = true;
        self.error = None;
        self.request_seq
    }

    /// Record a fetch result. Returns `false` when `seq` is stale and the
    /// result was dropped.
    pub fn finish(&mut self, seq: u64, result: Result<Vec<Property>, String>) -> bool {
        if seq != self.request_seq {
            log::debug!("properties: dropping stale response #{seq} (latest #{})", self.request_seq);
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
        true
    }
}
