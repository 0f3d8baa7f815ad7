//! Committed filter criteria and saved presets.
//!
//! DESIGN
//! ======
//! `FilterState` is the single value that flows from the filter panel to the
//! fetch pipeline and the map overlay. Every field is optional; `None` means
//! "no constraint". Ranges are inclusive on both ends. The same type encodes
//! the `GET /properties` query and the persisted preset payload. Matching is
//! the server's job; the client never re-filters what it gets back.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::format::{format_area_range, format_currency_range, format_date};

/// Property categories offered by the type selector.
pub const PROPERTY_TYPES: [&str; 5] = ["Residential", "Commercial", "Industrial", "Land", "Agricultural"];

/// Selector value meaning "no type constraint".
pub const ALL_TYPES: &str = "all";

/// Inclusive `(min, max)` pair.
pub type Range = (f64, f64);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free text matched against address and owner name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_size: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_net_worth: Option<Range>,
}

impl FilterState {
    /// Trimmed search text, `None` when blank.
    pub fn search_text(&self) -> Option<&str> {
        self.search_query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Number of active constraints.
    pub fn active_count(&self) -> usize {
        [
            self.search_text().is_some(),
            self.property_type.is_some(),
            self.property_value.is_some(),
            self.property_size.is_some(),
            self.owner_net_worth.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Query-string pairs for `GET /properties`, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.search_text() {
            pairs.push(("search", query.to_owned()));
        }
        if let Some(kind) = &self.property_type {
            pairs.push(("type", kind.clone()));
        }
        push_range(&mut pairs, "minValue", "maxValue", self.property_value);
        push_range(&mut pairs, "minSize", "maxSize", self.property_size);
        push_range(&mut pairs, "minNetWorth", "maxNetWorth", self.owner_net_worth);
        pairs
    }
}

fn push_range(pairs: &mut Vec<(&'static str, String)>, min_key: &'static str, max_key: &'static str, range: Option<Range>) {
    if let Some((min, max)) = range {
        pairs.push((min_key, min.to_string()));
        pairs.push((max_key, max.to_string()));
    }
}

/// Map a type selector value to a constraint; `"all"` and blank clear it.
pub fn parse_property_type(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == ALL_TYPES { None } else { Some(raw.to_owned()) }
}

/// The three slider-driven range constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeField {
    Value,
    Size,
    NetWorth,
}

impl RangeField {
    pub const ALL: [Self; 3] = [Self::Value, Self::Size, Self::NetWorth];

    /// Slider bounds.
    pub fn bounds(self) -> Range {
        match self {
            Self::Value => (1_000_000.0, 10_000_000.0),
            Self::Size => (1_000.0, 11_000.0),
            Self::NetWorth => (100_000_000.0, 1_000_000_000.0),
        }
    }

    pub fn step(self) -> f64 {
        match self {
            Self::Value => 500_000.0,
            Self::Size => 500.0,
            Self::NetWorth => 50_000_000.0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Value => "Property Value",
            Self::Size => "Property Size",
            Self::NetWorth => "Owner Net Worth",
        }
    }

    /// Label shown while the field is unconstrained.
    pub fn any_label(self) -> &'static str {
        match self {
            Self::Value => "Any Value",
            Self::Size => "Any Size",
            Self::NetWorth => "Any Net Worth",
        }
    }

    pub fn get(self, filters: &FilterState) -> Option<Range> {
        match self {
            Self::Value => filters.property_value,
            Self::Size => filters.property_size,
            Self::NetWorth => filters.owner_net_worth,
        }
    }

    pub fn set(self, filters: &mut FilterState, range: Option<Range>) {
        let slot = match self {
            Self::Value => &mut filters.property_value,
            Self::Size => &mut filters.property_size,
            Self::NetWorth => &mut filters.owner_net_worth,
        };
        *slot = range.map(|r| self.normalize(r));
    }

    /// Range shown on the slider: the constraint, or full bounds when inactive.
    pub fn effective(self, filters: &FilterState) -> Range {
        self.get(filters).unwrap_or_else(|| self.bounds())
    }

    /// Human label for the current constraint.
    pub fn display(self, filters: &FilterState) -> String {
        match self.get(filters) {
            None => self.any_label().to_owned(),
            Some(range) => match self {
                Self::Size => format_area_range(range),
                Self::Value | Self::NetWorth => format_currency_range(range),
            },
        }
    }

    /// Clamp both ends into bounds and keep `min <= max`.
    pub fn normalize(self, (min, max): Range) -> Range {
        let (lo, hi) = self.bounds();
        let min = clamp(min, lo, hi);
        let max = clamp(max, lo, hi);
        (min, max.max(min))
    }

    /// Move the lower thumb; the upper one is pushed along if crossed.
    pub fn with_min(self, current: Option<Range>, min: f64) -> Range {
        let (lo, hi) = self.bounds();
        let (_, max) = current.unwrap_or((lo, hi));
        let min = clamp(min, lo, hi);
        (min, clamp(max, lo, hi).max(min))
    }

    /// Move the upper thumb; the lower one is pushed along if crossed.
    pub fn with_max(self, current: Option<Range>, max: f64) -> Range {
        let (lo, hi) = self.bounds();
        let (min, _) = current.unwrap_or((lo, hi));
        let max = clamp(max, lo, hi);
        (clamp(min, lo, hi).min(max), max)
    }
}

fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

/// A named, timestamped filter preset in the persisted list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedFilterEntry {
    /// Present on entries written by this client; older entries lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub filters: FilterState,
    /// ISO-8601 creation time.
    pub timestamp: String,
}

impl SavedFilterEntry {
    /// `"Filter Set 1 (3/7/2024)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_date(&self.timestamp))
    }
}
