#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use crate::consts::{
    DOT_SIZE_PX, HIGH_TIER_COLOR, HIGH_VALUE_THRESHOLD, LOW_TIER_COLOR, MID_TIER_COLOR, MID_VALUE_THRESHOLD,
    PIN_HEIGHT_PX, PIN_ICON_URL, PIN_SHADOW_URL, PIN_WIDTH_PX, PLACEHOLDER_ICON_URL,
};
use crate::geo::LatLng;

/// Three-band classification of a property value.
///
/// The same thresholds drive single markers and clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTier {
    /// Above $5M.
    High,
    /// Above $2M, up to $5M.
    Mid,
    /// $2M and below.
    Low,
}

impl ValueTier {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value > HIGH_VALUE_THRESHOLD {
            Self::High
        } else if value > MID_VALUE_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }

    /// Fill color (red / amber / green).
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::High => HIGH_TIER_COLOR,
            Self::Mid => MID_TIER_COLOR,
            Self::Low => LOW_TIER_COLOR,
        }
    }
}

/// The subset of a property the map needs to place and style a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

impl MarkerPoint {
    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    #[must_use]
    pub fn tier(&self) -> ValueTier {
        ValueTier::from_value(self.value)
    }

    /// Points with non-finite or out-of-range coordinates cannot be placed.
    #[must_use]
    pub fn is_placeable(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// An image asset used as a marker icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconAsset {
    pub url: String,
    pub shadow_url: Option<String>,
    pub width: f64,
    pub height: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl IconAsset {
    /// The pin drawn for the selected property.
    #[must_use]
    pub fn pin() -> Self {
        Self {
            url: PIN_ICON_URL.to_owned(),
            shadow_url: Some(PIN_SHADOW_URL.to_owned()),
            width: PIN_WIDTH_PX,
            height: PIN_HEIGHT_PX,
            anchor_x: (PIN_WIDTH_PX / 2.0).floor(),
            anchor_y: PIN_HEIGHT_PX,
        }
    }

    /// Placeholder with the same footprint, used when this asset fails to load.
    #[must_use]
    pub fn fallback(&self) -> Self {
        Self { url: PLACEHOLDER_ICON_URL.to_owned(), shadow_url: None, ..self.clone() }
    }
}

/// How a marker is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// Tier-colored dot rendered as HTML.
    Dot { color: &'static str, size: f64 },
    /// Image pin.
    Image(IconAsset),
}

impl MarkerIcon {
    #[must_use]
    pub fn dot(tier: ValueTier) -> Self {
        Self::Dot { color: tier.color(), size: DOT_SIZE_PX }
    }

    /// Inline HTML for dot icons; image icons render through the library.
    #[must_use]
    pub fn html(&self) -> Option<String> {
        match self {
            Self::Dot { color, size } => Some(format!(
                "<div style=\"width: {size}px; height: {size}px; background: {color}; \
                 border: 2px solid white; border-radius: 50%; box-shadow: 0 2px 4px rgba(0,0,0,0.2);\"></div>"
            )),
            Self::Image(_) => None,
        }
    }
}

/// A marker ready to be handed to a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub value: f64,
    pub icon: MarkerIcon,
}

impl MarkerSpec {
    #[must_use]
    pub fn for_point(point: &MarkerPoint, selected: bool) -> Self {
        let icon = if selected { MarkerIcon::Image(IconAsset::pin()) } else { MarkerIcon::dot(point.tier()) };
        Self { id: point.id.clone(), position: point.position(), value: point.value, icon }
    }
}
