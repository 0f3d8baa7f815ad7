//! Shared numeric constants for the map crate.

// ── Value tiers ─────────────────────────────────────────────────

/// Values strictly above this are in the high (red) tier.
pub const HIGH_VALUE_THRESHOLD: f64 = 5_000_000.0;

/// Values strictly above this (and not high) are in the mid (amber) tier.
pub const MID_VALUE_THRESHOLD: f64 = 2_000_000.0;

pub const HIGH_TIER_COLOR: &str = "#ef4444";
pub const MID_TIER_COLOR: &str = "#f59e0b";
pub const LOW_TIER_COLOR: &str = "#10b981";

// ── Clusters ────────────────────────────────────────────────────

/// Pixels of cluster diameter per member marker.
pub const CLUSTER_PX_PER_MEMBER: f64 = 5.0;
pub const CLUSTER_MIN_SIZE_PX: f64 = 25.0;
pub const CLUSTER_MAX_SIZE_PX: f64 = 50.0;
pub const CLUSTER_BORDER_COLOR: &str = "#ffffff";

/// Pixel radius inside which the cluster layer merges markers.
pub const MAX_CLUSTER_RADIUS_PX: f64 = 50.0;

// ── Markers ─────────────────────────────────────────────────────

/// Diameter of the value dot drawn for unselected markers.
pub const DOT_SIZE_PX: f64 = 16.0;

pub const PIN_ICON_URL: &str = "/marker.png";
pub const PIN_SHADOW_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-shadow.png";
pub const PIN_WIDTH_PX: f64 = 25.0;
pub const PIN_HEIGHT_PX: f64 = 41.0;

/// Substitute image for marker assets that fail to load.
pub const PLACEHOLDER_ICON_URL: &str = "/placeholder.svg";

// ── Viewport ────────────────────────────────────────────────────

/// Padding applied on every side when fitting the view to the markers.
pub const FIT_PADDING_PX: f64 = 50.0;

/// Geographic center of the contiguous United States.
pub const DEFAULT_CENTER: (f64, f64) = (37.0902, -95.7129);
pub const DEFAULT_ZOOM: f64 = 4.0;
