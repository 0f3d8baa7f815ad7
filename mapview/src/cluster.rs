//! Cluster styling.
//!
//! The clustering itself belongs to the map library; this module only decides
//! how a finished cluster looks from its member count and average value.

#[cfg(test)]
#[path = "cluster_test.rs"]
mod cluster_test;

use crate::consts::{CLUSTER_BORDER_COLOR, CLUSTER_MAX_SIZE_PX, CLUSTER_MIN_SIZE_PX, CLUSTER_PX_PER_MEMBER};
use crate::marker::ValueTier;

/// Visual parameters for one cluster icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStyle {
    /// Diameter in pixels, within `[25, 50]`.
    pub size: f64,
    pub tier: ValueTier,
    pub border_color: &'static str,
}

impl ClusterStyle {
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.tier.color()
    }

    /// Style a cluster from its members' values. `None` for an empty cluster.
    #[must_use]
    pub fn for_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let avg = average(values);
        Some(cluster_style(values.len(), avg))
    }

    /// Inline HTML for the cluster bubble, labelled with the member count.
    #[must_use]
    pub fn html(&self, count: usize) -> String {
        let size = self.size;
        let color = self.color();
        let border = self.border_color;
        format!(
            "<div style=\"width: {size}px; height: {size}px; background: {color}; border: 2px solid {border}; \
             display: flex; align-items: center; justify-content: center; border-radius: 50%; \
             color: white; font-weight: bold;\">{count}</div>"
        )
    }
}

/// Style for a cluster of `count` markers whose mean value is `avg_value`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cluster_style(count: usize, avg_value: f64) -> ClusterStyle {
    let size = (count as f64 * CLUSTER_PX_PER_MEMBER).clamp(CLUSTER_MIN_SIZE_PX, CLUSTER_MAX_SIZE_PX);
    ClusterStyle { size, tier: ValueTier::from_value(avg_value), border_color: CLUSTER_BORDER_COLOR }
}

#[allow(clippy::cast_precision_loss)]
fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
