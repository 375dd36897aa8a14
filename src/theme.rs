//! Dashboard Palette
//!
//! Every risk-bucket color decision goes through [`RiskBucket::color`] and
//! [`RiskBucket::badge_class`]; text, chart segments and table badges must not
//! map buckets on their own.

use crate::models::RiskBucket;

pub const RISK_HIGH: &str = "#ef4444";
pub const RISK_MEDIUM: &str = "#f59e0b";
pub const RISK_LOW: &str = "#10b981";

/// Segment bars and the radar outline
pub const ACCENT: &str = "#3b82f6";
/// Radar fill
pub const ACCENT_FILL: &str = "rgba(59, 130, 246, 0.2)";
/// Chart grid lines on the dark background
pub const GRID: &str = "rgba(255, 255, 255, 0.1)";
/// Axis and point labels
pub const LABEL: &str = "#9ca3af";
/// Legend text
pub const LEGEND: &str = "#ffffff";
/// Expected-loss column in the customer table
pub const LOSS: &str = RISK_HIGH;

impl RiskBucket {
    /// HIGH is red, MEDIUM is amber, LOW and anything unrecognised is green.
    pub fn color(&self) -> &'static str {
        match self {
            RiskBucket::High => RISK_HIGH,
            RiskBucket::Medium => RISK_MEDIUM,
            RiskBucket::Low | RiskBucket::Other(_) => RISK_LOW,
        }
    }

    /// CSS class of the table badge, following the same fallback as [`color`](Self::color).
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskBucket::High => "badge badge-high",
            RiskBucket::Medium => "badge badge-medium",
            RiskBucket::Low | RiskBucket::Other(_) => "badge badge-low",
        }
    }
}
