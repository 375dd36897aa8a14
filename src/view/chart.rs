//! Chart Widgets
//!
//! Chart descriptions built from backend data, plus the registry that owns
//! the live chart instance of each chart widget.

use serde::Serialize;
use std::collections::HashMap;

use super::WidgetId;
use crate::format;
use crate::models::{ModelMetrics, RiskDistributionEntry, SegmentStat};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    /// Bars grow along the x axis, one row per label
    HorizontalBar,
    Radar,
}

/// One series of values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    /// One color per value, or a single color for the whole series
    pub colors: Vec<String>,
    pub border: Option<String>,
}

/// Everything a renderer needs to draw a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Doughnut hole as a fraction of the radius
    pub cutout: Option<f64>,
    pub show_legend: bool,
    /// Upper bound of the value axis, when fixed
    pub max_value: Option<f64>,
}

impl ChartSpec {
    /// Doughnut of customer counts per risk bucket
    pub fn risk_distribution(entries: &[RiskDistributionEntry]) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            labels: entries.iter().map(|e| e.risk_bucket.label().to_string()).collect(),
            datasets: vec![Dataset {
                label: "Customers".to_string(),
                values: entries.iter().map(|e| e.count as f64).collect(),
                colors: entries
                    .iter()
                    .map(|e| e.risk_bucket.color().to_string())
                    .collect(),
                border: None,
            }],
            cutout: Some(0.75),
            show_legend: true,
            max_value: None,
        }
    }

    /// Horizontal bars of churn percentage per segment
    pub fn segments(segments: &[SegmentStat]) -> Self {
        Self {
            kind: ChartKind::HorizontalBar,
            labels: segments.iter().map(|s| s.segment_value.clone()).collect(),
            datasets: vec![Dataset {
                label: "Churn %".to_string(),
                values: segments
                    .iter()
                    .map(|s| format::percent_value(s.churn_rate))
                    .collect(),
                colors: vec![theme::ACCENT.to_string()],
                border: None,
            }],
            cutout: None,
            show_legend: false,
            max_value: None,
        }
    }

    /// Radar of the current model's quality scores
    pub fn model_radar(metrics: &ModelMetrics) -> Self {
        Self {
            kind: ChartKind::Radar,
            labels: ["Precision", "Recall", "F1", "AUC"]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            datasets: vec![Dataset {
                label: "Current Model".to_string(),
                values: vec![
                    metrics.precision_score,
                    metrics.recall_score,
                    metrics.f1(),
                    metrics.roc_auc,
                ],
                colors: vec![theme::ACCENT_FILL.to_string()],
                border: Some(theme::ACCENT.to_string()),
            }],
            cutout: None,
            show_legend: true,
            max_value: Some(1.0),
        }
    }

    /// Number of points in the first series
    pub fn len(&self) -> usize {
        self.datasets.first().map(|d| d.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color of point `index` in the first series
    pub fn color_at(&self, index: usize) -> Option<&str> {
        let colors = &self.datasets.first()?.colors;
        match colors.len() {
            0 => None,
            1 => Some(colors[0].as_str()),
            _ => colors.get(index).map(String::as_str),
        }
    }
}

/// A mounted chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInstance {
    pub id: u64,
    pub widget: WidgetId,
    pub spec: ChartSpec,
}

/// Owns at most one live chart per widget.
///
/// Mounting a chart for a widget destroys the instance it replaces, so
/// repeated refreshes never pile up charts on the same canvas.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    next_id: u64,
    live: HashMap<WidgetId, ChartInstance>,
    destroyed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the widget's current chart (if any) and mount `spec` in its place
    pub fn mount(&mut self, widget: WidgetId, spec: ChartSpec) -> &ChartInstance {
        if let Some(previous) = self.live.remove(&widget) {
            self.destroyed += 1;
            tracing::debug!(widget = ?widget, chart_id = previous.id, "Destroyed chart instance");
        }

        self.next_id += 1;
        let instance = ChartInstance {
            id: self.next_id,
            widget,
            spec,
        };
        tracing::debug!(widget = ?widget, chart_id = instance.id, "Mounted chart instance");

        self.live.entry(widget).or_insert(instance)
    }

    pub fn get(&self, widget: WidgetId) -> Option<&ChartInstance> {
        self.live.get(&widget)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}
