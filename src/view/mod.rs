//! Dashboard Widgets
//!
//! Render-ready view models for each widget and the [`WidgetSink`] seam the
//! controller writes them through. A sink can be plain memory
//! ([`ViewState`], used by the terminal dashboard and tests) or reactive
//! browser signals.
//!
//! Every widget is owned by exactly one fetcher or handler, and every write
//! replaces the widget's previous content wholesale.

pub mod chart;
pub mod kpi;
pub mod metrics;
pub mod notice;
pub mod prediction;
pub mod table;

pub use chart::{ChartInstance, ChartKind, ChartRegistry, ChartSpec, Dataset};
pub use kpi::KpiPanel;
pub use metrics::MetricsPanel;
pub use notice::{Notice, NoticeLevel};
pub use prediction::PredictionPanel;
pub use table::{CustomerRow, CustomerTable};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// The DOM regions of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetId {
    Kpis,
    Segments,
    RiskDistribution,
    Customers,
    ModelMetrics,
    Prediction,
}

impl WidgetId {
    pub fn title(self) -> &'static str {
        match self {
            WidgetId::Kpis => "Key Metrics",
            WidgetId::Segments => "Churn by Segment",
            WidgetId::RiskDistribution => "Risk Distribution",
            WidgetId::Customers => "High-Risk Customers",
            WidgetId::ModelMetrics => "Model Performance",
            WidgetId::Prediction => "Live Prediction",
        }
    }
}

/// Where the controller writes rendered widgets.
///
/// Methods take `&self`: sinks are shared between concurrently running
/// fetchers and use interior mutability (cells natively, signals in the
/// browser).
pub trait WidgetSink {
    fn show_kpis(&self, panel: KpiPanel);

    fn show_segments(&self, chart: ChartSpec);

    fn show_risk_distribution(&self, chart: ChartSpec);

    fn show_customers(&self, table: CustomerTable);

    fn show_model_metrics(&self, panel: MetricsPanel);

    fn show_prediction(&self, panel: PredictionPanel);

    fn notify(&self, notice: Notice);
}

/// Snapshot of everything currently rendered
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub kpis: Option<KpiPanel>,
    pub segments: Option<ChartInstance>,
    pub risk_distribution: Option<ChartInstance>,
    pub customers: Option<CustomerTable>,
    pub model_metrics: Option<MetricsPanel>,
    /// Chart instance of the model radar, mounted alongside the metrics panel
    pub model_radar: Option<ChartInstance>,
    pub prediction: Option<PredictionPanel>,
    pub notices: Vec<Notice>,
    pub refreshed_at: BTreeMap<WidgetId, DateTime<Utc>>,
}

impl DashboardView {
    /// Most recent widget refresh, for the "Last refresh" footer
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at.values().max().copied()
    }
}

/// In-memory [`WidgetSink`]
#[derive(Debug, Default)]
pub struct ViewState {
    view: RefCell<DashboardView>,
    charts: RefCell<ChartRegistry>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current view
    pub fn snapshot(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Notices raised so far, oldest first, leaving the list empty
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.view.borrow_mut().notices)
    }

    pub fn live_charts(&self) -> usize {
        self.charts.borrow().live_count()
    }

    pub fn destroyed_charts(&self) -> u64 {
        self.charts.borrow().destroyed_count()
    }

    fn mount(&self, widget: WidgetId, spec: ChartSpec) -> ChartInstance {
        self.charts.borrow_mut().mount(widget, spec).clone()
    }

    fn update(&self, widget: WidgetId, apply: impl FnOnce(&mut DashboardView)) {
        let mut view = self.view.borrow_mut();
        apply(&mut view);
        view.refreshed_at.insert(widget, Utc::now());
        tracing::debug!(widget = ?widget, "Widget rendered");
    }
}

impl WidgetSink for ViewState {
    fn show_kpis(&self, panel: KpiPanel) {
        self.update(WidgetId::Kpis, |v| v.kpis = Some(panel));
    }

    fn show_segments(&self, chart: ChartSpec) {
        let instance = self.mount(WidgetId::Segments, chart);
        self.update(WidgetId::Segments, |v| v.segments = Some(instance));
    }

    fn show_risk_distribution(&self, chart: ChartSpec) {
        let instance = self.mount(WidgetId::RiskDistribution, chart);
        self.update(WidgetId::RiskDistribution, |v| {
            v.risk_distribution = Some(instance)
        });
    }

    fn show_customers(&self, table: CustomerTable) {
        self.update(WidgetId::Customers, |v| v.customers = Some(table));
    }

    fn show_model_metrics(&self, panel: MetricsPanel) {
        let instance = self.mount(WidgetId::ModelMetrics, panel.radar.clone());
        self.update(WidgetId::ModelMetrics, |v| {
            v.model_metrics = Some(panel);
            v.model_radar = Some(instance);
        });
    }

    fn show_prediction(&self, panel: PredictionPanel) {
        self.update(WidgetId::Prediction, |v| v.prediction = Some(panel));
    }

    fn notify(&self, notice: Notice) {
        self.view.borrow_mut().notices.push(notice);
    }
}
