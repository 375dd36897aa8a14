//! Global Application State
//!
//! Reactive widget state using Leptos signals. [`GlobalState`] is the
//! browser's [`WidgetSink`]: the shared dashboard controller writes into it
//! and components render from it.

use chrono::{DateTime, Utc};
use churn_dashboard::nav::NavState;
use churn_dashboard::view::{
    ChartInstance, ChartRegistry, ChartSpec, CustomerTable, KpiPanel, MetricsPanel, Notice,
    NoticeLevel, PredictionPanel, WidgetId, WidgetSink,
};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub kpis: RwSignal<Option<KpiPanel>>,
    pub segments: RwSignal<Option<ChartInstance>>,
    pub risk_distribution: RwSignal<Option<ChartInstance>>,
    pub customers: RwSignal<Option<CustomerTable>>,
    pub model_metrics: RwSignal<Option<MetricsPanel>>,
    pub model_radar: RwSignal<Option<ChartInstance>>,
    pub prediction: RwSignal<Option<PredictionPanel>>,
    /// Sidebar selection and visible view
    pub nav: RwSignal<NavState>,
    /// Most recent widget render
    pub last_refresh: RwSignal<Option<DateTime<Utc>>>,
    /// Initial load in progress
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    charts: StoredValue<ChartRegistry>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        kpis: create_rw_signal(None),
        segments: create_rw_signal(None),
        risk_distribution: create_rw_signal(None),
        customers: create_rw_signal(None),
        model_metrics: create_rw_signal(None),
        model_radar: create_rw_signal(None),
        prediction: create_rw_signal(None),
        nav: create_rw_signal(NavState::new()),
        last_refresh: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        charts: store_value(ChartRegistry::new()),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Show a toast; it clears itself after the notice's display time
    pub fn show_notice(&self, notice: Notice) {
        let signal = match notice.level {
            NoticeLevel::Success => self.success,
            NoticeLevel::Error => self.error,
        };
        let display_ms = notice.display_ms();
        signal.set(Some(notice.message));

        gloo_timers::callback::Timeout::new(display_ms, move || {
            signal.set(None);
        })
        .forget();
    }

    /// Switch tabs from a nav item click
    pub fn switch_tab(&self, view_name: &str, activated: usize) {
        self.nav.update(|nav| {
            if let Err(e) = nav.switch_tab(view_name, activated) {
                web_sys::console::error_1(&e.to_string().into());
            }
        });
    }

    /// Replace the widget's chart instance; `None` once the app is torn down
    fn mount(&self, widget: WidgetId, spec: ChartSpec) -> Option<ChartInstance> {
        self.charts
            .try_update_value(|registry| registry.mount(widget, spec).clone())
    }

    fn touch(&self) {
        self.last_refresh.set(Some(Utc::now()));
    }
}

impl WidgetSink for GlobalState {
    fn show_kpis(&self, panel: KpiPanel) {
        self.kpis.set(Some(panel));
        self.touch();
    }

    fn show_segments(&self, chart: ChartSpec) {
        self.segments.set(self.mount(WidgetId::Segments, chart));
        self.touch();
    }

    fn show_risk_distribution(&self, chart: ChartSpec) {
        self.risk_distribution
            .set(self.mount(WidgetId::RiskDistribution, chart));
        self.touch();
    }

    fn show_customers(&self, table: CustomerTable) {
        self.customers.set(Some(table));
        self.touch();
    }

    fn show_model_metrics(&self, panel: MetricsPanel) {
        self.model_radar
            .set(self.mount(WidgetId::ModelMetrics, panel.radar.clone()));
        self.model_metrics.set(Some(panel));
        self.touch();
    }

    fn show_prediction(&self, panel: PredictionPanel) {
        self.prediction.set(Some(panel));
        self.touch();
    }

    fn notify(&self, notice: Notice) {
        self.show_notice(notice);
    }
}
