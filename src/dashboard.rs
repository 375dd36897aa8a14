//! Dashboard Controller
//!
//! Drives the widgets: five independent read fetchers, each owning one
//! widget, and the prediction submission flow. The controller is generic over
//! the wire ([`Transport`]) and the render target ([`WidgetSink`]) so the
//! terminal and the browser share it.

use thiserror::Error;

use crate::client::{ApiClient, FetchError, FetchResult, Transport};
use crate::config::DashboardConfig;
use crate::models::{
    Customer, KpiSummary, ModelMetrics, PredictionResult, RiskDistributionEntry, SegmentStat,
};
use crate::predict::{PredictionForm, SubmitControl, SubmitGuard};
use crate::view::{
    ChartSpec, CustomerTable, KpiPanel, MetricsPanel, Notice, PredictionPanel, WidgetId,
    WidgetSink,
};

/// Notice shown when a prediction request fails
pub const PREDICTION_FAILED: &str = "Error: Prediction failed";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("A prediction is already in flight")]
    InFlight,

    #[error("Prediction request failed: {0}")]
    Request(#[from] FetchError),
}

/// Outcome of a full dashboard load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<WidgetId>,
    pub failed: Vec<(WidgetId, FetchError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record<R>(&mut self, widget: WidgetId, result: FetchResult<R>) {
        match result {
            Ok(_) => self.loaded.push(widget),
            Err(err) => self.failed.push((widget, err)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard<T, S> {
    client: ApiClient<T>,
    sink: S,
    surface_read_errors: bool,
    customer_limit: Option<usize>,
}

impl<T: Transport, S: WidgetSink> Dashboard<T, S> {
    pub fn new(client: ApiClient<T>, sink: S) -> Self {
        Self {
            client,
            sink,
            surface_read_errors: false,
            customer_limit: None,
        }
    }

    /// Apply the `[dashboard]` settings
    pub fn with_config(mut self, config: &DashboardConfig) -> Self {
        self.surface_read_errors = config.surface_read_errors;
        self.customer_limit = config.customer_limit();
        self
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ============================================
    // Read path
    // ============================================

    pub async fn fetch_kpis(&self) -> FetchResult<KpiSummary> {
        let kpis = self.read(WidgetId::Kpis, self.client.kpis().await)?;
        self.sink.show_kpis(KpiPanel::from(&kpis));
        Ok(kpis)
    }

    pub async fn fetch_segments(&self) -> FetchResult<Vec<SegmentStat>> {
        let segments = self.read(WidgetId::Segments, self.client.segments().await)?;
        self.sink.show_segments(ChartSpec::segments(&segments));
        Ok(segments)
    }

    pub async fn fetch_risk_distribution(&self) -> FetchResult<Vec<RiskDistributionEntry>> {
        let entries = self.read(
            WidgetId::RiskDistribution,
            self.client.risk_distribution().await,
        )?;
        self.sink
            .show_risk_distribution(ChartSpec::risk_distribution(&entries));
        Ok(entries)
    }

    pub async fn fetch_high_risk_customers(&self) -> FetchResult<Vec<Customer>> {
        let customers = self.read(WidgetId::Customers, self.client.customers().await)?;
        self.sink
            .show_customers(CustomerTable::build(&customers, self.customer_limit));
        Ok(customers)
    }

    pub async fn fetch_model_metrics(&self) -> FetchResult<ModelMetrics> {
        let metrics = self.read(WidgetId::ModelMetrics, self.client.model_metrics().await)?;
        self.sink.show_model_metrics(MetricsPanel::from(&metrics));
        Ok(metrics)
    }

    /// Run all five fetchers concurrently. Completion order is unspecified.
    pub async fn load_all(&self) -> LoadReport {
        let (kpis, segments, risk, customers, metrics) = futures_util::join!(
            self.fetch_kpis(),
            self.fetch_segments(),
            self.fetch_risk_distribution(),
            self.fetch_high_risk_customers(),
            self.fetch_model_metrics(),
        );

        let mut report = LoadReport::default();
        report.record(WidgetId::Kpis, kpis);
        report.record(WidgetId::Segments, segments);
        report.record(WidgetId::RiskDistribution, risk);
        report.record(WidgetId::Customers, customers);
        report.record(WidgetId::ModelMetrics, metrics);

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Dashboard loaded"
        );
        report
    }

    fn read<R>(&self, widget: WidgetId, result: FetchResult<R>) -> FetchResult<R> {
        result.map_err(|err| {
            tracing::warn!(widget = ?widget, error = %err, "Failed to load widget");
            if self.surface_read_errors {
                self.sink
                    .notify(Notice::error(format!("Error loading {}: {}", widget.title(), err)));
            }
            err
        })
    }

    // ============================================
    // Write path
    // ============================================

    /// Submit the form for a live score.
    ///
    /// The control is held disabled until the result is rendered. On success
    /// a short notice is raised and the KPI and customer widgets are
    /// refreshed afterwards; on failure an
    /// error notice is raised, the result panel is left alone and nothing is
    /// refreshed.
    pub async fn submit_prediction<C>(
        &self,
        form: &PredictionForm,
        control: &C,
    ) -> Result<PredictionResult, SubmitError>
    where
        C: SubmitControl + ?Sized,
    {
        let guard = SubmitGuard::acquire(control).ok_or(SubmitError::InFlight)?;

        let payload = form.payload();
        let result = match self.client.predict(&payload).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "Prediction failed");
                self.sink.notify(Notice::error(PREDICTION_FAILED));
                return Err(SubmitError::Request(err));
            }
        };

        let panel = PredictionPanel::from(&result);
        let scored = Notice::success(format!(
            "Prediction complete: {} {}",
            panel.probability, panel.risk_label
        ));
        self.sink.show_prediction(panel);
        self.sink.notify(scored);
        drop(guard);

        tracing::info!(
            risk = %result.risk_bucket,
            probability = result.churn_probability,
            "Prediction scored"
        );

        // The backend stored the scored customer; pick up the new aggregates
        let _ = futures_util::join!(self.fetch_kpis(), self.fetch_high_risk_customers());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::ScriptedTransport;
    use crate::client::Endpoint;
    use crate::predict::{SubmitButton, SUBMIT_LABEL};
    use crate::theme;
    use crate::view::{NoticeLevel, ViewState};
    use serde_json::{json, Value};

    fn dashboard(transport: &ScriptedTransport) -> Dashboard<ScriptedTransport, ViewState> {
        Dashboard::new(ApiClient::new(transport.clone()), ViewState::new())
    }

    fn customers(n: usize) -> Value {
        let rows: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "customer_id": format!("C-{}", i),
                    "risk_bucket": if i % 2 == 0 { "HIGH" } else { "MEDIUM" },
                    "churn_probability": 0.9 - i as f64 * 0.1,
                    "expected_revenue_loss": 500.0,
                    "revenue": 1000.0,
                })
            })
            .collect();
        Value::Array(rows)
    }

    fn scripted_backend() -> ScriptedTransport {
        let transport = ScriptedTransport::default();
        transport.respond(
            Endpoint::Kpis,
            Ok(json!({"total_revenue": 1250000.0, "revenue_at_risk": 312500.4, "churn_rate_pct": 26.5})),
        );
        transport.respond(
            Endpoint::Segments,
            Ok(json!([
                {"segment_type": "contract", "segment_value": "Month-to-month", "churn_rate": 0.427},
                {"segment_type": "contract", "segment_value": "Two year", "churn_rate": 0.028}
            ])),
        );
        transport.respond(
            Endpoint::RiskDistribution,
            Ok(json!([
                {"risk_bucket": "HIGH", "count": 120},
                {"risk_bucket": "MEDIUM", "count": 300},
                {"risk_bucket": "LOW", "count": 900}
            ])),
        );
        transport.respond(Endpoint::Customers, Ok(customers(3)));
        transport.respond(
            Endpoint::Metrics,
            Ok(json!({
                "model_version": "v2.0-unified",
                "roc_auc": 0.84,
                "precision_score": 0.52,
                "recall_score": 0.78,
                "training_rows": 5634
            })),
        );
        transport
    }

    fn filled_form() -> PredictionForm {
        PredictionForm::new()
            .field("customer_id", "C-9")
            .field("revenue", "1200.50")
            .field("monthly_charges", "89.99")
            .field("tenure", "14")
            .field("contract", "Month-to-month")
    }

    #[tokio::test]
    async fn test_load_all_fills_every_widget() {
        let transport = scripted_backend();
        let dash = dashboard(&transport);

        let report = dash.load_all().await;
        assert!(report.is_complete());
        assert_eq!(report.loaded.len(), 5);

        let view = dash.sink().snapshot();
        let kpis = view.kpis.unwrap();
        assert_eq!(kpis.total_revenue, "$1,250,000");
        assert_eq!(kpis.revenue_at_risk, "$312,500");
        assert_eq!(kpis.churn_rate, "26.5%");
        assert_eq!(view.customers.unwrap().len(), 3);
        assert_eq!(view.risk_distribution.unwrap().spec.len(), 3);
        assert!(view.model_metrics.is_some());
        assert_eq!(dash.sink().live_charts(), 3);
    }

    #[tokio::test]
    async fn test_table_rows_in_order() {
        let transport = scripted_backend();
        transport.respond(Endpoint::Customers, Ok(customers(5)));
        let dash = dashboard(&transport);

        dash.fetch_high_risk_customers().await.unwrap();

        let table = dash.sink().snapshot().customers.unwrap();
        let ids: Vec<_> = table.rows.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["C-0", "C-1", "C-2", "C-3", "C-4"]);
        assert_eq!(table.rows[0].badge_class, "badge badge-high");
        assert_eq!(table.rows[1].badge_class, "badge badge-medium");
    }

    #[tokio::test]
    async fn test_fetchers_are_idempotent() {
        let transport = scripted_backend();
        let dash = dashboard(&transport);

        dash.load_all().await;
        let first = dash.sink().snapshot();
        dash.load_all().await;
        let second = dash.sink().snapshot();

        assert_eq!(first.kpis, second.kpis);
        assert_eq!(first.customers, second.customers);
        assert_eq!(second.customers.unwrap().len(), 3);
        assert_eq!(
            first.segments.unwrap().spec,
            second.segments.as_ref().unwrap().spec
        );
        // Each chart widget still holds exactly one instance
        assert_eq!(dash.sink().live_charts(), 3);
        assert_eq!(dash.sink().destroyed_charts(), 3);
    }

    #[tokio::test]
    async fn test_read_failure_keeps_prior_widget() {
        let transport = scripted_backend();
        let dash = dashboard(&transport);
        dash.fetch_kpis().await.unwrap();
        let before = dash.sink().snapshot().kpis;

        transport.respond(Endpoint::Kpis, Err(FetchError::status(500, "boom")));
        let err = dash.fetch_kpis().await.unwrap_err();

        assert_eq!(err, FetchError::status(500, "boom"));
        assert_eq!(dash.sink().snapshot().kpis, before);
        // Read failures are silent by default
        assert!(dash.sink().take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_partial_load_reports_failures() {
        let transport = scripted_backend();
        transport.respond(Endpoint::Metrics, Ok(json!({"model_version": "v1"})));
        let dash = dashboard(&transport);

        let report = dash.load_all().await;

        assert_eq!(report.loaded.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, WidgetId::ModelMetrics);
        assert!(matches!(report.failed[0].1, FetchError::Decode(_)));
        assert!(dash.sink().snapshot().model_metrics.is_none());
    }

    #[tokio::test]
    async fn test_read_failures_surface_when_configured() {
        let transport = ScriptedTransport::default();
        let config = DashboardConfig {
            surface_read_errors: true,
            ..DashboardConfig::default()
        };
        let dash = dashboard(&transport).with_config(&config);

        let report = dash.load_all().await;

        assert_eq!(report.failed.len(), 5);
        let notices = dash.sink().take_notices();
        assert_eq!(notices.len(), 5);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
    }

    #[tokio::test]
    async fn test_customer_limit_caps_rows() {
        let transport = scripted_backend();
        transport.respond(Endpoint::Customers, Ok(customers(8)));
        let config = DashboardConfig {
            customer_limit: 5,
            ..DashboardConfig::default()
        };
        let dash = dashboard(&transport).with_config(&config);

        let fetched = dash.fetch_high_risk_customers().await.unwrap();

        assert_eq!(fetched.len(), 8);
        assert_eq!(dash.sink().snapshot().customers.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_prediction_success_renders_then_refreshes() {
        let transport = scripted_backend();
        transport.respond(
            Endpoint::Predict,
            Ok(json!({
                "customer_id": "C-9",
                "churn_probability": 0.732,
                "expected_revenue_loss": 878.77,
                "priority_score": 643.26,
                "risk_bucket": "HIGH"
            })),
        );
        let dash = dashboard(&transport);
        let button = SubmitButton::default();

        let result = dash.submit_prediction(&filled_form(), &button).await.unwrap();
        assert_eq!(result.churn_probability, 0.732);

        let panel = dash.sink().snapshot().prediction.unwrap();
        assert_eq!(panel.probability, "73.2%");
        assert_eq!(panel.risk_label, "HIGH RISK");
        assert_eq!(panel.risk_color, theme::RISK_HIGH);
        assert_eq!(
            dash.sink().take_notices(),
            vec![Notice::success("Prediction complete: 73.2% HIGH RISK")]
        );

        // POST settles before the two refreshes are issued
        let log = transport.log();
        assert_eq!(log[0], Endpoint::Predict);
        assert_eq!(log.len(), 3);
        assert!(log[1..].contains(&Endpoint::Kpis));
        assert!(log[1..].contains(&Endpoint::Customers));

        assert_eq!(transport.posted()[0]["tenure"], json!(14));
        assert_eq!(transport.posted()[0]["revenue"], json!(1200.5));
        assert_eq!(button.label(), SUBMIT_LABEL);
        assert!(!button.is_disabled());
    }

    #[tokio::test]
    async fn test_prediction_failure_notifies_and_skips_refresh() {
        let transport = scripted_backend();
        transport.respond(Endpoint::Predict, Err(FetchError::status(500, "boom")));
        let dash = dashboard(&transport);
        let button = SubmitButton::default();

        let err = dash
            .submit_prediction(&filled_form(), &button)
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Request(FetchError::status(500, "boom")));
        assert!(dash.sink().snapshot().prediction.is_none());
        assert_eq!(
            dash.sink().take_notices(),
            vec![Notice::error(PREDICTION_FAILED)]
        );
        assert_eq!(transport.log(), vec![Endpoint::Predict]);
        assert_eq!(button.label(), SUBMIT_LABEL);
        assert!(!button.is_disabled());
    }

    #[tokio::test]
    async fn test_failed_prediction_keeps_previous_result() {
        let transport = scripted_backend();
        transport.respond(
            Endpoint::Predict,
            Ok(json!({
                "churn_probability": 0.2,
                "expected_revenue_loss": 10.0,
                "priority_score": 2.0,
                "risk_bucket": "LOW"
            })),
        );
        let dash = dashboard(&transport);
        let button = SubmitButton::default();
        dash.submit_prediction(&filled_form(), &button).await.unwrap();
        let before = dash.sink().snapshot().prediction;

        transport.respond(Endpoint::Predict, Ok(json!({"detail": "bad"})));
        let err = dash
            .submit_prediction(&filled_form(), &button)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Request(FetchError::Decode(_))));
        assert_eq!(dash.sink().snapshot().prediction, before);
    }

    #[tokio::test]
    async fn test_submit_rejected_while_in_flight() {
        let transport = scripted_backend();
        let dash = dashboard(&transport);
        let button = SubmitButton::default();
        button.set_disabled(true);

        let err = dash
            .submit_prediction(&filled_form(), &button)
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::InFlight);
        assert!(transport.log().is_empty());
        assert!(button.is_disabled());
    }
}
