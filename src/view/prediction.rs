//! Prediction result panel

use serde::Serialize;

use crate::format;
use crate::models::PredictionResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPanel {
    pub customer_id: Option<String>,
    pub probability: String,
    pub expected_loss: String,
    /// Shown as the backend sent it
    pub priority: String,
    /// e.g. "HIGH RISK"
    pub risk_label: String,
    pub risk_color: &'static str,
    /// `stroke-dasharray` of the score gauge, out of 100
    pub gauge_dasharray: String,
    /// Gauge fill in percent
    pub gauge_percent: f64,
}

impl From<&PredictionResult> for PredictionPanel {
    fn from(result: &PredictionResult) -> Self {
        let pct = result.churn_probability * 100.0;
        Self {
            customer_id: result.customer_id.clone(),
            probability: format::percent(result.churn_probability),
            expected_loss: format::currency(result.expected_revenue_loss),
            priority: format::raw_number(result.priority_score),
            risk_label: format!("{} RISK", result.risk_bucket),
            risk_color: result.risk_bucket.color(),
            gauge_dasharray: format!("{}, 100", format::raw_number(pct)),
            gauge_percent: pct,
        }
    }
}
