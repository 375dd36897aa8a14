//! Backend Response Models
//!
//! Read-only view models for every payload the churn backend returns.
//! The client never mutates these; each fetch replaces the previous value.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Risk bucket
// ============================================

/// Categorical churn-risk label.
///
/// The backend only emits `LOW`, `MEDIUM` and `HIGH`. Anything else is kept
/// verbatim in [`RiskBucket::Other`] so rendering can fall back to the low-risk
/// styling instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskBucket {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskBucket {
    /// Wire label (`"HIGH"`, `"MEDIUM"`, `"LOW"` or the unrecognised text)
    pub fn label(&self) -> &str {
        match self {
            RiskBucket::Low => "LOW",
            RiskBucket::Medium => "MEDIUM",
            RiskBucket::High => "HIGH",
            RiskBucket::Other(label) => label,
        }
    }
}

impl From<String> for RiskBucket {
    fn from(value: String) -> Self {
        match value.as_str() {
            "LOW" => RiskBucket::Low,
            "MEDIUM" => RiskBucket::Medium,
            "HIGH" => RiskBucket::High,
            _ => RiskBucket::Other(value),
        }
    }
}

impl From<&str> for RiskBucket {
    fn from(value: &str) -> Self {
        RiskBucket::from(value.to_string())
    }
}

impl From<RiskBucket> for String {
    fn from(bucket: RiskBucket) -> Self {
        bucket.label().to_string()
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================
// Read-path payloads
// ============================================

/// GET /api/kpis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub revenue_at_risk: f64,
    pub churn_rate_pct: f64,
    #[serde(default)]
    pub high_risk_pct: Option<f64>,
    #[serde(default)]
    pub total_customers: Option<u64>,
    #[serde(default)]
    pub high_risk_customers: Option<u64>,
}

/// One element of GET /api/segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStat {
    #[serde(default)]
    pub segment_type: Option<String>,
    /// Segment labels come straight out of a dataframe, so `0`/`1` or booleans
    /// are as likely as strings.
    #[serde(deserialize_with = "scalar_label")]
    pub segment_value: String,
    pub churn_rate: f64,
    #[serde(default)]
    pub customer_count: Option<u64>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// One element of GET /api/risk_distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDistributionEntry {
    pub risk_bucket: RiskBucket,
    pub count: u64,
}

/// One element of GET /api/customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "scalar_label")]
    pub customer_id: String,
    pub risk_bucket: RiskBucket,
    pub churn_probability: f64,
    pub expected_revenue_loss: f64,
    pub revenue: f64,
    #[serde(default)]
    pub priority_score: Option<f64>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub prediction_timestamp: Option<String>,
}

/// GET /api/metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub model_version: String,
    pub roc_auc: f64,
    pub precision_score: f64,
    pub recall_score: f64,
    pub training_rows: u64,
    #[serde(default)]
    pub f1_score: Option<f64>,
    #[serde(default)]
    pub selected_model: Option<String>,
    #[serde(default)]
    pub run_timestamp: Option<String>,
}

impl ModelMetrics {
    /// Reported F1, or the harmonic mean of precision and recall
    pub fn f1(&self) -> f64 {
        if let Some(f1) = self.f1_score {
            return f1;
        }
        let sum = self.precision_score + self.recall_score;
        if sum > 0.0 {
            2.0 * self.precision_score * self.recall_score / sum
        } else {
            0.0
        }
    }
}

// ============================================
// Write-path payloads
// ============================================

/// POST /api/predict response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub churn_probability: f64,
    pub expected_revenue_loss: f64,
    pub priority_score: f64,
    pub risk_bucket: RiskBucket,
    #[serde(default, deserialize_with = "optional_scalar_label")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub model_version: Option<String>,
}

/// GET /health
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// ============================================
// Helpers
// ============================================

fn scalar_to_label<E: serde::de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!("expected a scalar label, got {}", other))),
    }
}

fn scalar_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_label(serde_json::Value::deserialize(deserializer)?)
}

fn optional_scalar_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        value => scalar_to_label(value).map(Some),
    }
}
