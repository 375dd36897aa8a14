//! Backend API Client
//!
//! Typed access to the churn backend. The wire layer is abstracted behind
//! [`Transport`] so the same decoding and error mapping runs over `reqwest`
//! natively and over `gloo-net` in the browser.
//!
//! # Endpoints
//!
//! - `GET /api/kpis` - [`KpiSummary`]
//! - `GET /api/segments` - `[SegmentStat]`
//! - `GET /api/risk_distribution` - `[RiskDistributionEntry]`
//! - `GET /api/customers` - `[Customer]`
//! - `GET /api/metrics` - [`ModelMetrics`]
//! - `POST /api/predict` - [`PredictionResult`]
//! - `GET /health` - [`HealthStatus`]

pub mod endpoints;
pub mod error;
#[cfg(feature = "native")]
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use endpoints::{resolve_base, Endpoint, DEFAULT_DEV_ORIGIN};
pub use error::{FetchError, FetchResult};
#[cfg(feature = "native")]
pub use http::HttpTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    Customer, HealthStatus, KpiSummary, ModelMetrics, PredictionResult, RiskDistributionEntry,
    SegmentStat,
};
use crate::predict::PredictionPayload;

/// Raw JSON exchange with the backend.
///
/// Implementations map connection failures to [`FetchError::Network`] and
/// non-2xx responses to [`FetchError::Status`]. Futures are not `Send` so the
/// browser transport can implement this directly.
#[async_trait(?Send)]
pub trait Transport {
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value>;

    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> FetchResult<Value>;
}

/// Typed client over a [`Transport`]
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn kpis(&self) -> FetchResult<KpiSummary> {
        self.get(Endpoint::Kpis).await
    }

    pub async fn segments(&self) -> FetchResult<Vec<SegmentStat>> {
        self.get(Endpoint::Segments).await
    }

    pub async fn risk_distribution(&self) -> FetchResult<Vec<RiskDistributionEntry>> {
        self.get(Endpoint::RiskDistribution).await
    }

    pub async fn customers(&self) -> FetchResult<Vec<Customer>> {
        self.get(Endpoint::Customers).await
    }

    pub async fn model_metrics(&self) -> FetchResult<ModelMetrics> {
        self.get(Endpoint::Metrics).await
    }

    pub async fn health(&self) -> FetchResult<HealthStatus> {
        self.get(Endpoint::Health).await
    }

    /// Submit a prediction request
    pub async fn predict(&self, payload: &PredictionPayload) -> FetchResult<PredictionResult> {
        let body = payload.to_json();
        let value = self.transport.post_json(Endpoint::Predict, &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> FetchResult<R> {
        let value = self.transport.get_json(endpoint).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::debug!(endpoint = endpoint.path(), error = %e, "Unexpected response shape");
            FetchError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::mock::ScriptedTransport;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_decodes_kpis() {
        let transport = ScriptedTransport::default();
        transport.respond(
            Endpoint::Kpis,
            Ok(json!({"total_revenue": 1000.0, "revenue_at_risk": 250.0, "churn_rate_pct": 26.5})),
        );

        let client = ApiClient::new(transport.clone());
        let kpis = client.kpis().await.unwrap();

        assert_eq!(kpis.total_revenue, 1000.0);
        assert_eq!(transport.calls(Endpoint::Kpis), 1);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let transport = ScriptedTransport::default();
        transport.respond(Endpoint::Metrics, Ok(json!({})));

        let client = ApiClient::new(transport);
        let err = client.model_metrics().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_status_error_passes_through() {
        let transport = ScriptedTransport::default();
        transport.respond(Endpoint::Segments, Err(FetchError::status(503, "down")));

        let client = ApiClient::new(transport);
        let err = client.segments().await.unwrap_err();

        assert_eq!(err, FetchError::status(503, "down"));
    }
}
