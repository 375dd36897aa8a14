//! Native HTTP Transport
//!
//! `reqwest` implementation of [`Transport`] used by the CLI.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use super::endpoints::{url, Endpoint};
use super::{FetchError, FetchResult, Transport};
use crate::config::ApiConfig;

/// Backend transport over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: String,
}

impl HttpTransport {
    /// Create a transport for an absolute base URL (e.g. "http://127.0.0.1:8000")
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            config.resolved_base(None),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn read_json(endpoint: Endpoint, response: Response) -> FetchResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint = endpoint.path(), status = status.as_u16(), "Backend returned an error status");
            return Err(FetchError::status(status.as_u16(), message));
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value> {
        let response = self
            .client
            .get(url(&self.base, endpoint))
            .send()
            .await
            .map_err(network_error)?;

        Self::read_json(endpoint, response).await
    }

    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> FetchResult<Value> {
        let response = self
            .client
            .post(url(&self.base, endpoint))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        Self::read_json(endpoint, response).await
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Network("request timed out".to_string())
    } else if err.is_connect() {
        FetchError::Network(format!("backend unavailable: {}", err))
    } else {
        FetchError::Network(err.to_string())
    }
}
