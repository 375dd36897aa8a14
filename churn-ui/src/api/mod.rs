//! HTTP API Client
//!
//! `gloo-net` transport for the shared churn client, plus base URL
//! resolution from the page location and a local storage override.

use async_trait::async_trait;
use churn_dashboard::client::{resolve_base, Endpoint, FetchError, FetchResult, Transport};
use churn_dashboard::client::DEFAULT_DEV_ORIGIN;
use gloo_net::http::{Request, Response};
use serde_json::Value;

/// Local storage key of the API base override
pub const API_URL_KEY: &str = "churn_api_url";

/// Get the API base URL.
///
/// A local storage override wins; otherwise pages served over http(s) use
/// relative paths and pages opened from disk use the development backend.
pub fn get_api_base() -> String {
    let window = web_sys::window();

    let configured = window
        .as_ref()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    let protocol = window.as_ref().and_then(|w| w.location().protocol().ok());

    resolve_base(configured.as_deref(), protocol.as_deref(), DEFAULT_DEV_ORIGIN)
}

/// Browser transport over `fetch`
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Transport for the current page
    pub fn from_location() -> Self {
        Self::new(get_api_base())
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    async fn read_json(response: Response) -> FetchResult<Value> {
        if !response.ok() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::status(response.status(), message));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value> {
        let response = Request::get(&self.url(endpoint))
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> FetchResult<Value> {
        let response = Request::post(&self.url(endpoint))
            .json(body)
            .map_err(|e| FetchError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Self::read_json(response).await
    }
}
