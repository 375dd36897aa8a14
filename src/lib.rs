//! # Churn Dashboard
//!
//! Client for a churn-prediction backend. Fetches precomputed KPIs, segment
//! churn rates, the risk distribution, high-risk customers and model metrics,
//! renders them as dashboard widgets and submits live prediction requests.
//!
//! ## Modules
//!
//! - [`models`]: Backend payloads
//! - [`client`]: Typed API client over a pluggable [`client::Transport`]
//! - [`view`]: Widget view models, chart registry and the [`view::WidgetSink`] seam
//! - [`dashboard`]: Fetchers and the prediction submission flow
//! - [`predict`]: Form coercion and the submit guard
//! - [`nav`]: Tab navigation
//! - [`report`]: Plain-text rendering of the widgets
//! - `server`: Static host for the browser UI (native only)
//!
//! Everything except `server`, `logging`, config loading and the `reqwest`
//! transport compiles to wasm32, so the browser UI drives the same controller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use churn_dashboard::client::{ApiClient, HttpTransport};
//! use churn_dashboard::config::Config;
//! use churn_dashboard::dashboard::Dashboard;
//! use churn_dashboard::view::ViewState;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(HttpTransport::from_config(&config.api));
//!     let dashboard = Dashboard::new(client, ViewState::new()).with_config(&config.dashboard);
//!
//!     dashboard.load_all().await;
//!     print!("{}", churn_dashboard::report::render_dashboard(&dashboard.sink().snapshot()));
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod format;
#[cfg(feature = "native")]
pub mod logging;
pub mod models;
pub mod nav;
pub mod predict;
pub mod report;
#[cfg(feature = "native")]
pub mod server;
pub mod theme;
pub mod view;

// Re-export top-level types for convenience
pub use client::{ApiClient, Endpoint, FetchError, FetchResult, Transport};

pub use config::{ApiConfig, Config, DashboardConfig, LoggingConfig, ServerConfig};
#[cfg(feature = "native")]
pub use config::ConfigError;

pub use dashboard::{Dashboard, LoadReport, SubmitError};

pub use models::{
    Customer, KpiSummary, ModelMetrics, PredictionResult, RiskBucket, RiskDistributionEntry,
    SegmentStat,
};

pub use nav::{NavError, NavState, View};

pub use predict::{PredictionForm, PredictionPayload, SubmitButton, SubmitControl, SubmitGuard};

pub use view::{DashboardView, Notice, NoticeLevel, ViewState, WidgetId, WidgetSink};
