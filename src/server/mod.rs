//! Dashboard Server
//!
//! Serves the built browser UI with Axum.
//!
//! # Endpoints
//!
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status, version and uptime
//! - `GET /*` - Files of the built UI, `index.html` for directories
//!
//! The churn backend itself is a separate service; the UI talks to it
//! directly using the base URL rules of [`crate::client::resolve_base`].

pub mod error;
pub mod health;

pub use error::{ServerError, ServerResult};

use axum::{http::HeaderValue, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Shared state for the health handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Build the router with health routes, static files and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(health::liveness))
        .route("/", get(health::full_health));

    let static_files =
        ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/health", health_routes)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the dashboard server
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let static_dir = Path::new(&config.static_dir);
    if !static_dir.is_dir() {
        return Err(ServerError::StaticDirMissing(static_dir.to_path_buf()));
    }

    let addr = config.addr();
    let router = build_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Churn dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Churn dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app(cors_origins: Vec<String>) -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<!DOCTYPE html><title>Churn Intelligence</title>",
        )
        .unwrap();
        std::fs::write(dir.path().join("churn-ui.js"), "export default {}").unwrap();

        let config = ServerConfig {
            static_dir: dir.path().to_string_lossy().to_string(),
            cors_origins,
            ..ServerConfig::default()
        };

        (build_router(AppState::new(config)), dir)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app(Vec::new());

        let response = app.oneshot(get("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app(Vec::new());

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_serves_index_for_root() {
        let (app, _dir) = create_test_app(Vec::new());

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Churn Intelligence"));
    }

    #[tokio::test]
    async fn test_serves_assets_and_404s() {
        let (app, _dir) = create_test_app(Vec::new());

        let response = app.clone().oneshot(get("/churn-ui.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/missing.wasm")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let (app, _dir) = create_test_app(vec!["http://localhost:3000".to_string()]);

        let request = Request::builder()
            .uri("/health/live")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let request = Request::builder()
            .uri("/health/live")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_serve_requires_static_dir() {
        let config = ServerConfig {
            static_dir: "/nonexistent/churn-ui/dist".to_string(),
            ..ServerConfig::default()
        };

        let err = serve(config).await.unwrap_err();

        assert!(matches!(err, ServerError::StaticDirMissing(_)));
    }
}
