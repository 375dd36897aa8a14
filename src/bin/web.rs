//! Churn Dashboard Server
//!
//! Serves the built browser UI (`churn-ui/dist` by default).
//!
//! Run with: cargo run --bin churn-web
//!
//! # Configuration
//!
//! Read from the standard config locations, then environment variables:
//! - `CHURN_SERVER_HOST`: Host to bind to (default: 127.0.0.1)
//! - `CHURN_SERVER_PORT`: Port to listen on (default: 8084)
//! - `CHURN_STATIC_DIR`: Built UI directory (default: churn-ui/dist)
//! - `RUST_LOG`: Log filter (default: from `[logging]`)

use churn_dashboard::config::Config;
use churn_dashboard::server::serve;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    churn_dashboard::logging::init(&config.logging);

    tracing::info!("Starting churn dashboard server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static directory: {}", config.server.static_dir);
    match config.api.base_url.as_deref() {
        Some(base) => tracing::info!("Configured backend: {}", base),
        None => tracing::info!("Backend: same origin, or {} when opened from disk", config.api.dev_origin),
    }

    serve(config.server).await?;
    Ok(())
}
