//! Shamba API /v1: REST endpoints
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};

pub use config::{FileConfig, Overrides, ServiceConfig};
pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/qr/product", post(handlers::product_qr))
        .route("/v1/qr/farmer", post(handlers::farmer_qr))
        .route("/v1/qr/logistics", post(handlers::logistics_qr))
        .route("/v1/qr/batch", post(handlers::batch_qr))
        .route("/v1/verify", post(handlers::verify))
        .route("/v1/analytics", post(handlers::analytics))
        .route("/v1/metrics", get(handlers::metrics))
        .route("/v1/health", get(handlers::health))
        .with_state(state)
        .layer(middleware::trace())
        .layer(middleware::cors())
}

pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.trace).context("failed to register metrics")?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("Shamba API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
