//! plum-api - HTTP responder for note sync exchanges

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use config::AppConfig;
use routes::{app_router, AppState};

/// Bind `config.bind_addr` and serve the sync endpoint until the process exits
pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let config = Arc::new(config);
    tracing::info!("Starting plum sync daemon with config: {:?}", config);

    let state = AppState::from_config(config);
    let bind_addr = state.config.bind_addr.clone();
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("plum sync daemon listening on {}", bind_addr);
    axum::serve(listener, router).await
}
