//! JSON-over-HTTP front end running the same scan as the CLI.

pub mod handlers;

use crate::error::Result;
use crate::types::config::AppConfig;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub struct AppState {
    pub config: AppConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/scan", post(handlers::scan))
        .route("/presets", get(handlers::list_presets))
        .route("/presets/:id", get(handlers::get_preset))
        .route("/history", get(handlers::history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves until the process is stopped.
pub async fn run(config: AppConfig, bind: &str) -> Result<()> {
    let state = Arc::new(AppState { config });
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "listening");
    eprintln!("gh-visibility listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
