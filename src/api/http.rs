//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{bots, index, logs, webhook};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Bots post from anywhere; allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page
        .route("/", get(index::index))
        .route("/health", get(health_check))
        // Webhook ingress
        .route("/webhook/bot_data", post(webhook::receive_bot_data))
        .route("/webhook/bot_status", post(webhook::receive_bot_data))
        // Queries
        .route("/api/bots", get(bots::get_bots))
        .route("/logs", get(logs::get_logs))
        .route("/logs/clear", post(logs::clear_logs))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
