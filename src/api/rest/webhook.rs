//! Webhook endpoint - bot event ingress

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Method, Uri},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::ApiError;
use crate::api::ingress::capture_request;
use crate::api::state::AppState;

/// Response for POST /webhook/bot_data
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub message: &'static str,
    /// Timestamp the store assigned to the record
    pub received_at: String,
}

/// POST /webhook/bot_data, /webhook/bot_status - Log the request and refresh the bot table
pub async fn receive_bot_data(
    State(state): State<Arc<AppState>>,
    remote: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let request = capture_request(
        &method,
        &uri,
        &headers,
        remote.map(|ConnectInfo(addr)| addr),
        &body,
    );
    let event = request
        .json_data
        .as_ref()
        .and_then(|data| data.get("event"))
        .and_then(|event| event.as_str())
        .unwrap_or("-")
        .to_string();

    let (record, refresh) = state.ingest(request)?;
    info!(
        path = %uri.path(),
        event = %event,
        bots = refresh.bots.len(),
        "received bot data"
    );

    Ok(Json(WebhookAck {
        status: "success",
        message: "Data received successfully",
        received_at: record.timestamp,
    }))
}
