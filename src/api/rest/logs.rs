//! Log endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use super::{ApiError, StatusMessage};
use crate::api::state::AppState;
use crate::types::LogRecord;

/// Response for GET /logs
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub total_logs: usize,
    pub logs: Vec<LogRecord>,
}

/// GET /logs - Every record in append order
pub async fn get_logs(State(state): State<Arc<AppState>>) -> Json<LogsResponse> {
    let logs = state.store.read_all();

    Json(LogsResponse {
        total_logs: logs.len(),
        logs,
    })
}

/// POST /logs/clear - Drop the whole log
pub async fn clear_logs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusMessage>, ApiError> {
    state.store.clear()?;
    info!("cleared request log");

    Ok(Json(StatusMessage::success("All logs cleared")))
}
