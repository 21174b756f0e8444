//! Bots endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::types::BotRegistry;

/// Response for GET /api/bots
#[derive(Debug, Serialize)]
pub struct BotsResponse {
    pub status: &'static str,
    pub total: usize,
    pub bots: BotRegistry,
}

/// GET /api/bots - Re-derive the bot table from the full log
pub async fn get_bots(State(state): State<Arc<AppState>>) -> Json<BotsResponse> {
    let bots = state.refresh().bots;

    Json(BotsResponse {
        status: "success",
        total: bots.len(),
        bots,
    })
}
