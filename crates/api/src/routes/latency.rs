//! Latency administration endpoints.

use axum::extract::State;
use axum::response::Json;
use latency_workshop_common::LatencyMode;
use latency_workshop_latency::{LatencyModesInfo, LatencyStatus};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Body of `POST /latency`. The mode arrives as a plain string and is parsed
/// here, so unknown names never reach the manager.
#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: String,
}

/// GET /latency
pub async fn get_status(State(state): State<AppState>) -> Json<LatencyStatus> {
    Json(state.latency.status())
}

/// GET /latency/modes
pub async fn get_modes(State(state): State<AppState>) -> Json<LatencyModesInfo> {
    Json(state.latency.modes_info())
}

/// POST /latency
pub async fn set_mode(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SetModeRequest>,
) -> Result<Json<LatencyStatus>, ApiError> {
    let mode: LatencyMode = req.mode.parse()?;
    let profile = state.latency.set_mode(mode);
    Ok(Json(LatencyStatus::new(mode, profile)))
}

/// POST /latency/reset
pub async fn reset(State(state): State<AppState>) -> Json<LatencyStatus> {
    let profile = state.latency.reset_to_default();
    Json(LatencyStatus::new(state.latency.default_mode(), profile))
}
