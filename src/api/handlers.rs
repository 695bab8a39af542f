//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use tracing::info;

use crate::{
    cues::CueEvent,
    error::AppError,
    state::{AppState, Configuration},
};
use super::responses::{
    timer_status, ApiResponse, CuePreviewResponse, DisplayView, HealthResponse, StatusResponse,
};

/// Handle POST /start - Start or resume the session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.start()?;
    info!("Start endpoint called");
    Ok(Json(ApiResponse::new("Timer started".to_string(), timer)))
}

/// Handle POST /pause - Pause the session
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.pause()?;
    info!("Pause endpoint called");
    Ok(Json(ApiResponse::new("Timer paused".to_string(), timer)))
}

/// Handle POST /reset - Return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    let timer = state.reset()?;
    info!("Reset endpoint called");
    Ok(Json(ApiResponse::new("Timer reset".to_string(), timer)))
}

/// Handle GET /config - Return the session configuration
pub async fn get_config_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Configuration>, AppError> {
    Ok(Json(state.get_config()?))
}

/// Handle PUT /config - Replace the session configuration
pub async fn put_config_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Configuration>, JsonRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let Json(config) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let timer = state.configure(config)?;
    info!("Config endpoint called");
    Ok(Json(ApiResponse::new("Configuration updated".to_string(), timer)))
}

/// Handle POST /cues/:cue/test - Play one cue's sound without touching the session
pub async fn cue_preview_handler(
    State(state): State<Arc<AppState>>,
    Path(cue): Path<String>,
) -> Result<Json<CuePreviewResponse>, AppError> {
    let cue: CueEvent = cue.parse().map_err(AppError::BadRequest)?;
    let queued = state.preview(cue)?;
    Ok(Json(CuePreviewResponse::new(&queued)))
}

/// Handle GET /status - Return timer state and its rendered view
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, AppError> {
    let timer = state.get_snapshot()?;
    let config = state.get_config()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        status: timer_status(&timer).to_string(),
        display: DisplayView::new(&timer, &config),
        timer,
        config,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
