//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{
    cues::{CueEvent, QueuedCue},
    error::{AppError, TimerError},
    state::{Configuration, Phase, TimerSnapshot},
    utils::display,
};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a response whose status reflects the timer
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: timer_status(&timer).to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Short status word for a snapshot
pub fn timer_status(timer: &TimerSnapshot) -> &'static str {
    match (timer.phase, timer.running) {
        (Phase::Idle, _) => "idle",
        (Phase::Finished, _) => "finished",
        (_, true) => "running",
        (_, false) => "paused",
    }
}

/// Rendered view of the timer for display clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayView {
    pub countdown: String,
    pub status_text: String,
    pub period_label: String,
    /// Session progress in `[0, 1]`
    pub progress: f64,
    /// Present once the session is finished
    pub summary: Option<String>,
}

impl DisplayView {
    pub fn new(timer: &TimerSnapshot, config: &Configuration) -> Self {
        Self {
            countdown: display::format_time(timer.time_remaining),
            status_text: display::status_text(timer),
            period_label: display::period_label(timer).to_string(),
            progress: display::progress(timer, config),
            summary: timer.is_finished().then(|| display::summary(config)),
        }
    }
}

/// Enhanced status response with display and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timer: TimerSnapshot,
    pub display: DisplayView,
    pub config: Configuration,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response for a cue preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuePreviewResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub cue: CueEvent,
    /// False when the cue has no sound under the current strategy
    pub playing: bool,
}

impl CuePreviewResponse {
    pub fn new(queued: &QueuedCue) -> Self {
        let playing = queued.sound.is_some();
        let message = if playing {
            format!("Playing {}", queued.cue)
        } else {
            format!("Cue {} has no sound", queued.cue)
        };
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            cue: queued.cue,
            playing,
        }
    }
}

/// Body returned for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::Timer(TimerError::InvalidConfiguration(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Timer(TimerError::InvalidTransition { .. })
            | AppError::Timer(TimerError::InvalidState { .. }) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LockPoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if code.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (code, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
