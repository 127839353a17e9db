//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    clock::ClockView,
    state::{AppState, ClockState, Dispatch},
    utils::format_countdown,
};

/// API response structure for clock command endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    /// False when the command did not apply to the current clock
    pub changed: bool,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockState,
    pub view: ClockView,
}

impl ApiResponse {
    /// Build a response from a dispatch outcome
    pub fn from_dispatch(message: &str, outcome: Dispatch) -> Self {
        let message = if outcome.changed {
            message.to_string()
        } else {
            format!("{} (no change)", message)
        };
        Self {
            status: outcome.state.status.as_str().to_string(),
            message,
            changed: outcome.changed,
            timestamp: Utc::now(),
            view: ClockView::of(&outcome.state),
            clock: (*outcome.state).clone(),
        }
    }
}

/// Status response with the derived view and formatted countdown
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub clock: ClockState,
    pub view: ClockView,
    /// Countdown as `MM:SS` (or `H:MM:SS`)
    pub remaining: String,
    pub elapsed: String,
    /// One-based level number shown to players
    pub level_number: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl StatusResponse {
    /// Describe the current clock of a session
    pub fn new(state: &AppState) -> Self {
        let clock = state.snapshot();
        let (last_action, last_action_time) = state.get_last_action();
        Self {
            view: ClockView::of(&clock),
            remaining: format_countdown(clock.remaining_time),
            elapsed: format_countdown(clock.elapsed_time),
            level_number: clock.current_level + 1,
            clock: (*clock).clone(),
            uptime: state.get_uptime(),
            port: state.port,
            host: state.host.clone(),
            last_action,
            last_action_time,
        }
    }
}

/// Body of `PUT /level-duration`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDurationRequest {
    /// Seconds per level
    pub level_duration: u32,
}

/// Error body for rejected payloads
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
