//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    clock::{Action, ClockFacade},
    state::{
        structure::{validate_break_config, validate_level_duration, validate_levels},
        AppState, BlindLevel, BreakConfig, StructureError, TournamentStructure,
    },
};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, LevelDurationRequest, StatusResponse,
};

/// Rejection returned for payloads that fail validation
pub type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(error: StructureError) -> Rejection {
    warn!("Rejected structure payload: {}", error);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(error.to_string())),
    )
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).start();
    Json(ApiResponse::from_dispatch("Clock started", outcome))
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).pause();
    Json(ApiResponse::from_dispatch("Clock paused", outcome))
}

/// Handle POST /toggle - Pause if running, start otherwise
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).toggle();
    Json(ApiResponse::from_dispatch("Clock toggled", outcome))
}

/// Handle POST /reset - Restart the current level's countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).reset();
    Json(ApiResponse::from_dispatch("Level timer reset", outcome))
}

/// Handle POST /next - Move to the next level
pub async fn next_level_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).next_level();
    Json(ApiResponse::from_dispatch("Advanced to next level", outcome))
}

/// Handle POST /prev - Move back one level
pub async fn prev_level_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).prev_level();
    Json(ApiResponse::from_dispatch("Returned to previous level", outcome))
}

/// Handle POST /break/start - Put the clock on break
pub async fn start_break_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = state.dispatch(Action::StartBreak);
    Json(ApiResponse::from_dispatch("Break started", outcome))
}

/// Handle POST /break/end - End the current break
pub async fn end_break_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = state.dispatch(Action::EndBreak);
    Json(ApiResponse::from_dispatch("Break ended", outcome))
}

/// Handle POST /break/skip - Skip the current break
pub async fn skip_break_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).skip_break();
    Json(ApiResponse::from_dispatch("Break skipped", outcome))
}

/// Handle POST /break/resume - Count down a pending break
pub async fn resume_break_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let outcome = ClockFacade::new(state).start_break_timer();
    Json(ApiResponse::from_dispatch("Break timer running", outcome))
}

/// Handle PUT /structure - Load a new tournament structure
pub async fn load_structure_handler(
    State(state): State<Arc<AppState>>,
    Json(structure): Json<TournamentStructure>,
) -> Result<Json<ApiResponse>, Rejection> {
    structure.validate().map_err(reject)?;
    info!(
        "Loading structure: {} levels, {}s per level",
        structure.blind_levels.len(),
        structure.level_duration
    );
    let outcome = state.dispatch(Action::LoadStructure(structure));
    Ok(Json(ApiResponse::from_dispatch("Structure loaded", outcome)))
}

/// Handle PUT /levels - Replace the blind levels
pub async fn update_levels_handler(
    State(state): State<Arc<AppState>>,
    Json(levels): Json<Vec<BlindLevel>>,
) -> Result<Json<ApiResponse>, Rejection> {
    validate_levels(&levels).map_err(reject)?;
    let outcome = state.dispatch(Action::UpdateBlindLevels(levels));
    Ok(Json(ApiResponse::from_dispatch("Blind levels updated", outcome)))
}

/// Handle PUT /break-config - Replace the break settings
pub async fn update_break_config_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<BreakConfig>,
) -> Result<Json<ApiResponse>, Rejection> {
    validate_break_config(&config).map_err(reject)?;
    let outcome = state.dispatch(Action::UpdateBreakConfig(config));
    Ok(Json(ApiResponse::from_dispatch("Break settings updated", outcome)))
}

/// Handle PUT /level-duration - Change the length of a level
pub async fn update_level_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LevelDurationRequest>,
) -> Result<Json<ApiResponse>, Rejection> {
    validate_level_duration(request.level_duration).map_err(reject)?;
    let outcome = state.dispatch(Action::UpdateLevelDuration(request.level_duration));
    Ok(Json(ApiResponse::from_dispatch("Level duration updated", outcome)))
}

/// Handle GET /status - Return the clock and its derived fields
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::new(&state))
}

/// Handle GET /structure - Return the structure currently on the clock
pub async fn structure_handler(State(state): State<Arc<AppState>>) -> Json<TournamentStructure> {
    Json(state.snapshot().structure())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
