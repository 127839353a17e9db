//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/next", post(next_level_handler))
        .route("/prev", post(prev_level_handler))
        .route("/break/start", post(start_break_handler))
        .route("/break/end", post(end_break_handler))
        .route("/break/skip", post(skip_break_handler))
        .route("/break/resume", post(resume_break_handler))
        .route("/structure", get(structure_handler).put(load_structure_handler))
        .route("/levels", put(update_levels_handler))
        .route("/break-config", put(update_break_config_handler))
        .route("/level-duration", put(update_level_duration_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
