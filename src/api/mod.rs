//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/session", post(session_handler))
        .route("/progress", post(progress_handler))
        .route("/toggle", post(toggle_handler))
        .route("/dismiss", post(dismiss_handler))
        .route("/autoplay", post(autoplay_handler))
        .route("/random", post(random_handler))
        .route("/random/toggle", post(random_toggle_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
