//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::{
    media::{self, CatalogItem, PlaybackSession},
    state::{AppState, PlaybackStatus, ProgressSample, SampleContext},
    tasks::ControllerEvent,
};

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Body of POST /progress
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub time: f64,
    pub duration: f64,
    pub status: PlaybackStatus,
    /// Whether the player UI chrome is currently showing
    #[serde(default)]
    pub controls_visible: bool,
}

/// Body of POST /autoplay
#[derive(Debug, Deserialize)]
pub struct AutoplayRequest {
    pub enabled: bool,
}

/// Body of POST /random
#[derive(Debug, Deserialize)]
pub struct RandomRequest {
    pub items: Vec<CatalogItem>,
}

/// Handle POST /session - Load a playback session snapshot
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Json(session): Json<PlaybackSession>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!(
        series = %session.series_id,
        episode = session.current.number,
        episodes = session.episodes.len(),
        "Session endpoint called - loading playback session"
    );

    if let Err(e) = state.load_session(session) {
        error!("Failed to store session: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // suppression and cancel state are session-scoped
    if let Err(e) = state.episode_events.send(ControllerEvent::Reset).await {
        error!("Failed to reset continuation controller: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(
        "Playback session loaded".to_string(),
        state.episode_view(),
    )))
}

/// Handle POST /progress - Feed one playback progress sample
pub async fn progress_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let sample = ProgressSample::new(request.time, request.duration, request.status);

    let target = match state.next_episode() {
        Ok(target) => target,
        Err(e) => {
            error!("Failed to resolve next episode: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let ctx = SampleContext {
        controls_visible: request.controls_visible,
        autoplay_enabled: state.autoplay_enabled(),
        target,
    };

    debug!(
        time = sample.time,
        duration = sample.duration,
        "Progress endpoint called"
    );

    if let Err(e) = state
        .episode_events
        .send(ControllerEvent::Sample { sample, ctx })
        .await
    {
        error!("Failed to forward progress sample: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(
        "Progress sample accepted".to_string(),
        state.episode_view(),
    )))
}

/// Handle POST /toggle - Cancel or resume the next-episode countdown
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Toggle endpoint called");
    if let Err(e) = state.episode_events.send(ControllerEvent::Toggle).await {
        error!("Failed to forward toggle event: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(
        "Toggle forwarded".to_string(),
        state.episode_view(),
    )))
}

/// Handle POST /dismiss - Dismiss the next-episode affordance
pub async fn dismiss_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Dismiss endpoint called");
    if let Err(e) = state.episode_events.send(ControllerEvent::Dismiss).await {
        error!("Failed to forward dismiss event: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(
        "Dismiss forwarded".to_string(),
        state.episode_view(),
    )))
}

/// Handle POST /autoplay - Set the autoplay preference
pub async fn autoplay_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AutoplayRequest>,
) -> Json<ApiResponse> {
    info!("Autoplay preference set to: {}", request.enabled);
    state.set_autoplay(request.enabled);

    Json(ApiResponse::accepted(
        format!(
            "Autoplay {}",
            if request.enabled { "enabled" } else { "disabled" }
        ),
        state.episode_view(),
    ))
}

/// Handle POST /random - Pick a random catalog item and arm navigation
pub async fn random_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RandomRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(item) = media::pick_random(&request.items) else {
        // an empty catalog is a normal outcome, not a fault
        info!("Random endpoint called with an empty catalog");
        return Ok(Json(ApiResponse::noop(
            "No catalog items to pick from".to_string(),
            state.random_view(),
        )));
    };

    info!(item = %item.id, "Random endpoint called - arming navigation countdown");
    let message = format!("Random pick armed: {}", item.title);

    if let Err(e) = state
        .random_events
        .send(ControllerEvent::Arm { target: item })
        .await
    {
        error!("Failed to arm random navigation: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(message, state.random_view())))
}

/// Handle POST /random/toggle - Cancel or resume the random-pick countdown
pub async fn random_toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Random toggle endpoint called");
    if let Err(e) = state.random_events.send(ControllerEvent::Toggle).await {
        error!("Failed to forward random toggle event: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(ApiResponse::accepted(
        "Toggle forwarded".to_string(),
        state.random_view(),
    )))
}

/// Handle GET /status - Return current controller status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.session() {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to read session: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let next_episode = session.as_ref().and_then(media::next_episode);

    Ok(Json(StatusResponse {
        autoplay_enabled: state.autoplay_enabled(),
        session_loaded: session.is_some(),
        next_episode,
        episode: state.episode_view(),
        random: state.random_view(),
        last_action: state.last_action(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
