//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::EpisodeMeta;
use crate::state::{ContinuationAction, ControllerView};

/// API response structure for event endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: ControllerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, view: ControllerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            view,
        }
    }

    /// The event was forwarded to a controller
    pub fn accepted(message: String, view: ControllerView) -> Self {
        Self::new("accepted".to_string(), message, view)
    }

    /// The request was valid but there was nothing to do
    pub fn noop(message: String, view: ControllerView) -> Self {
        Self::new("noop".to_string(), message, view)
    }
}

/// Full status response for the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub autoplay_enabled: bool,
    pub session_loaded: bool,
    pub next_episode: Option<EpisodeMeta>,
    pub episode: ControllerView,
    pub random: ControllerView,
    pub last_action: Option<ContinuationAction>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
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
