//! Encore - countdown-gated continuation control for media playback
//!
//! This library decides, from live playback progress, when to surface a
//! "continue" affordance, runs a cancellable countdown, and dispatches a
//! follow-up action exactly once per target: the next-episode autoplay
//! prompt and the pick-random-and-navigate flow share one controller.

pub mod api;
pub mod config;
pub mod media;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
