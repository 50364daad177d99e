//! State management module
//!
//! This module contains the continuation state machine and its
//! supporting state structures.

pub mod app_state;
pub mod controller;
pub mod countdown;
pub mod progress;
pub mod visibility;

// Re-export main types
pub use app_state::{AppState, ContinuationAction};
pub use controller::{
    ArmCondition, ContinuationController, ControllerPhase, ControllerView, SampleContext, Tunables,
};
pub use countdown::{CountdownPhase, CountdownTimer};
pub use progress::{PlaybackStatus, ProgressSample};
pub use visibility::VisibilityMode;
