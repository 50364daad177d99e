//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod continuation;

// Re-export main items
pub use continuation::{continuation_task, ControllerEvent, FireHook};
