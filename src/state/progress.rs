//! Playback progress samples reported by the external player

use serde::{Deserialize, Serialize};

/// Player status as reported alongside each progress sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Ended,
}

/// A point-in-time snapshot of playback progress.
///
/// Samples arrive continuously from the player; `time` may move backward
/// during seeks, which is normal input and not an error. Values are
/// sanitized on construction so the rest of the pipeline never sees NaN
/// or negative seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    pub time: f64,
    pub duration: f64,
    pub status: PlaybackStatus,
}

impl ProgressSample {
    /// Create a sample, clamping non-finite or negative values to zero
    pub fn new(time: f64, duration: f64, status: PlaybackStatus) -> Self {
        Self {
            time: sanitize(time),
            duration: sanitize(duration),
            status,
        }
    }

    /// Seconds left until the end of the current media
    pub fn remaining(&self) -> f64 {
        (self.duration - self.time).max(0.0)
    }

    /// Fraction of the media already played, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.duration > 0.0 {
            (self.time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the player has loaded enough metadata to reason about
    pub fn is_ready(&self) -> bool {
        self.duration > 0.0
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}
