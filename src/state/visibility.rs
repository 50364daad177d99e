//! Display-mode policy for the continuation affordance

use serde::{Deserialize, Serialize};

use super::controller::Tunables;
use super::progress::{PlaybackStatus, ProgressSample};

/// How the affordance should currently be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    /// Shown unconditionally (near the end of playback)
    Always,
    /// Shown only while the player controls are showing
    OnHover,
    /// Not shown
    Hidden,
}

/// Map a progress sample to a display mode.
///
/// Pure and stateless: recomputed fresh on every sample. Two thresholds
/// gate the candidate mode — an absolute window from the end and a
/// relative fraction of playback. Short media would never cross an
/// absolute threshold early enough, so the relative fallback covers it;
/// for long media the tighter absolute window dominates once reached.
pub fn evaluate(
    sample: &ProgressSample,
    controls_visible: bool,
    suppressed: bool,
    tunables: &Tunables,
) -> VisibilityMode {
    if !sample.is_ready() {
        return VisibilityMode::Hidden;
    }

    let candidate = if sample.remaining() <= tunables.display_window_secs {
        VisibilityMode::Always
    } else if sample.fraction() >= tunables.hover_ratio {
        VisibilityMode::OnHover
    } else {
        VisibilityMode::Hidden
    };

    if suppressed || sample.status != PlaybackStatus::Playing {
        return VisibilityMode::Hidden;
    }
    if candidate == VisibilityMode::OnHover && !controls_visible {
        return VisibilityMode::Hidden;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(time: f64, duration: f64) -> ProgressSample {
        ProgressSample::new(time, duration, PlaybackStatus::Playing)
    }

    fn tunables() -> Tunables {
        Tunables::default()
    }

    #[test]
    fn hidden_while_metadata_is_loading() {
        let sample = playing(0.0, 0.0);
        assert_eq!(
            evaluate(&sample, true, false, &tunables()),
            VisibilityMode::Hidden
        );
    }

    #[test]
    fn always_inside_the_display_window() {
        let sample = playing(95.0, 120.0);
        assert_eq!(
            evaluate(&sample, false, false, &tunables()),
            VisibilityMode::Always
        );
    }

    #[test]
    fn hover_past_ratio_requires_visible_controls() {
        // 90% through a one-hour file, still far outside the 30s window
        let sample = playing(3240.0, 3600.0);
        assert_eq!(
            evaluate(&sample, true, false, &tunables()),
            VisibilityMode::OnHover
        );
        assert_eq!(
            evaluate(&sample, false, false, &tunables()),
            VisibilityMode::Hidden
        );
    }

    #[test]
    fn hidden_early_in_playback() {
        let sample = playing(10.0, 3600.0);
        assert_eq!(
            evaluate(&sample, true, false, &tunables()),
            VisibilityMode::Hidden
        );
    }

    #[test]
    fn suppression_wins_over_any_candidate() {
        let sample = playing(118.0, 120.0);
        assert_eq!(
            evaluate(&sample, true, true, &tunables()),
            VisibilityMode::Hidden
        );
    }

    #[test]
    fn hidden_unless_actually_playing() {
        for status in [
            PlaybackStatus::Idle,
            PlaybackStatus::Paused,
            PlaybackStatus::Ended,
        ] {
            let sample = ProgressSample::new(118.0, 120.0, status);
            assert_eq!(
                evaluate(&sample, true, false, &tunables()),
                VisibilityMode::Hidden
            );
        }
    }

    #[test]
    fn evaluation_is_pure() {
        let sample = playing(115.0, 120.0);
        let first = evaluate(&sample, true, false, &tunables());
        let second = evaluate(&sample, true, false, &tunables());
        assert_eq!(first, second);
    }

    #[test]
    fn short_media_reaches_always_via_relative_fallback() {
        // 4-minute clip: 90% leaves only 24s, already under the absolute
        // window, so the absolute rule dominates here as well.
        let sample = playing(216.0, 240.0);
        assert_eq!(
            evaluate(&sample, false, false, &tunables()),
            VisibilityMode::Always
        );
    }
}
