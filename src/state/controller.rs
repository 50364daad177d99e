//! Continuation controller state machine
//!
//! One controller instance gates one continuation action behind a
//! cancellable countdown. The same machine serves both uses: the
//! next-episode prompt (armed when playback approaches the end) and the
//! random-pick navigation (armed directly on user request). All
//! transitions run through a single authoritative function per input
//! kind, so overlapping progress samples and user events cannot race
//! each other into inconsistent cancel/countdown state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::countdown::{CountdownPhase, CountdownTimer};
use super::progress::ProgressSample;
use super::visibility::{self, VisibilityMode};

/// Threshold set for display and arming decisions.
///
/// The display window (30s), arm window (2s) and countdown length (5s)
/// are three independent constants; keep them separately tunable.
#[derive(Debug, Clone, Copy)]
pub struct Tunables {
    /// Seconds from the end inside which the affordance always shows
    pub display_window_secs: f64,
    /// Played fraction past which the affordance shows on hover
    pub hover_ratio: f64,
    /// Seconds from the end inside which the countdown arms
    pub arm_window_secs: f64,
    /// Countdown length once armed
    pub countdown_secs: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            display_window_secs: 30.0,
            hover_ratio: 0.9,
            arm_window_secs: 2.0,
            countdown_secs: 5,
        }
    }
}

/// What arms the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmCondition {
    /// Arm on the edge where playback enters the arm window (next episode)
    OnApproach,
    /// Arm immediately via [`ContinuationController::arm_request`] (random pick)
    OnRequest,
}

/// Controller lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPhase {
    Idle,
    Armed,
    UserCancelled,
    Fired,
}

/// Per-sample inputs resolved by the caller: UI chrome state, the user's
/// autoplay preference, and the continuation target if one exists.
#[derive(Debug, Clone)]
pub struct SampleContext<T> {
    pub controls_visible: bool,
    pub autoplay_enabled: bool,
    pub target: Option<T>,
}

/// Snapshot of controller state for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerView {
    pub phase: ControllerPhase,
    pub mode: VisibilityMode,
    pub countdown: Option<u64>,
    pub suppressed: bool,
}

impl ControllerView {
    pub fn idle() -> Self {
        Self {
            phase: ControllerPhase::Idle,
            mode: VisibilityMode::Hidden,
            countdown: None,
            suppressed: false,
        }
    }
}

/// The countdown-gated continuation state machine.
///
/// Generic over the target `T` the action fires with. `fired_for`
/// remembers the last target fired, so a fixed target fires at most once
/// no matter how often playback re-enters the arm window; only a target
/// change (or a fresh session) opens a new arming episode.
#[derive(Debug)]
pub struct ContinuationController<T: Clone + PartialEq> {
    arm_condition: ArmCondition,
    tunables: Tunables,
    phase: ControllerPhase,
    countdown: CountdownTimer,
    user_cancelled: bool,
    suppressed: bool,
    target: Option<T>,
    fired_for: Option<T>,
    mode: VisibilityMode,
    last_remaining: Option<f64>,
}

impl<T: Clone + PartialEq> ContinuationController<T> {
    pub fn new(arm_condition: ArmCondition, tunables: Tunables) -> Self {
        Self {
            arm_condition,
            tunables,
            phase: ControllerPhase::Idle,
            countdown: CountdownTimer::new(),
            user_cancelled: false,
            suppressed: false,
            target: None,
            fired_for: None,
            mode: VisibilityMode::Hidden,
            last_remaining: None,
        }
    }

    /// Process one playback progress sample.
    ///
    /// Only meaningful for `OnApproach` controllers; a request-armed
    /// controller has no relationship to playback progress.
    pub fn observe(&mut self, sample: &ProgressSample, ctx: SampleContext<T>) {
        if self.arm_condition == ArmCondition::OnRequest {
            return;
        }

        self.mode = visibility::evaluate(
            sample,
            ctx.controls_visible,
            self.suppressed,
            &self.tunables,
        );
        self.last_remaining = sample.is_ready().then(|| sample.remaining());
        self.target = ctx.target;

        // a fired controller returns to idle once its target changes
        if self.phase == ControllerPhase::Fired && self.target != self.fired_for {
            self.phase = ControllerPhase::Idle;
        }

        let in_window =
            sample.is_ready() && sample.remaining() <= self.tunables.arm_window_secs;

        if !in_window {
            // rewound (or never approached): tear down and allow a full
            // re-cycle on the next approach
            if self.phase != ControllerPhase::Idle {
                debug!("left arm window, disarming");
                self.countdown.cancel();
                self.phase = ControllerPhase::Idle;
            }
            self.user_cancelled = false;
            return;
        }

        match self.phase {
            ControllerPhase::Idle => {
                let armable = self.mode == VisibilityMode::Always
                    && !self.user_cancelled
                    && ctx.autoplay_enabled
                    && self.target.is_some()
                    && self.fired_for != self.target;
                if armable {
                    debug!(
                        countdown = self.tunables.countdown_secs,
                        "entered arm window, starting countdown"
                    );
                    self.countdown.start(self.tunables.countdown_secs);
                    self.phase = ControllerPhase::Armed;
                }
            }
            ControllerPhase::Armed => {
                // repeated in-window samples must not restart the count;
                // losing visibility or the target mid-count disarms
                if self.mode == VisibilityMode::Hidden || self.target.is_none() {
                    debug!("affordance hidden while armed, disarming");
                    self.countdown.cancel();
                    self.phase = ControllerPhase::Idle;
                }
            }
            ControllerPhase::UserCancelled | ControllerPhase::Fired => {}
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the continuation target on the tick that completes the
    /// countdown, at most once per arming episode. The countdown phase is
    /// checked here, at the point of effect, so a tick that raced a
    /// cancel is dropped rather than fired.
    pub fn tick(&mut self) -> Option<T> {
        if self.phase != ControllerPhase::Armed {
            return None;
        }
        if self.countdown.tick() {
            self.phase = ControllerPhase::Fired;
            self.fired_for = self.target.clone();
            return self.target.clone();
        }
        None
    }

    /// User toggle: cancel a running countdown, or resume a cancelled one
    /// from the full countdown length (never from a partial count).
    pub fn toggle(&mut self) {
        match self.phase {
            ControllerPhase::Armed => {
                debug!("countdown cancelled by user");
                self.countdown.cancel();
                self.user_cancelled = true;
                self.phase = ControllerPhase::UserCancelled;
            }
            ControllerPhase::UserCancelled => {
                debug!("countdown resumed by user");
                self.user_cancelled = false;
                self.countdown.start(self.tunables.countdown_secs);
                self.phase = ControllerPhase::Armed;
            }
            _ => {}
        }
    }

    /// User dismiss: hide the affordance for the rest of the session, or,
    /// close to the end, act as the cancel toggle instead. The two
    /// buttons share a control surface but mean different things
    /// depending on how close to the end the user is.
    pub fn dismiss(&mut self) {
        let near_end = self
            .last_remaining
            .map(|r| r <= self.tunables.arm_window_secs)
            .unwrap_or(false);
        if near_end {
            self.toggle();
        } else {
            debug!("affordance suppressed for this session");
            self.suppressed = true;
            self.mode = VisibilityMode::Hidden;
        }
    }

    /// Arm immediately for `target`. Only `OnRequest` controllers honor
    /// this; each request opens a fresh arming episode.
    pub fn arm_request(&mut self, target: T) {
        if self.arm_condition != ArmCondition::OnRequest {
            return;
        }
        debug!(
            countdown = self.tunables.countdown_secs,
            "armed on request"
        );
        self.user_cancelled = false;
        self.fired_for = None;
        self.target = Some(target);
        self.mode = VisibilityMode::Always;
        self.countdown.start(self.tunables.countdown_secs);
        self.phase = ControllerPhase::Armed;
    }

    /// Reset for a new playback session: cancel everything and clear the
    /// session-scoped suppression and cancel flags.
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.phase = ControllerPhase::Idle;
        self.user_cancelled = false;
        self.suppressed = false;
        self.target = None;
        self.fired_for = None;
        self.mode = VisibilityMode::Hidden;
        self.last_remaining = None;
    }

    /// Whether the countdown is actively running (the async shell holds
    /// its tick interval only while this is true)
    pub fn is_counting(&self) -> bool {
        self.countdown.phase() == CountdownPhase::Running
    }

    pub fn view(&self) -> ControllerView {
        ControllerView {
            phase: self.phase,
            mode: self.mode,
            countdown: self.countdown.remaining(),
            suppressed: self.suppressed,
        }
    }
}
