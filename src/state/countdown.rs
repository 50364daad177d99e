//! Single-shot cancellable countdown

/// Lifecycle of one countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Inactive,
    Running,
    Fired,
}

/// A single-shot, cancellable countdown, independent of what it gates.
///
/// Owned by exactly one controller; all mutation goes through
/// [`start`](Self::start), [`tick`](Self::tick) and
/// [`cancel`](Self::cancel). Completion is reported at most once per
/// `start` call.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    phase: CountdownPhase,
    remaining: u64,
}

impl CountdownTimer {
    /// Create an inactive countdown
    pub fn new() -> Self {
        Self {
            phase: CountdownPhase::Inactive,
            remaining: 0,
        }
    }

    /// Begin counting down from `seconds`.
    ///
    /// Starting while already running restarts from the full value; the
    /// count is never additive and never resumes a partial count.
    pub fn start(&mut self, seconds: u64) {
        self.phase = CountdownPhase::Running;
        self.remaining = seconds.max(1);
    }

    /// Stop the countdown entirely. No-op when already inactive.
    pub fn cancel(&mut self) {
        self.phase = CountdownPhase::Inactive;
        self.remaining = 0;
    }

    /// Advance by one second.
    ///
    /// Returns `true` exactly once, on the tick that reaches zero. Ticks
    /// while inactive or after firing are dropped, which is what makes a
    /// tick racing a cancel harmless: the phase is checked here, at the
    /// point of effect.
    pub fn tick(&mut self) -> bool {
        if self.phase != CountdownPhase::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.phase = CountdownPhase::Fired;
            return true;
        }
        false
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Seconds left, while running
    pub fn remaining(&self) -> Option<u64> {
        if self.phase == CountdownPhase::Running {
            Some(self.remaining)
        } else {
            None
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_fires_once() {
        let mut timer = CountdownTimer::new();
        timer.start(3);
        assert_eq!(timer.remaining(), Some(3));
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.phase(), CountdownPhase::Fired);
        // further ticks stay silent until the next start
        assert!(!timer.tick());
        assert!(!timer.tick());
    }

    #[test]
    fn restart_resets_to_full_value() {
        let mut timer = CountdownTimer::new();
        timer.start(5);
        timer.tick();
        timer.tick();
        timer.start(5);
        assert_eq!(timer.remaining(), Some(5));
    }

    #[test]
    fn cancel_is_total_and_idempotent() {
        let mut timer = CountdownTimer::new();
        timer.start(4);
        timer.tick();
        timer.cancel();
        assert_eq!(timer.phase(), CountdownPhase::Inactive);
        assert_eq!(timer.remaining(), None);
        timer.cancel();
        assert_eq!(timer.phase(), CountdownPhase::Inactive);
    }

    #[test]
    fn tick_after_cancel_never_fires() {
        let mut timer = CountdownTimer::new();
        timer.start(1);
        timer.cancel();
        assert!(!timer.tick());
        assert_eq!(timer.phase(), CountdownPhase::Inactive);
    }

    #[test]
    fn start_can_follow_a_fire() {
        let mut timer = CountdownTimer::new();
        timer.start(1);
        assert!(timer.tick());
        timer.start(2);
        assert_eq!(timer.remaining(), Some(2));
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn zero_length_start_is_clamped_to_one() {
        let mut timer = CountdownTimer::new();
        timer.start(0);
        assert_eq!(timer.remaining(), Some(1));
        assert!(timer.tick());
    }
}
