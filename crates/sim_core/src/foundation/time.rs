//! Time management utilities

/// Simulation time for the current tick
///
/// Advanced once per tick with a fixed or measured delta. Controllers read
/// the elapsed time of the tick and the total simulated time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameTime {
    elapsed_seconds: f32,
    total_seconds: f32,
    frame_count: u64,
}

impl GameTime {
    /// Create a new game time at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of the given length in seconds
    pub fn advance(&mut self, delta_seconds: f32) {
        let delta = delta_seconds.max(0.0);
        self.elapsed_seconds = delta;
        self.total_seconds += delta;
        self.frame_count += 1;
    }

    /// Length of the current tick in seconds
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Length of the current tick in milliseconds
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_seconds * 1000.0
    }

    /// Total simulated time in seconds
    pub fn total_seconds(&self) -> f32 {
        self.total_seconds
    }

    /// Number of ticks simulated so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Ticks per second implied by the current tick length
    pub fn current_fps(&self) -> f32 {
        if self.elapsed_seconds > 0.0 {
            1.0 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// One-shot countdown used to hold gameplay for a fixed duration
///
/// `start` is ignored while a countdown is already running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountdownTimer {
    waiting: bool,
    duration_ms: f32,
    timer_ms: f32,
}

impl CountdownTimer {
    /// Create an idle countdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down `duration_ms`, unless already running
    pub fn start(&mut self, duration_ms: f32) -> bool {
        if self.waiting {
            return false;
        }
        self.waiting = true;
        self.duration_ms = duration_ms;
        self.timer_ms = 0.0;
        true
    }

    /// Advance the countdown; returns `true` on the tick it finishes
    pub fn tick(&mut self, time: &GameTime) -> bool {
        if !self.waiting {
            return false;
        }
        if self.timer_ms < self.duration_ms {
            self.timer_ms += time.elapsed_ms();
            return false;
        }
        self.waiting = false;
        self.timer_ms = 0.0;
        true
    }

    /// Whether a countdown is running
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Milliseconds accumulated by the running countdown
    pub fn elapsed_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Stop the countdown without finishing it
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time_accumulates() {
        let mut time = GameTime::new();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.frame_count(), 2);
        assert!((time.total_seconds() - 0.75).abs() < f32::EPSILON);
        assert!((time.elapsed_ms() - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_countdown_finishes_after_duration() {
        let mut time = GameTime::new();
        time.advance(0.1);
        let mut countdown = CountdownTimer::new();
        assert!(countdown.start(250.0));
        assert!(!countdown.start(1000.0));

        // 100ms ticks: 100, 200, 300 accumulate; the next tick reports completion
        assert!(!countdown.tick(&time));
        assert!(!countdown.tick(&time));
        assert!(!countdown.tick(&time));
        assert!(countdown.tick(&time));
        assert!(!countdown.is_waiting());
        assert!(!countdown.tick(&time));
    }
}
