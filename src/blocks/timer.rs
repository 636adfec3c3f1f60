//! On-delay and off-delay timers.

/// Timer behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// TON: accumulates while enabled, done once the preset is reached
    OnDelay,
    /// TOF: accumulates while disabled, passes power until the preset is reached
    OffDelay,
}

/// Result of one timer update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerOutput {
    /// New accumulator value, to be written to the timer tag
    pub accumulated: f64,
    /// Rung continuity after the timer
    pub output: bool,
}

/// A timer function block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    pub mode: TimerMode,
    pub preset: f64,
}

impl Timer {
    /// Create a new timer.
    pub fn new(mode: TimerMode, preset: f64) -> Self {
        Self { mode, preset }
    }

    /// Advance the timer by one scan of length `dt`.
    ///
    /// The accumulator never exceeds the preset.
    pub fn update(&self, enable: bool, accumulated: f64, dt: f64) -> TimerOutput {
        let running = match self.mode {
            TimerMode::OnDelay => enable,
            TimerMode::OffDelay => !enable,
        };

        let accumulated = if running {
            (accumulated + dt).min(self.preset)
        } else {
            0.0
        };

        let output = match self.mode {
            TimerMode::OnDelay => enable && accumulated >= self.preset,
            TimerMode::OffDelay => enable && accumulated < self.preset,
        };

        TimerOutput {
            accumulated,
            output,
        }
    }
}
