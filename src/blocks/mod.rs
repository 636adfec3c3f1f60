//! Function-block models for timers and counters.
//!
//! Blocks are stateless with respect to the program: their accumulated
//! values live in the tag table and their edge memory lives in the scan
//! engine. Each `update` takes the enabling rung state and the current
//! stored values and returns the new values plus the block's contribution
//! to rung continuity.
//!
//! Presets are expressed in the same unit as the scan period passed to the
//! engine (milliseconds for timers at the nominal scan rate) or in counts.

mod counter;
mod timer;

pub use counter::{Counter, CounterDirection, CounterOutput};
pub use timer::{Timer, TimerMode, TimerOutput};

/// Default TON/TOF preset.
pub const DEFAULT_TIMER_PRESET: f64 = 5000.0;

/// Default CTU preset.
pub const DEFAULT_CTU_PRESET: f64 = 10.0;

/// Default CTD preset.
pub const DEFAULT_CTD_PRESET: f64 = 0.0;
