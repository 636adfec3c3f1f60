//! VFD/motor simulation driven by the scan engine's output.
//!
//! The model is a first-order frequency ramp: the drive accelerates toward
//! the maximum frequency while the run signal is on and decelerates toward
//! zero while it is off, at rates set by the configured ramp times. Speed
//! and current are derived from the frequency each step.
//!
//! ```text
//! f[n+1] = target            if |target - f[n]| <= |step|
//!        = f[n] + step       otherwise
//!
//! step   = +f_max / (t_acc * ticks_per_second)   when accelerating
//!        = -f_max / (t_dec * ticks_per_second)   when decelerating
//!
//! rpm    = f / 60 * 1800
//! amps   = 2.5 + f / 60 * 8.5   (0 while stopped)
//! ```
//!
//! The current figure is a linear stand-in for drive output current, not a
//! torque model. Telemetry never feeds back into the tag table.

mod vfd;

pub use vfd::{step, SimulationParameters, SimulationTelemetry};

/// Synchronous speed of the simulated 4-pole motor at 60 Hz.
pub const RATED_RPM: f64 = 1800.0;

/// Frequency the speed and current formulas are normalised to.
pub const BASE_FREQUENCY_HZ: f64 = 60.0;

/// Current drawn by the running motor at zero frequency.
pub const IDLE_CURRENT_AMPS: f64 = 2.5;

/// Additional current drawn at base frequency.
pub const LOAD_CURRENT_SPAN_AMPS: f64 = 8.5;

/// Slack allowed when deciding the ramp has reached its target.
pub const SNAP_TOLERANCE: f64 = 1e-9;
