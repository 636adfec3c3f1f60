//! Session state and the periodic scan driver.
//!
//! A [`Session`] owns everything a running program touches: the program,
//! its HMI widgets, the tag table, counter edge memory and the drive
//! simulation. All of it sits behind one lock. A tick (scan plus physics
//! step) and every external edit take that lock, so readers only ever see
//! state from between two ticks.
//!
//! The [`Scheduler`] is a single thread that calls [`Session::tick`] once
//! per period. Ticks never overlap; a period missed because a tick ran long
//! is skipped, not queued.

mod config;
mod scheduler;
mod session;

pub use config::RuntimeConfig;
pub use scheduler::{Scheduler, SchedulerStats};
pub use session::{ScanSnapshot, Session};
