//! # Ladder Core
//!
//! A ladder-logic scan engine with a coupled VFD/motor simulation.
//!
//! This library provides:
//! - A JSON interchange format for ladder programs and their HMI widgets
//! - Contacts, coils, on/off-delay timers, up/down counters and MOVE blocks
//!   with one-level parallel (OR) branches
//! - A PLC-style scan cycle with immediate tag updates
//! - A first-order VFD ramp model driven by one output tag
//! - A locked runtime session and a fixed-period scheduler
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`interchange`] - Program document format
//! - [`program`] - Rungs and elements, with edit-time validation
//! - [`tags`] - Tag values and the tag table
//! - [`blocks`] - Timer and counter function blocks
//! - [`scan`] - The scan engine
//! - [`physics`] - VFD/motor simulation
//! - [`runtime`] - Session state and the tick scheduler
//! - [`profile`] - Device I/O vocabularies
//! - [`monitor`] - Batch and real-time run drivers (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! ladder start_stop.json --set I0.1=true --ticks 60
//! ladder start_stop.json --set I0.1=true --ticks 20 --realtime --json
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use ladder_core::{RuntimeConfig, Session};
//!
//! # fn main() -> ladder_core::Result<()> {
//! let session = Session::new(RuntimeConfig::default())?;
//! session.load_json(r#"{"rows": [{"id": "row-1", "elements": [
//!     {"id": "a", "type": "NO_CONTACT", "variable": "I0.1"},
//!     {"id": "q", "type": "COIL", "variable": "Q0.1"}
//! ]}]}"#)?;
//! session.set_run_mode(true);
//! session.set_tag("I0.1", true);
//! let snapshot = session.tick();
//! # Ok(())
//! # }
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmLadderRuntime } from 'ladder_core';
//!
//! const rt = new WasmLadderRuntime(programJson, 100);
//! setInterval(() => rt.tick(), 100);
//! ```
//!
//! ## Scan Cycle
//!
//! Each tick:
//!
//! 1. Every rung is evaluated left to right starting from power on; each
//!    write lands in the tag table at once, so later rungs see it
//! 2. The rung's last coil receives the final power state
//! 3. The drive simulation steps toward max frequency or zero depending on
//!    the motor tag
//!
//! The whole tick runs under the session lock.

pub mod blocks;
pub mod error;
pub mod interchange;
pub mod physics;
pub mod profile;
pub mod program;
pub mod runtime;
pub mod scan;
pub mod tags;

#[cfg(feature = "cli")]
pub mod monitor;

// Re-export main types for convenience
pub use error::{LadderError, Result};
pub use program::Program;
pub use runtime::{RuntimeConfig, Scheduler, Session};
pub use scan::ScanEngine;
pub use tags::{TagTable, TagValue};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLadderRuntime;

/// Default scan period in milliseconds
pub const DEFAULT_SCAN_PERIOD_MS: u64 = 100;

/// Default tag that runs the simulated drive
pub const DEFAULT_MOTOR_TAG: &str = "Q0.1";
