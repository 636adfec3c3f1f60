//! Ladder scan engine.
//!
//! One scan walks every rung of a [`Program`](crate::program::Program) in
//! order, against a [`TagTable`](crate::tags::TagTable), and updates the
//! table in place. Writes are visible immediately: a later rung observes
//! values written by an earlier rung in the same scan.
//!
//! ## Rung Evaluation
//!
//! Power flow starts `true` at the left rail. Series elements are visited
//! left to right; each one sees the AND of everything before it:
//!
//! ```text
//! |--[ A ]--+--[/B ]--+--(TON T1)--( Q )--|
//!           |         |
//!           +--[ C ]--+
//! ```
//!
//! - Contacts AND their own state (ORed with their parallel siblings) into
//!   the rung.
//! - Timers and counters update their tag from the incoming power and
//!   replace it with their done/pass condition.
//! - MOVE copies its literal when powered.
//! - The last coil on the rung receives the final power state, once, after
//!   every element has been visited.
//!
//! Undefined tags read as `false`/`0`; a scan never fails.

mod edge;
mod engine;

pub use edge::EdgeMemory;
pub use engine::{ScanEngine, ScanReport};
