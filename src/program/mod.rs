//! Ladder program representation and validation.
//!
//! This module provides the in-memory program the scan engine walks. A
//! [`Program`] is built from an interchange document (or directly through
//! the builder methods), then checked with [`validate_program`] before it
//! is installed in a session.

mod model;
mod types;
mod validate;

pub use model::{Element, Program, Rung};
pub use types::*;
pub use validate::validate_program;
