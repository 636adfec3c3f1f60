//! Error types for the ladder runtime.
//!
//! This module provides a unified error type [`LadderError`] that covers
//! every error condition that can occur while importing a program,
//! validating it, configuring the simulation, and driving the CLI.
//!
//! Tag-level conditions inside a scan (undefined tags, missing parameters,
//! dangling parallel references) are deliberately absent: the scan engine
//! tolerates them and always completes a tick.

use thiserror::Error;

/// Result type alias using [`LadderError`].
pub type Result<T> = std::result::Result<T, LadderError>;

/// Unified error type for all ladder runtime operations.
#[derive(Error, Debug)]
pub enum LadderError {
    // ============ Interchange Errors ============
    /// Malformed program document
    #[error("Invalid program document: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Element type outside the supported vocabulary
    #[error("Unknown element type '{kind}' for element '{element}' in rung '{rung}'")]
    UnknownElementKind {
        rung: String,
        element: String,
        kind: String,
    },

    /// Invalid kind-specific parameter
    #[error("Invalid parameter '{param}' for element '{element}': {message}")]
    InvalidParameter {
        element: String,
        param: String,
        message: String,
    },

    // ============ Program Validation Errors ============
    /// Two elements share an id inside one rung
    #[error("Duplicate element id '{element}' in rung '{rung}'")]
    DuplicateElement { rung: String, element: String },

    /// Two rungs share an id
    #[error("Duplicate rung id '{rung}'")]
    DuplicateRung { rung: String },

    /// An element is its own transitive parallel ancestor
    #[error("Parallel cycle through element '{element}' in rung '{rung}'")]
    ParallelCycle { rung: String, element: String },

    /// A parallel sibling declares parallel siblings of its own
    #[error("Element '{element}' in rung '{rung}' is a parallel sibling and cannot have its own parallel branch")]
    NestedParallel { rung: String, element: String },

    /// Rung or element lookup failed during an edit
    #[error("No {what} '{id}' in program")]
    NotFound { what: &'static str, id: String },

    // ============ Simulation Errors ============
    /// Invalid simulation parameter
    #[error("Invalid simulation parameter: {message}")]
    InvalidSimulationParam { message: String },

    /// Scan period must be non-zero
    #[error("Invalid scan period: {message}")]
    InvalidScanPeriod { message: String },

    // ============ I/O Errors ============
    /// Error reading a program file
    #[error("Failed to read program file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing monitor output
    #[error("Failed to write output: {message}")]
    OutputError { message: String },

    /// Malformed `NAME=VALUE` assignment
    #[error("Invalid tag assignment '{input}': expected NAME=VALUE")]
    InvalidTagAssignment { input: String },

    /// Error spawning the scheduler thread
    #[error("Failed to start scheduler: {source}")]
    SchedulerSpawn {
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl LadderError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        element: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            element: element.into(),
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid simulation parameter error
    pub fn invalid_simulation_param(message: impl Into<String>) -> Self {
        Self::InvalidSimulationParam {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            id: id.into(),
        }
    }
}
