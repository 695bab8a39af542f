//! Error types for the timer engine and the service around it

use thiserror::Error;

use crate::state::Phase;

/// Contract violations raised by the timer engine.
///
/// None of these are transient: the caller invoked an operation whose
/// preconditions did not hold, and the engine state was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation not allowed in the current phase
    #[error("Cannot {operation} while {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },

    /// `tick()` called outside the running, non-terminal window
    #[error("Cannot tick while {phase} (running={running})")]
    InvalidState { phase: Phase, running: bool },
}

/// Errors surfaced by the service layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Request body or path could not be understood
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to lock {0}")]
    LockPoisoned(String),
}

/// Failures while rendering a sound
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("{0} is not available")]
    Unavailable(String),

    #[error("Audio clip not found: {}", .0.display())]
    MissingClip(std::path::PathBuf),
}

/// Failures while holding or releasing the wake lock
#[derive(Debug, Error)]
pub enum WakeLockError {
    #[error("Failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to release wake lock: {0}")]
    Release(#[source] std::io::Error),
}
