//! State management module
//!
//! This module contains the timing state machine, its configuration and the
//! shared application state the service builds around it.

pub mod app_state;
pub mod engine;
pub mod session_config;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use engine::TimerEngine;
pub use session_config::Configuration;
pub use timer_state::{Phase, TickResult, TimerSnapshot};
