//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod display;
pub mod signals;

// Re-export main functions
pub use display::{countdown_line, format_time, period_label, progress, status_text, summary};
pub use signals::shutdown_signal;
