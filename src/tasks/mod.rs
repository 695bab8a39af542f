//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod cue_dispatch;
pub mod keep_awake;
pub mod presenter;
pub mod ticker;

// Re-export main functions
pub use cue_dispatch::cue_dispatch_task;
pub use keep_awake::keep_awake_task;
pub use presenter::presenter_task;
pub use ticker::ticker_task;
