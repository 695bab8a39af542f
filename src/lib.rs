//! Round Bell - An interval training timer
//!
//! This library provides the round/rest timing state machine, the cue
//! strategies that turn its events into sounds, and the HTTP service that
//! drives it once per second.

pub mod api;
pub mod config;
pub mod cues;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use cues::{CueEvent, CueStrategy, CustomAudioCues, QueuedCue, Sound, ToneCues};
pub use error::{AppError, TimerError};
pub use state::{AppState, Configuration, Phase, TickResult, TimerEngine, TimerSnapshot};
pub use utils::signals::shutdown_signal;
