//! External collaborators of the timer
//!
//! This module contains the sound player that renders cues and the wake lock
//! that keeps the host awake during a session.

pub mod player;
pub mod wake_lock;

// Re-export main types
pub use player::{check_command_available, CommandPlayer, SoundPlayer};
pub use wake_lock::WakeLock;
