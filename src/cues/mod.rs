//! Cue events and the strategies that turn them into sounds
//!
//! The engine only decides which cue fires and when. What a cue sounds like
//! is decided by a [`CueStrategy`], and how the sound is rendered belongs to
//! the player service.

pub mod strategy;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use strategy::{CueStrategy, CustomAudioCues, Sound, ToneCues};

/// Identified moment worth an audible or visual alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueEvent {
    RoundStart,
    RoundEnd,
    RestStart,
    RestEnd,
    SessionComplete,
    /// Repeats once per second over the last 3 seconds of a period
    Warning,
}

impl CueEvent {
    pub const ALL: [CueEvent; 6] = [
        CueEvent::RoundStart,
        CueEvent::RoundEnd,
        CueEvent::RestStart,
        CueEvent::RestEnd,
        CueEvent::SessionComplete,
        CueEvent::Warning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CueEvent::RoundStart => "round-start",
            CueEvent::RoundEnd => "round-end",
            CueEvent::RestStart => "rest-start",
            CueEvent::RestEnd => "rest-end",
            CueEvent::SessionComplete => "session-complete",
            CueEvent::Warning => "warning",
        }
    }
}

/// A cue together with the sound it resolved to when it fired
///
/// Resolving at emission keeps queued sounds tied to the configuration that
/// produced them, even if the session is reset and reconfigured while the
/// queue drains.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedCue {
    pub cue: CueEvent,
    pub sound: Option<Sound>,
}

impl fmt::Display for CueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CueEvent {
    type Err = String;

    /// Accepts both `round-start` and `round_start` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        CueEvent::ALL
            .into_iter()
            .find(|cue| cue.as_str() == normalized)
            .ok_or_else(|| format!("Unknown cue: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_spellings() {
        assert_eq!("rest-end".parse::<CueEvent>(), Ok(CueEvent::RestEnd));
        assert_eq!("session_complete".parse::<CueEvent>(), Ok(CueEvent::SessionComplete));
        assert_eq!(" Warning ".parse::<CueEvent>(), Ok(CueEvent::Warning));
    }

    #[test]
    fn test_parse_unknown_cue() {
        assert!("gong".parse::<CueEvent>().is_err());
    }
}
