//! Timer state structure and snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cues::CueEvent;

/// Coarse-grained mode of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pre-start, configuration allowed
    Idle,
    RoundActive,
    RestActive,
    /// Terminal until reset
    Finished,
}

impl Phase {
    /// Whether a period (round or rest) is counting in this phase
    pub fn is_active(self) -> bool {
        matches!(self, Phase::RoundActive | Phase::RestActive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::RoundActive => "round",
            Phase::RestActive => "rest",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable timing state, owned exclusively by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimerState {
    pub phase: Phase,
    /// Meaningful only outside `Idle`
    pub current_round: u32,
    pub time_remaining: u32,
    pub running: bool,
}

impl TimerState {
    /// Create an idle state showing a full round on the display
    pub fn idle(round_duration: u32) -> Self {
        Self {
            phase: Phase::Idle,
            current_round: 0,
            time_remaining: round_duration,
            running: false,
        }
    }

    pub fn snapshot(&self, total_rounds: u32) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            current_round: match self.phase {
                Phase::Idle => None,
                _ => Some(self.current_round),
            },
            total_rounds,
            time_remaining: self.time_remaining,
            running: self.running,
        }
    }
}

/// Read-only copy of the timer state handed to presenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    /// `None` while idle
    pub current_round: Option<u32>,
    pub total_rounds: u32,
    pub time_remaining: u32,
    pub running: bool,
}

impl TimerSnapshot {
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_resting(&self) -> bool {
        self.phase == Phase::RestActive
    }
}

/// Outcome of a single tick: the new state plus the cues it emitted, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickResult {
    pub snapshot: TimerSnapshot,
    pub cues: Vec<CueEvent>,
}
