//! Round/rest timing state machine

use tracing::{debug, trace};

use super::{
    session_config::Configuration,
    timer_state::{Phase, TickResult, TimerSnapshot, TimerState},
};
use crate::{cues::CueEvent, error::TimerError};

/// Remaining seconds at which a `Warning` cue fires
const WARNING_SECONDS: std::ops::RangeInclusive<u32> = 1..=3;

/// Owns all timing state and advances it one second per `tick()`
///
/// The engine performs no I/O: it mutates its own state and reports the cues
/// a tick produced. Scheduling ticks, playing sounds and rendering are left
/// to the caller.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: Configuration,
    state: TimerState,
}

impl TimerEngine {
    /// Create an idle engine from a validated configuration
    pub fn new(config: Configuration) -> Result<Self, TimerError> {
        config.validate()?;
        let state = TimerState::idle(config.round_duration);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot(self.config.total_rounds)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Current round, `None` while idle
    pub fn current_round(&self) -> Option<u32> {
        self.snapshot().current_round
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    /// Replace the configuration wholesale. Only allowed while idle.
    pub fn configure(&mut self, config: Configuration) -> Result<(), TimerError> {
        if self.state.phase != Phase::Idle {
            return Err(self.invalid_transition("configure"));
        }
        config.validate()?;

        debug!(
            "Configured {} rounds of {}s with {}s rest (cues={}, audio={})",
            config.total_rounds,
            config.round_duration,
            config.rest_duration,
            config.cue_strategy.name(),
            config.audio_enabled
        );
        self.state = TimerState::idle(config.round_duration);
        self.config = config;
        Ok(())
    }

    /// Begin a session from idle, or resume a paused one
    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state.phase {
            Phase::Finished => Err(self.invalid_transition("start")),
            Phase::Idle => {
                self.state = TimerState {
                    phase: Phase::RoundActive,
                    current_round: 1,
                    time_remaining: self.config.round_duration,
                    running: true,
                };
                debug!("Session started");
                Ok(())
            }
            Phase::RoundActive | Phase::RestActive => {
                if !self.state.running {
                    self.state.running = true;
                    debug!(
                        "Resumed {} {} with {}s left",
                        self.state.phase, self.state.current_round, self.state.time_remaining
                    );
                }
                Ok(())
            }
        }
    }

    /// Stop counting without touching any counters
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.state.phase == Phase::Finished {
            return Err(self.invalid_transition("pause"));
        }
        if self.state.running {
            self.state.running = false;
            debug!(
                "Paused {} {} with {}s left",
                self.state.phase, self.state.current_round, self.state.time_remaining
            );
        }
        Ok(())
    }

    /// Return to idle from any phase
    pub fn reset(&mut self) {
        self.state = TimerState::idle(self.config.round_duration);
        debug!("Timer reset");
    }

    /// Advance the timer by one second
    pub fn tick(&mut self) -> Result<TickResult, TimerError> {
        if !self.state.running || self.state.phase == Phase::Finished {
            return Err(TimerError::InvalidState {
                phase: self.state.phase,
                running: self.state.running,
            });
        }

        let mut cues = Vec::with_capacity(2);

        if self.state.time_remaining > 1 {
            self.state.time_remaining -= 1;
            if self.state.phase.is_active() && WARNING_SECONDS.contains(&self.state.time_remaining) {
                cues.push(CueEvent::Warning);
            }
        } else {
            self.finish_period(&mut cues);
        }

        trace!(
            "Tick: {} {} {}s left, cues={:?}",
            self.state.phase,
            self.state.current_round,
            self.state.time_remaining,
            cues
        );

        Ok(TickResult {
            snapshot: self.snapshot(),
            cues,
        })
    }

    /// Period boundary: move to the next period or complete the session
    fn finish_period(&mut self, cues: &mut Vec<CueEvent>) {
        match self.state.phase {
            Phase::RoundActive => {
                cues.push(CueEvent::RoundEnd);
                self.state.phase = Phase::RestActive;
                self.state.time_remaining = self.config.rest_duration;
                cues.push(CueEvent::RestStart);
                debug!("Round {} finished, resting", self.state.current_round);
            }
            Phase::RestActive => {
                cues.push(CueEvent::RestEnd);
                if self.state.current_round < self.config.total_rounds {
                    self.state.current_round += 1;
                    self.state.phase = Phase::RoundActive;
                    self.state.time_remaining = self.config.round_duration;
                    cues.push(CueEvent::RoundStart);
                    debug!("Round {} started", self.state.current_round);
                } else {
                    self.state.phase = Phase::Finished;
                    self.state.time_remaining = 0;
                    self.state.running = false;
                    cues.push(CueEvent::SessionComplete);
                    debug!("All {} rounds complete", self.config.total_rounds);
                }
            }
            // tick() rejects these before getting here
            Phase::Idle | Phase::Finished => {}
        }
    }

    fn invalid_transition(&self, operation: &'static str) -> TimerError {
        TimerError::InvalidTransition {
            operation,
            phase: self.state.phase,
        }
    }
}
