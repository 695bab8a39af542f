//! Session configuration and its validation

use serde::{Deserialize, Serialize};

use crate::{
    cues::{CueEvent, CueStrategy, Sound},
    error::TimerError,
};

pub const DEFAULT_ROUND_SECONDS: u32 = 180;
pub const DEFAULT_REST_SECONDS: u32 = 60;
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

/// Complete configuration for one training session
///
/// Supplied wholesale before `start()`; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Length of each round in seconds
    pub round_duration: u32,
    /// Length of each rest in seconds
    pub rest_duration: u32,
    pub total_rounds: u32,
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    #[serde(default)]
    pub cue_strategy: CueStrategy,
}

fn default_audio_enabled() -> bool {
    true
}

impl Configuration {
    /// Create a configuration with tone cues and audio enabled
    pub fn new(round_duration: u32, rest_duration: u32, total_rounds: u32) -> Self {
        Self {
            round_duration,
            rest_duration,
            total_rounds,
            audio_enabled: true,
            cue_strategy: CueStrategy::default(),
        }
    }

    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }

    pub fn with_cue_strategy(mut self, strategy: CueStrategy) -> Self {
        self.cue_strategy = strategy;
        self
    }

    /// Sound a cue should make under this configuration, `None` when muted
    pub fn sound_for(&self, cue: CueEvent) -> Option<Sound> {
        if !self.audio_enabled {
            return None;
        }
        self.cue_strategy.resolve(cue)
    }

    /// Check the invariants the engine relies on. Values are never clamped.
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.round_duration == 0 {
            return Err(TimerError::InvalidConfiguration(
                "round duration must be greater than zero".to_string(),
            ));
        }
        if self.rest_duration == 0 {
            return Err(TimerError::InvalidConfiguration(
                "rest duration must be greater than zero".to_string(),
            ));
        }
        if self.total_rounds == 0 {
            return Err(TimerError::InvalidConfiguration(
                "total rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SECONDS, DEFAULT_REST_SECONDS, DEFAULT_TOTAL_ROUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Configuration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.round_duration, 180);
        assert_eq!(config.rest_duration, 60);
        assert_eq!(config.total_rounds, 5);
        assert!(config.audio_enabled);
    }

    #[test]
    fn test_muted_config_resolves_no_sound() {
        let config = Configuration::new(5, 3, 2);
        assert!(config.sound_for(CueEvent::SessionComplete).is_some());
        assert_eq!(config.with_audio(false).sound_for(CueEvent::SessionComplete), None);
    }

    #[test]
    fn test_zero_values_rejected() {
        for config in [
            Configuration::new(0, 10, 1),
            Configuration::new(10, 0, 1),
            Configuration::new(10, 10, 0),
        ] {
            assert!(matches!(
                config.validate(),
                Err(TimerError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_json_defaults_optional_fields() {
        let config: Configuration =
            serde_json::from_str(r#"{"round_duration":30,"rest_duration":10,"total_rounds":3}"#)
                .unwrap();
        assert_eq!(config, Configuration::new(30, 10, 3));
    }

    #[test]
    fn test_json_rejects_negative_durations() {
        let result = serde_json::from_str::<Configuration>(
            r#"{"round_duration":-5,"rest_duration":10,"total_rounds":3}"#,
        );
        assert!(result.is_err());
    }
}
