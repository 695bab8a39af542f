//! Cue strategies: fixed tones or user-supplied clips

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use super::CueEvent;

/// Concrete rendering chosen for a cue
#[derive(Debug, Clone, PartialEq)]
pub enum Sound {
    /// Square-wave tone
    Tone {
        frequency_hz: u32,
        duration: Duration,
        gain: f32,
    },
    /// Audio file played as-is
    Clip(PathBuf),
}

impl Sound {
    fn tone(frequency_hz: u32, millis: u64) -> Self {
        Sound::Tone {
            frequency_hz,
            duration: Duration::from_millis(millis),
            gain: ToneCues::GAIN,
        }
    }
}

/// Fixed tones, one per transition
///
/// Tones sound on the *end* of a period and the start cues stay silent, so
/// each transition rings once. The final rest rings twice: its end tone and
/// then the completion tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneCues;

impl ToneCues {
    pub const GAIN: f32 = 0.3;

    pub fn resolve(&self, cue: CueEvent) -> Option<Sound> {
        match cue {
            CueEvent::RoundEnd => Some(Sound::tone(400, 500)),
            CueEvent::RestEnd => Some(Sound::tone(800, 500)),
            CueEvent::Warning => Some(Sound::tone(600, 100)),
            CueEvent::SessionComplete => Some(Sound::tone(1000, 1000)),
            CueEvent::RoundStart | CueEvent::RestStart => None,
        }
    }
}

/// One optional clip per transition cue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAudioCues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_start: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_end: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_start: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_end: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_complete: Option<PathBuf>,
}

impl CustomAudioCues {
    /// Assign a clip to a cue. Returns false for `Warning`, which has no slot.
    pub fn set(&mut self, cue: CueEvent, path: PathBuf) -> bool {
        let slot = match cue {
            CueEvent::RoundStart => &mut self.round_start,
            CueEvent::RoundEnd => &mut self.round_end,
            CueEvent::RestStart => &mut self.rest_start,
            CueEvent::RestEnd => &mut self.rest_end,
            CueEvent::SessionComplete => &mut self.session_complete,
            CueEvent::Warning => return false,
        };
        *slot = Some(path);
        true
    }

    pub fn resolve(&self, cue: CueEvent) -> Option<Sound> {
        let clip = match cue {
            CueEvent::RoundStart => &self.round_start,
            CueEvent::RoundEnd => &self.round_end,
            CueEvent::RestStart => &self.rest_start,
            CueEvent::RestEnd => &self.rest_end,
            CueEvent::SessionComplete => &self.session_complete,
            CueEvent::Warning => return None,
        };
        clip.clone().map(Sound::Clip)
    }
}

/// Selects what sound, if any, a cue maps to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueStrategy {
    /// Fixed tones, see [`ToneCues`]
    #[default]
    Tones,
    Custom { clips: CustomAudioCues },
}

impl CueStrategy {
    pub fn resolve(&self, cue: CueEvent) -> Option<Sound> {
        match self {
            CueStrategy::Tones => ToneCues.resolve(cue),
            CueStrategy::Custom { clips } => clips.resolve(cue),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CueStrategy::Tones => "tones",
            CueStrategy::Custom { .. } => "custom",
        }
    }
}
