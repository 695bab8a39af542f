//! Sound rendering through external audio commands

use std::future::Future;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{cues::Sound, error::PlayerError};

pub const DEFAULT_TONE_COMMAND: &str = "play";
pub const DEFAULT_CLIP_COMMAND: &str = "paplay";

/// Something that can make a [`Sound`] audible
pub trait SoundPlayer: Send + Sync + 'static {
    /// Play the sound to completion
    fn play(&self, sound: &Sound) -> impl Future<Output = Result<(), PlayerError>> + Send;
}

/// Plays tones with SoX `play` and clips with a PulseAudio-style player
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    pub tone_command: String,
    pub clip_command: String,
    tones_available: bool,
    clips_available: bool,
}

impl CommandPlayer {
    pub fn new(tone_command: impl Into<String>, clip_command: impl Into<String>) -> Self {
        Self {
            tone_command: tone_command.into(),
            clip_command: clip_command.into(),
            tones_available: true,
            clips_available: true,
        }
    }

    /// Check both commands once and remember which ones can be used
    pub async fn probe(mut self) -> Self {
        self.tones_available = report(check_command_available(&self.tone_command).await);
        self.clips_available = report(check_command_available(&self.clip_command).await);
        self
    }

    /// Arguments for `play` to synthesize a square-wave tone
    pub fn tone_args(frequency_hz: u32, duration_secs: f32, gain: f32) -> Vec<String> {
        vec![
            "-q".to_string(),
            "-n".to_string(),
            "synth".to_string(),
            format!("{:.3}", duration_secs),
            "square".to_string(),
            frequency_hz.to_string(),
            "vol".to_string(),
            format!("{:.2}", gain),
        ]
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_TONE_COMMAND, DEFAULT_CLIP_COMMAND)
    }
}

impl SoundPlayer for CommandPlayer {
    async fn play(&self, sound: &Sound) -> Result<(), PlayerError> {
        match sound {
            Sound::Tone {
                frequency_hz,
                duration,
                gain,
            } => {
                if !self.tones_available {
                    return Err(PlayerError::Unavailable(self.tone_command.clone()));
                }
                let args = Self::tone_args(*frequency_hz, duration.as_secs_f32(), *gain);
                run_command(&self.tone_command, &args).await
            }
            Sound::Clip(path) => {
                if !self.clips_available {
                    return Err(PlayerError::Unavailable(self.clip_command.clone()));
                }
                if !path.exists() {
                    return Err(PlayerError::MissingClip(path.clone()));
                }
                let args = [path.display().to_string()];
                run_command(&self.clip_command, &args).await
            }
        }
    }
}

fn report(result: Result<(), PlayerError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("{}; those cues will be silent", e);
            false
        }
    }
}

/// Run a player command and wait for it to finish
async fn run_command(command: &str, args: &[String]) -> Result<(), PlayerError> {
    debug!("Running {} {:?}", command, args);

    let output = Command::new(command)
        .args(args)
        .output()
        .await
        .map_err(|source| PlayerError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlayerError::Failed {
            command: command.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}

/// Check whether an audio command runs and answers `--version` cleanly
pub async fn check_command_available(command: &str) -> Result<(), PlayerError> {
    let output = Command::new(command)
        .arg("--version")
        .output()
        .await
        .map_err(|_| PlayerError::Unavailable(command.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("{} --version exited with {}: {}", command, output.status, stderr.trim());
        return Err(PlayerError::Unavailable(command.to_string()));
    }

    info!("{} is available", command);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{path::PathBuf, time::Duration};

    #[test]
    fn test_tone_args() {
        let args = CommandPlayer::tone_args(800, 0.5, 0.3);
        assert_eq!(
            args,
            vec!["-q", "-n", "synth", "0.500", "square", "800", "vol", "0.30"]
        );
    }

    #[tokio::test]
    async fn test_missing_command_is_unavailable() {
        let result = check_command_available("round-bell-no-such-player").await;
        assert!(matches!(result, Err(PlayerError::Unavailable(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_unavailable() {
        // `false` starts fine but exits non-zero, --version included
        let result = check_command_available("false").await;
        assert!(matches!(result, Err(PlayerError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_probe_disables_missing_players() {
        let player = CommandPlayer::new("round-bell-no-such-player", "round-bell-no-such-player")
            .probe()
            .await;
        let tone = Sound::Tone {
            frequency_hz: 600,
            duration: Duration::from_millis(100),
            gain: 0.3,
        };
        assert!(matches!(player.play(&tone).await, Err(PlayerError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_missing_clip_is_reported() {
        let player = CommandPlayer::default();
        let clip = Sound::Clip(PathBuf::from("/nonexistent/round-bell/clip.wav"));
        assert!(matches!(player.play(&clip).await, Err(PlayerError::MissingClip(_))));
    }
}
