//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    cues::{CueEvent, CueStrategy, CustomAudioCues},
    error::TimerError,
    services::{player, wake_lock},
    state::{session_config, Configuration},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "round-bell")]
#[command(about = "An interval training timer with round and rest cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20580")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Round duration in seconds
    #[arg(short, long, default_value_t = session_config::DEFAULT_ROUND_SECONDS)]
    pub round: u32,

    /// Rest duration in seconds
    #[arg(long, default_value_t = session_config::DEFAULT_REST_SECONDS)]
    pub rest: u32,

    /// Number of rounds
    #[arg(short = 'n', long, default_value_t = session_config::DEFAULT_TOTAL_ROUNDS)]
    pub rounds: u32,

    /// Disable audio cues (cues are still logged)
    #[arg(short, long)]
    pub mute: bool,

    /// Custom clip for a cue, e.g. `round-start=/path/bell.wav` (repeatable)
    #[arg(long = "cue-clip", value_name = "CUE=PATH", value_parser = parse_cue_clip)]
    pub cue_clips: Vec<(CueEvent, PathBuf)>,

    /// Command used to synthesize tones
    #[arg(long, default_value = player::DEFAULT_TONE_COMMAND)]
    pub tone_command: String,

    /// Command used to play custom clips
    #[arg(long, default_value = player::DEFAULT_CLIP_COMMAND)]
    pub clip_command: String,

    /// Hold a wake lock while the timer runs
    #[arg(long)]
    pub keep_awake: bool,

    /// Command used to take the wake lock
    #[arg(long, default_value = wake_lock::DEFAULT_INHIBIT_COMMAND)]
    pub inhibit_command: String,

    /// Start the first round as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Cue strategy implied by the clip arguments
    pub fn cue_strategy(&self) -> CueStrategy {
        if self.cue_clips.is_empty() {
            return CueStrategy::Tones;
        }
        let mut clips = CustomAudioCues::default();
        for (cue, path) in &self.cue_clips {
            clips.set(*cue, path.clone());
        }
        CueStrategy::Custom { clips }
    }

    /// Build and validate the session configuration
    pub fn session(&self) -> Result<Configuration, TimerError> {
        let config = Configuration::new(self.round, self.rest, self.rounds)
            .with_audio(!self.mute)
            .with_cue_strategy(self.cue_strategy());
        config.validate()?;
        Ok(config)
    }
}

/// Parse `CUE=PATH`
fn parse_cue_clip(arg: &str) -> Result<(CueEvent, PathBuf), String> {
    let (cue, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected CUE=PATH, got `{}`", arg))?;
    let cue: CueEvent = cue.parse()?;
    if cue == CueEvent::Warning {
        return Err("the warning cue always uses a tone".to_string());
    }
    if path.is_empty() {
        return Err(format!("missing path for {}", cue));
    }
    Ok((cue, PathBuf::from(path)))
}
