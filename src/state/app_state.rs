//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::info;

use super::{Configuration, TickResult, TimerEngine, TimerSnapshot};
use crate::{
    cues::{CueEvent, QueuedCue},
    error::{AppError, TimerError},
};

/// Period between engine ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shared state for the HTTP handlers and background tasks
///
/// The engine sits behind a single mutex so every operation, ticks included,
/// is serialized. Locks are never held across an `.await`.
#[derive(Debug)]
pub struct AppState {
    /// The timing state machine
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    pub tick_interval: Duration,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Cues emitted by ticks and previews, in order, already resolved
    pub cue_tx: broadcast::Sender<QueuedCue>,
    /// Latest engine snapshot, published after every mutation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Whether the ticker should be counting
    pub running_tx: watch::Sender<bool>,
    /// Keep the receivers alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    pub _running_rx: watch::Receiver<bool>,
}

impl AppState {
    /// Create a new AppState around an idle engine
    pub fn new(port: u16, host: String, engine: TimerEngine) -> Self {
        let (cue_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (running_tx, running_rx) = watch::channel(engine.is_running());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
            port,
            host,
            tick_interval: TICK_INTERVAL,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            cue_tx,
            snapshot_tx,
            running_tx,
            _snapshot_rx: snapshot_rx,
            _running_rx: running_rx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, AppError> {
        self.engine
            .lock()
            .map_err(|e| AppError::LockPoisoned(format!("timer engine: {}", e)))
    }

    /// Apply an engine operation, record it and notify watchers
    fn apply<F>(&self, action: &str, operation: F) -> Result<TimerSnapshot, AppError>
    where
        F: FnOnce(&mut TimerEngine) -> Result<(), TimerError>,
    {
        let mut engine = self.lock_engine()?;
        operation(&mut *engine)?;
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        self.record_action(action);
        self.publish(snapshot);
        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Push a snapshot to watchers and wake or park the ticker
    fn publish(&self, snapshot: TimerSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
        self.running_tx.send_if_modified(|running| {
            let changed = *running != snapshot.running;
            *running = snapshot.running;
            changed
        });
    }

    /// Start or resume the session
    pub fn start(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.apply("start", TimerEngine::start)?;
        info!("Timer running: {} round {:?}", snapshot.phase, snapshot.current_round);
        Ok(snapshot)
    }

    /// Pause the session
    pub fn pause(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.apply("pause", TimerEngine::pause)?;
        info!("Timer paused with {}s left", snapshot.time_remaining);
        Ok(snapshot)
    }

    /// Reset to idle
    pub fn reset(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.apply("reset", |engine| {
            engine.reset();
            Ok(())
        })?;
        info!("Timer reset");
        Ok(snapshot)
    }

    /// Replace the session configuration
    pub fn configure(&self, config: Configuration) -> Result<TimerSnapshot, AppError> {
        let summary = format!(
            "{} rounds x {}s / {}s rest",
            config.total_rounds, config.round_duration, config.rest_duration
        );
        let snapshot = self.apply("configure", move |engine| engine.configure(config))?;
        info!("Configuration updated: {}", summary);
        Ok(snapshot)
    }

    /// Advance the engine by one tick if it is running
    ///
    /// Returns `None` when the engine is not running, which happens when a
    /// pause lands between the interval firing and this call.
    pub fn advance(&self) -> Result<Option<TickResult>, AppError> {
        let mut engine = self.lock_engine()?;
        if !engine.is_running() {
            return Ok(None);
        }
        let result = engine.tick()?;
        let queued: Vec<QueuedCue> = result
            .cues
            .iter()
            .map(|&cue| QueuedCue {
                cue,
                sound: engine.config().sound_for(cue),
            })
            .collect();
        drop(engine);

        for cue in queued {
            // No subscribers is fine: nobody is listening for sound
            let _ = self.cue_tx.send(cue);
        }
        self.publish(result.snapshot);
        Ok(Some(result))
    }

    /// Queue one cue's sound for playback outside of a session
    ///
    /// Resolves through the current strategy even when audio is disabled.
    /// The engine is left untouched.
    pub fn preview(&self, cue: CueEvent) -> Result<QueuedCue, AppError> {
        let sound = self.lock_engine()?.config().cue_strategy.resolve(cue);
        let queued = QueuedCue { cue, sound };
        if queued.sound.is_some() {
            let _ = self.cue_tx.send(queued.clone());
        }
        info!("Previewing cue {}", cue);
        Ok(queued)
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, AppError> {
        Ok(self.lock_engine()?.snapshot())
    }

    /// Get current configuration
    pub fn get_config(&self) -> Result<Configuration, AppError> {
        Ok(self.lock_engine()?.config().clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
