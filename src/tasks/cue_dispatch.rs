//! Cue dispatch background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{cues::QueuedCue, services::SoundPlayer, state::AppState};

/// Background task that plays queued cue sounds
///
/// Sounds were resolved when their cue fired, so a later configuration
/// change never alters what is already queued. Cues are played one after
/// another in emission order; a sound still playing delays the next one
/// rather than cutting it off.
pub async fn cue_dispatch_task<P: SoundPlayer>(state: Arc<AppState>, player: P) {
    info!("Starting cue dispatch task");

    let mut cue_rx = state.cue_tx.subscribe();

    loop {
        match cue_rx.recv().await {
            Ok(QueuedCue { cue, sound }) => match sound {
                Some(sound) => {
                    debug!("Cue {} -> {:?}", cue, sound);
                    if let Err(e) = player.play(&sound).await {
                        warn!("Failed to play cue {}: {}", cue, e);
                    }
                }
                None => debug!("Cue {} is silent", cue),
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!("Skipped {} cues while playing", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    debug!("Cue dispatch task stopped");
}
