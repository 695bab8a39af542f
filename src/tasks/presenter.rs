//! Console presenter background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    state::{AppState, Phase},
    utils::{countdown_line, status_text, summary},
};

/// Background task that renders every published snapshot to the log
///
/// Phase and round changes are logged at info level; the per-second
/// countdown only at debug.
pub async fn presenter_task(state: Arc<AppState>) {
    info!("Starting presenter task");

    let mut snapshot_rx = state.snapshot_tx.subscribe();
    let mut last_seen: Option<(Phase, Option<u32>)> = None;

    while snapshot_rx.changed().await.is_ok() {
        let snapshot = *snapshot_rx.borrow_and_update();
        let key = (snapshot.phase, snapshot.current_round);

        if last_seen != Some(key) {
            info!("{}", status_text(&snapshot));
            if snapshot.is_finished() {
                if let Ok(config) = state.get_config() {
                    info!("Great job! {}", summary(&config));
                }
            }
            last_seen = Some(key);
        }

        debug!("{}", countdown_line(&snapshot));
    }

    debug!("Presenter task stopped");
}
