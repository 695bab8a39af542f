//! Wake lock background task

use std::sync::Arc;
use tracing::{info, warn};

use crate::{services::WakeLock, state::AppState};

/// Background task that holds the wake lock exactly while the timer runs
pub async fn keep_awake_task(state: Arc<AppState>, mut lock: WakeLock) {
    info!("Starting keep-awake task");

    let mut running_rx = state.running_tx.subscribe();

    loop {
        let running = *running_rx.borrow_and_update();
        if running {
            if let Err(e) = lock.acquire() {
                warn!("Screen may sleep during training: {}", e);
            }
        } else if let Err(e) = lock.release().await {
            warn!("{}", e);
        }

        if running_rx.changed().await.is_err() {
            break;
        }
    }

    if let Err(e) = lock.release().await {
        warn!("{}", e);
    }
}
