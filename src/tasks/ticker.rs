//! Ticker background task: the single 1 Hz driver of the timer engine

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that ticks the engine once per interval while it runs
///
/// Parks on the running flag while the engine is idle, paused or finished.
/// The first tick after a start or resume lands one full interval later.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut running_rx = state.running_tx.subscribe();

    loop {
        if !*running_rx.borrow_and_update() {
            // Wait for start/resume
            if running_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        let period = state.tick_interval;
        debug!("Ticker running every {:?}", period);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.advance() {
                        Ok(Some(result)) => {
                            if !result.snapshot.running {
                                info!("Session complete, ticker parked");
                                break;
                            }
                        }
                        Ok(None) => {
                            debug!("Engine stopped before tick, ticker parked");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to advance timer: {}", e);
                            // Wait a bit before retrying
                            sleep(Duration::from_secs(1)).await;
                            break;
                        }
                    }
                }

                changed = running_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*running_rx.borrow_and_update() {
                        debug!("Ticker parked");
                        break;
                    }
                }
            }
        }
    }

    debug!("Ticker task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cues::CueEvent,
        state::{Configuration, Phase, TimerEngine},
    };

    fn spawn_app(round: u32, rest: u32, rounds: u32) -> Arc<AppState> {
        let engine = TimerEngine::new(Configuration::new(round, rest, rounds)).unwrap();
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), engine));
        tokio::spawn(ticker_task(Arc::clone(&state)));
        state
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_runs_session_to_completion() {
        let state = spawn_app(5, 3, 2);
        let mut cue_rx = state.cue_tx.subscribe();
        tokio::task::yield_now().await;

        state.start().unwrap();
        sleep(Duration::from_millis(16_500)).await;

        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Finished);
        assert!(!snapshot.running);

        let mut cues = Vec::new();
        while let Ok(queued) = cue_rx.try_recv() {
            cues.push(queued.cue);
        }
        let transitions: Vec<_> = cues.into_iter().filter(|c| *c != CueEvent::Warning).collect();
        assert_eq!(
            transitions,
            vec![
                CueEvent::RoundEnd,
                CueEvent::RestStart,
                CueEvent::RestEnd,
                CueEvent::RoundStart,
                CueEvent::RoundEnd,
                CueEvent::RestStart,
                CueEvent::RestEnd,
                CueEvent::SessionComplete,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stops_counting_while_paused() {
        let state = spawn_app(30, 10, 1);
        tokio::task::yield_now().await;

        state.start().unwrap();
        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(state.get_snapshot().unwrap().time_remaining, 27);

        state.pause().unwrap();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(state.get_snapshot().unwrap().time_remaining, 27);

        state.start().unwrap();
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(state.get_snapshot().unwrap().time_remaining, 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_idle_after_reset() {
        let state = spawn_app(30, 10, 1);
        tokio::task::yield_now().await;

        state.start().unwrap();
        sleep(Duration::from_millis(1_500)).await;
        state.reset().unwrap();
        sleep(Duration::from_secs(5)).await;

        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.time_remaining, 30);
    }
}
