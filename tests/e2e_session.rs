//! E2E tests for complete training sessions
//!
//! Drives the timer engine through whole sessions the way the ticker does
//! and checks phases, rounds and the cue sequence at each step.

use round_bell::{Configuration, CueEvent, Phase, TimerEngine, TimerError};

fn started(round: u32, rest: u32, rounds: u32) -> TimerEngine {
    let mut engine = TimerEngine::new(Configuration::new(round, rest, rounds)).unwrap();
    engine.start().unwrap();
    engine
}

/// Tick `n` times, returning the cues of every tick
fn run(engine: &mut TimerEngine, n: u32) -> Vec<Vec<CueEvent>> {
    (0..n).map(|_| engine.tick().unwrap().cues).collect()
}

#[test]
fn test_two_round_session_walkthrough() {
    let mut engine = started(5, 3, 2);
    assert_eq!(engine.phase(), Phase::RoundActive);
    assert_eq!(engine.time_remaining(), 5);

    // Round 1
    let cues = run(&mut engine, 5);
    assert_eq!(cues[1..4], [vec![CueEvent::Warning], vec![CueEvent::Warning], vec![CueEvent::Warning]]);
    assert_eq!(cues[4], vec![CueEvent::RoundEnd, CueEvent::RestStart]);
    assert_eq!(engine.phase(), Phase::RestActive);
    assert_eq!(engine.time_remaining(), 3);

    // Rest 1
    let cues = run(&mut engine, 3);
    assert_eq!(cues[2], vec![CueEvent::RestEnd, CueEvent::RoundStart]);
    assert_eq!(engine.phase(), Phase::RoundActive);
    assert_eq!(engine.current_round(), Some(2));
    assert_eq!(engine.time_remaining(), 5);

    // Round 2
    let cues = run(&mut engine, 5);
    assert_eq!(cues[4], vec![CueEvent::RoundEnd, CueEvent::RestStart]);
    assert_eq!(engine.phase(), Phase::RestActive);
    assert_eq!(engine.time_remaining(), 3);

    // Final rest
    let cues = run(&mut engine, 3);
    assert_eq!(cues[2], vec![CueEvent::RestEnd, CueEvent::SessionComplete]);
    assert_eq!(engine.phase(), Phase::Finished);
    assert!(!engine.is_running());

    assert!(matches!(engine.tick(), Err(TimerError::InvalidState { .. })));
}

#[test]
fn test_round_duration_ticks_always_reach_rest() {
    for (round, rest, rounds) in [(1, 1, 1), (2, 7, 3), (4, 1, 2), (60, 15, 10)] {
        let mut engine = started(round, rest, rounds);
        run(&mut engine, round);
        assert_eq!(engine.phase(), Phase::RestActive, "round={}", round);
        assert_eq!(engine.time_remaining(), rest);
    }
}

#[test]
fn test_n_cycles_reach_finished() {
    for (round, rest, rounds) in [(1, 1, 1), (3, 2, 4), (10, 5, 3)] {
        let mut engine = started(round, rest, rounds);
        run(&mut engine, (round + rest) * rounds);
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(!engine.is_running());
        assert_eq!(engine.current_round(), Some(rounds));
        assert!(engine.tick().is_err());
    }
}

#[test]
fn test_session_complete_fires_exactly_once() {
    let mut engine = started(4, 4, 3);
    let all: Vec<CueEvent> = run(&mut engine, 24).into_iter().flatten().collect();
    let count = |cue| all.iter().filter(|c| **c == cue).count();

    assert_eq!(count(CueEvent::SessionComplete), 1);
    assert_eq!(count(CueEvent::RoundEnd), 3);
    assert_eq!(count(CueEvent::RestStart), 3);
    assert_eq!(count(CueEvent::RestEnd), 3);
    // The first round starts on start(), not on a tick
    assert_eq!(count(CueEvent::RoundStart), 2);
    // Three warnings in each of six periods
    assert_eq!(count(CueEvent::Warning), 18);
    assert_eq!(all.last(), Some(&CueEvent::SessionComplete));
}

#[test]
fn test_pause_mid_rest_then_resume() {
    let mut engine = started(3, 6, 1);
    run(&mut engine, 3 + 2);
    engine.pause().unwrap();
    let frozen = engine.snapshot();
    assert_eq!(frozen.phase, Phase::RestActive);
    assert_eq!(frozen.time_remaining, 4);

    assert!(engine.tick().is_err());
    engine.pause().unwrap();
    assert_eq!(engine.snapshot(), frozen);

    engine.start().unwrap();
    run(&mut engine, 4);
    assert_eq!(engine.phase(), Phase::Finished);
}

#[test]
fn test_reset_then_new_session_with_new_config() {
    let mut engine = started(5, 3, 2);
    run(&mut engine, 7);

    assert!(engine.configure(Configuration::new(2, 2, 1)).is_err());
    engine.reset();
    assert_eq!(engine.current_round(), None);
    engine.configure(Configuration::new(2, 2, 1)).unwrap();

    engine.start().unwrap();
    run(&mut engine, 4);
    assert_eq!(engine.phase(), Phase::Finished);
}

#[test]
fn test_configuration_rejection_keeps_prior_config() {
    let mut engine = TimerEngine::new(Configuration::new(5, 3, 2)).unwrap();
    let zero_round = Configuration {
        round_duration: 0,
        ..Configuration::new(9, 9, 9)
    };
    assert!(matches!(
        engine.configure(zero_round),
        Err(TimerError::InvalidConfiguration(_))
    ));
    assert_eq!(engine.config(), &Configuration::new(5, 3, 2));
}
