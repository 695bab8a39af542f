//! Countdown, status and progress formatting for presenters

use crate::state::{Configuration, Phase, TimerSnapshot};

/// Format seconds as zero-padded `MM:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Headline for the current phase
pub fn status_text(snapshot: &TimerSnapshot) -> String {
    let round = snapshot.current_round.unwrap_or(1);
    match snapshot.phase {
        Phase::Idle => "Ready".to_string(),
        Phase::RoundActive => format!("Round {} of {}", round, snapshot.total_rounds),
        Phase::RestActive => format!("Rest - Round {} of {}", round, snapshot.total_rounds),
        Phase::Finished => "Training Complete!".to_string(),
    }
}

/// Label under the countdown
pub fn period_label(snapshot: &TimerSnapshot) -> &'static str {
    if snapshot.is_resting() {
        "Rest Time"
    } else {
        "Round Time"
    }
}

/// Single console line: status, period and countdown
pub fn countdown_line(snapshot: &TimerSnapshot) -> String {
    match snapshot.phase {
        Phase::Idle | Phase::Finished => format!(
            "[{}] {}",
            status_text(snapshot),
            format_time(snapshot.time_remaining)
        ),
        Phase::RoundActive | Phase::RestActive => format!(
            "[{}] {} {}",
            status_text(snapshot),
            period_label(snapshot),
            format_time(snapshot.time_remaining)
        ),
    }
}

/// Session progress in `[0, 1]`
///
/// Completed rounds count fully; the current round counts by elapsed time.
/// A round counts as completed only once its rest is over, so during rest
/// the bar shows the rounds before it.
pub fn progress(snapshot: &TimerSnapshot, config: &Configuration) -> f64 {
    let total = f64::from(config.total_rounds);
    let round = f64::from(snapshot.current_round.unwrap_or(1));
    match snapshot.phase {
        Phase::Idle => 0.0,
        Phase::Finished => 1.0,
        Phase::RestActive => ((round - 1.0) / total).clamp(0.0, 1.0),
        Phase::RoundActive => {
            let length = f64::from(config.round_duration);
            let elapsed = length - f64::from(snapshot.time_remaining);
            ((round - 1.0) / total + elapsed / length / total).clamp(0.0, 1.0)
        }
    }
}

/// One-line recap shown when a session completes
pub fn summary(config: &Configuration) -> String {
    format!(
        "{} rounds × {}:{:02} each",
        config.total_rounds,
        config.round_duration / 60,
        config.round_duration % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: Phase, round: Option<u32>, remaining: u32) -> TimerSnapshot {
        TimerSnapshot {
            phase,
            current_round: round,
            total_rounds: 4,
            time_remaining: remaining,
            running: phase.is_active(),
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(180), "03:00");
        assert_eq!(format_time(3725), "62:05");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&snapshot(Phase::Idle, None, 180)), "Ready");
        assert_eq!(status_text(&snapshot(Phase::RoundActive, Some(2), 10)), "Round 2 of 4");
        assert_eq!(
            status_text(&snapshot(Phase::RestActive, Some(3), 10)),
            "Rest - Round 3 of 4"
        );
        assert_eq!(status_text(&snapshot(Phase::Finished, Some(4), 0)), "Training Complete!");
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(&snapshot(Phase::RestActive, Some(1), 5)), "Rest Time");
        assert_eq!(period_label(&snapshot(Phase::RoundActive, Some(1), 5)), "Round Time");
    }

    #[test]
    fn test_countdown_line() {
        assert_eq!(
            countdown_line(&snapshot(Phase::RestActive, Some(2), 45)),
            "[Rest - Round 2 of 4] Rest Time 00:45"
        );
        assert_eq!(countdown_line(&snapshot(Phase::Idle, None, 180)), "[Ready] 03:00");
    }

    #[test]
    fn test_progress() {
        let config = Configuration::new(100, 20, 4);
        assert_eq!(progress(&snapshot(Phase::Idle, None, 100), &config), 0.0);
        assert_eq!(progress(&snapshot(Phase::RoundActive, Some(1), 100), &config), 0.0);
        assert!((progress(&snapshot(Phase::RoundActive, Some(2), 50), &config) - 0.375).abs() < 1e-9);
        assert!((progress(&snapshot(Phase::RestActive, Some(2), 20), &config) - 0.25).abs() < 1e-9);
        assert!((progress(&snapshot(Phase::RestActive, Some(4), 1), &config) - 0.75).abs() < 1e-9);
        assert_eq!(progress(&snapshot(Phase::Finished, Some(4), 0), &config), 1.0);
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&Configuration::new(95, 30, 6)), "6 rounds × 1:35 each");
    }
}
