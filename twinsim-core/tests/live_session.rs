//! End-to-end behaviour of the simulated dashboard session

mod common;

use common::live_session;
use twinsim_core::{SimulationConfig, SimulationRanges, Thresholds, TickOutcome};

#[test]
fn full_run_generates_rate_times_duration() {
    let config = SimulationConfig {
        total_run_time_secs: 5,
        readings_per_second: 4,
        ..SimulationConfig::default()
    };
    let (clock, mut session) = live_session(config);
    session.start();

    let mut ticks = 0;
    loop {
        clock.advance(1_000);
        ticks += 1;
        if session.tick() == TickOutcome::Completed {
            break;
        }
    }

    assert_eq!(ticks, 6);
    assert_eq!(session.state().history().len(), 20);
    assert!(!session.state().is_running());
}

#[test]
fn out_of_range_config_is_clamped_before_use() {
    let config = SimulationConfig {
        total_run_time_secs: 10_000,
        readings_per_second: 0,
        ..SimulationConfig::default()
    };
    let (clock, mut session) = live_session(config);

    assert_eq!(session.config().total_run_time_secs, 600);
    assert_eq!(session.config().readings_per_second, 1);

    session.start();
    clock.advance(3_000);
    assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 3, .. }));
}

#[test]
fn wide_ranges_with_low_thresholds_log_every_event() {
    let config = SimulationConfig {
        thresholds: Thresholds::new(0.1, 0.1),
        ranges: SimulationRanges {
            vibration: twinsim_core::ValueRange::new(10.0, 20.0),
            ..SimulationRanges::wide()
        },
        ..SimulationConfig::default()
    };
    let (clock, mut session) = live_session(config);
    session.start();

    clock.advance(2_000);
    session.tick();

    let state = session.state();
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.anomalies().len(), 8);
    assert_eq!(state.recent_anomalies(10).len(), 8);
}

#[test]
fn default_ranges_never_exceed_default_vibration_bounds() {
    let (clock, mut session) = live_session(SimulationConfig::default());
    session.start();

    clock.advance(30_000);
    session.tick();

    let ranges = SimulationRanges::standard();
    for point in session.state().history() {
        assert!(ranges.vibration.contains(point.vibration_mm_s));
        assert!(ranges.sound.contains(point.sound_db));
    }
    assert_eq!(session.state().history().len(), 60);
}

#[test]
fn explicit_stop_freezes_history() {
    let (clock, mut session) = live_session(SimulationConfig::default());
    session.start();

    clock.advance(1_000);
    session.tick();
    session.stop();

    clock.advance(5_000);
    assert_eq!(session.tick(), TickOutcome::Idle);
    assert_eq!(session.state().history().len(), 2);
    assert!(session.state().latest().is_some());
}
