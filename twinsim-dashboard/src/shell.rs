//! Tick loops for the three front-ends
//!
//! Every loop runs on the current-thread runtime and multiplexes a 1 s
//! `tokio::time::interval` with Ctrl-C through `select!`, so a tick always
//! finishes before the stop request is handled. Missed ticks are delayed,
//! never burst; the sessions' catch-up logic covers the gap.
//!
//! Frames go to stdout, logs to stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use twinsim_core::constants::time::TICK_INTERVAL_MS;
use twinsim_core::{
    LiveSession, ReplaySession, SensorSimulator, SessionState, ThresholdDetector, TickOutcome,
    TimeSource,
};

use crate::render;

/// A session a dashboard can drive from its timer
pub trait Dashboard {
    /// Heading of each frame
    fn title(&self) -> &'static str;

    /// Advance to the current time
    fn tick(&mut self) -> TickOutcome;

    /// Stop on operator request
    fn stop(&mut self);

    /// State to render
    fn state(&self) -> &SessionState;
}

impl<R: Rng, T: TimeSource> Dashboard for LiveSession<R, T> {
    fn title(&self) -> &'static str {
        "Live Simulation"
    }

    fn tick(&mut self) -> TickOutcome {
        LiveSession::tick(self)
    }

    fn stop(&mut self) {
        LiveSession::stop(self)
    }

    fn state(&self) -> &SessionState {
        LiveSession::state(self)
    }
}

impl<T: TimeSource> Dashboard for ReplaySession<T> {
    fn title(&self) -> &'static str {
        "CSV Replay"
    }

    fn tick(&mut self) -> TickOutcome {
        ReplaySession::tick(self)
    }

    fn stop(&mut self) {
        ReplaySession::stop(self)
    }

    fn state(&self) -> &SessionState {
        ReplaySession::state(self)
    }
}

/// What a single tick means for the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep ticking
    Continue,
    /// Session has finished
    Done,
}

/// Tick once and render the resulting frame
pub fn step<D: Dashboard>(dashboard: &mut D) -> (Step, Option<String>) {
    match dashboard.tick() {
        TickOutcome::Idle => (Step::Done, None),
        TickOutcome::Advanced { .. } => (Step::Continue, Some(render::frame(dashboard.title(), dashboard.state()))),
        TickOutcome::Completed => {
            let mut text = render::frame(dashboard.title(), dashboard.state());
            text.push_str("Done\n");
            (Step::Done, Some(text))
        }
    }
}

/// Drive a started session until it completes or Ctrl-C arrives
pub async fn run_dashboard<D: Dashboard>(dashboard: &mut D) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    println!("Simulation Started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let (next, frame) = step(dashboard);
                if let Some(frame) = frame {
                    println!("{frame}");
                }
                if next == Step::Done {
                    break;
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                dashboard.stop();
                println!("{}", render::frame(dashboard.title(), dashboard.state()));
                println!("Simulation Stopped");
                break;
            }
        }
    }

    let state = dashboard.state();
    info!(
        samples = state.history().len(),
        anomalies = state.anomalies().len(),
        "session finished"
    );
    Ok(())
}

/// Fixed-cycle loop printing each event
pub async fn run_console<R: Rng, T: TimeSource>(
    mut simulator: SensorSimulator<R, T>,
    cycles: u32,
    delay: Duration,
) -> Result<()> {
    let detector = ThresholdDetector::default();
    let mut ticker = interval(delay);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    println!("Starting Digital Twin Simulation...");
    for cycle in 0..cycles {
        tokio::select! {
            _ = ticker.tick() => {}
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                info!(completed = cycle, "console interrupted");
                return Ok(());
            }
        }

        let event = simulator.event();
        let report = detector.detect(&event);
        print!("{}", render::console_event(&event, &report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use twinsim_core::{FixedTime, ReplayConfig, ReplayData, ReplayRow, SimulationConfig};

    #[test]
    fn live_frames_until_completion() {
        let clock = FixedTime::new(0);
        let simulator = SensorSimulator::new(StdRng::seed_from_u64(3), clock.clone());
        let config = SimulationConfig {
            total_run_time_secs: 1,
            ..SimulationConfig::default()
        };
        let mut session = LiveSession::new(simulator, config);
        session.start();

        clock.advance(1_000);
        let (next, frame) = step(&mut session);
        assert_eq!(next, Step::Continue);
        let frame = frame.unwrap();
        assert!(frame.starts_with("── Live Simulation"));
        assert!(frame.contains(" mm/s\n"));
        assert!(frame.contains("Vibration (mm/s) "));

        clock.advance(1_000);
        let (next, frame) = step(&mut session);
        assert_eq!(next, Step::Done);
        assert!(frame.unwrap().ends_with("Done\n"));
    }

    #[test]
    fn replay_frame_shows_anomaly_log() {
        let clock = FixedTime::new(0);
        let mut session = ReplaySession::new(clock.clone(), ReplayConfig::default());
        session.load(ReplayData::from_rows(vec![
            ReplayRow { time: 0.0, vibration_mm_s: 2.0, sound_db: 40.0 },
            ReplayRow { time: 1.0, vibration_mm_s: 12.5, sound_db: 40.0 },
        ]));
        session.start().unwrap();

        clock.advance(1_000);
        let (_, frame) = step(&mut session);
        let frame = frame.unwrap();
        assert!(frame.contains("Latest Vibration:   12.50 mm/s"));
        assert!(frame.contains("  1 - High vibration detected: 12.50 mm/s\n"));
        assert!(frame.contains("0 → 1"));
    }

    #[test]
    fn stopped_session_ends_loop_silently() {
        let mut session = ReplaySession::new(FixedTime::new(0), ReplayConfig::default());
        assert_eq!(step(&mut session), (Step::Done, None));
    }
}
