//! Session State Machine
//!
//! ## Overview
//!
//! Every dashboard drives the same two-state machine from its timer:
//!
//! ```text
//!            start()                  stop() / run time exceeded /
//!  ┌─────────┐ ───────→ ┌─────────┐   data exhausted
//!  │ Stopped │          │ Running │ ───────────────────→ Stopped
//!  └─────────┘ ←─────── └─────────┘
//!               stop()      │ tick()
//!                           └──→ generate/release, detect, record
//! ```
//!
//! Starting clears the history and the anomaly log and records the start
//! time. Ticks while stopped change nothing.
//!
//! ## Catch-up
//!
//! Timer ticks can arrive late. Rather than producing one reading per tick,
//! a live session tops its history up to the count that *should* exist by
//! now ([`readings_due`]). A replay session releases every row whose index
//! has come due, so a late tick releases the rows it skipped.
//!
//! ## Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use twinsim_core::{FixedTime, LiveSession, SensorSimulator, SimulationConfig, TickOutcome};
//!
//! let clock = FixedTime::new(0);
//! let simulator = SensorSimulator::new(StdRng::seed_from_u64(1), clock.clone());
//! let mut session = LiveSession::new(simulator, SimulationConfig::default());
//!
//! session.start();
//! clock.advance(1_500);
//!
//! let outcome = session.tick();
//! assert!(matches!(outcome, TickOutcome::Advanced { generated: 3, .. }));
//! assert_eq!(session.state().history().len(), 3);
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{ReplayConfig, SimulationConfig};
use crate::detector::{AnomalyReport, ThresholdDetector};
use crate::errors::{ReplayError, ReplayResult};
use crate::replay::{ReplayData, ReplayStream};
use crate::simulator::SensorSimulator;
use crate::stream::drain_ready;
use crate::time::{clock_label, elapsed_secs, SystemTime, TimeSource, Timestamp};

/// Number of new readings needed to catch up with the target rate
///
/// `floor(elapsed × rate) − have`, never negative. Zero for a negative or
/// NaN elapsed time.
pub fn readings_due(elapsed_secs: f64, readings_per_second: u32, have: usize) -> usize {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return 0;
    }
    let target = (elapsed_secs * f64::from(readings_per_second)).floor() as usize;
    target.saturating_sub(have)
}

/// One plotted sample
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    /// Time label shown on the chart axis
    pub label: String,
    /// Vibration velocity in mm/s
    pub vibration_mm_s: f64,
    /// Sound level in dB
    pub sound_db: f64,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing changed
    Idle,
    /// Session is still running
    Advanced {
        /// Samples added to the history
        generated: usize,
        /// Anomalies added to the log
        anomalies: usize,
    },
    /// Session stopped itself on this tick
    Completed,
}

/// Running flag, history and anomaly log of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    running: bool,
    started_at: Option<Timestamp>,
    history: Vec<HistoryPoint>,
    anomalies: Vec<String>,
}

impl SessionState {
    /// Check if the session is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// When the current or last session started
    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    /// All samples, oldest first
    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.history.last()
    }

    /// Full anomaly log, oldest first
    pub fn anomalies(&self) -> &[String] {
        &self.anomalies
    }

    /// Last `limit` anomaly log entries, oldest first
    pub fn recent_anomalies(&self, limit: usize) -> &[String] {
        let skip = self.anomalies.len().saturating_sub(limit);
        &self.anomalies[skip..]
    }

    fn begin(&mut self, now: Timestamp) {
        self.running = true;
        self.started_at = Some(now);
        self.history.clear();
        self.anomalies.clear();
    }

    fn halt(&mut self) {
        self.running = false;
    }

    fn record(&mut self, point: HistoryPoint, report: &AnomalyReport) {
        for anomaly in report {
            self.anomalies.push(format!("{} - {}", point.label, anomaly));
        }
        self.history.push(point);
    }
}

/// Simulated session producing readings at a fixed rate
#[derive(Debug)]
pub struct LiveSession<R = StdRng, T = SystemTime> {
    simulator: SensorSimulator<R, T>,
    detector: ThresholdDetector,
    config: SimulationConfig,
    state: SessionState,
}

impl<R: Rng, T: TimeSource> LiveSession<R, T> {
    /// Create a stopped session; `config` is clamped first
    pub fn new(simulator: SensorSimulator<R, T>, config: SimulationConfig) -> Self {
        let config = config.clamped();
        Self {
            simulator: simulator.with_ranges(config.ranges),
            detector: ThresholdDetector::new(config.thresholds),
            config,
            state: SessionState::default(),
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Clear history and start running
    pub fn start(&mut self) {
        let now = self.simulator.clock().now();
        self.state.begin(now);
        log::info!(
            "live session started: {} s at {} readings/s",
            self.config.total_run_time_secs,
            self.config.readings_per_second
        );
    }

    /// Stop running; history is kept
    pub fn stop(&mut self) {
        if self.state.running {
            self.state.halt();
            log::info!("live session stopped after {} readings", self.state.history.len());
        }
    }

    /// Advance the session to the current time
    pub fn tick(&mut self) -> TickOutcome {
        let Some(started_at) = self.state.started_at.filter(|_| self.state.running) else {
            return TickOutcome::Idle;
        };

        let elapsed = elapsed_secs(started_at, self.simulator.clock().now());
        if elapsed > f64::from(self.config.total_run_time_secs) {
            self.state.halt();
            log::info!(
                "live session completed: {} readings, {} anomalies",
                self.state.history.len(),
                self.state.anomalies.len()
            );
            return TickOutcome::Completed;
        }

        let due = readings_due(elapsed, self.config.readings_per_second, self.state.history.len());
        let mut anomalies = 0;
        for _ in 0..due {
            let event = self.simulator.event();
            let report = self.detector.detect(&event);
            anomalies += report.len();
            self.state.record(
                HistoryPoint {
                    label: clock_label(event.timestamp()),
                    vibration_mm_s: event.vibration_mm_s(),
                    sound_db: event.sound_db(),
                },
                &report,
            );
        }

        log::debug!("tick at {elapsed:.2} s: {due} readings, {anomalies} anomalies");
        TickOutcome::Advanced {
            generated: due,
            anomalies,
        }
    }
}

/// Session playing back rows of a loaded CSV, one per elapsed second
#[derive(Debug)]
pub struct ReplaySession<T = SystemTime> {
    clock: T,
    requested: ReplayConfig,
    config: ReplayConfig,
    detector: ThresholdDetector,
    stream: Option<ReplayStream>,
    state: SessionState,
}

impl<T: TimeSource> ReplaySession<T> {
    /// Create a stopped session with no data
    pub fn new(clock: T, config: ReplayConfig) -> Self {
        // Duration stays unset until data bounds it
        let effective = ReplayConfig {
            playback_duration_secs: None,
            ..config.clamped_to(u32::MAX)
        };
        Self {
            clock,
            requested: config,
            config: effective,
            detector: ThresholdDetector::new(effective.thresholds),
            stream: None,
            state: SessionState::default(),
        }
    }

    /// Configuration in effect for the loaded data
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Loaded data, if any
    pub fn data(&self) -> Option<&ReplayData> {
        self.stream.as_ref().map(ReplayStream::data)
    }

    /// Replace the data and reset the session
    pub fn load(&mut self, data: ReplayData) {
        let max_time = data.max_time_secs();
        self.config = self.requested.clamped_to(max_time);
        self.detector = ThresholdDetector::new(self.config.thresholds);
        log::info!("replay data loaded: {} rows, max time {} s", data.len(), max_time);
        self.stream = Some(ReplayStream::new(data));
        self.state = SessionState::default();
    }

    /// Read a CSV file and load it
    ///
    /// On error the previously loaded data and state are kept.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> ReplayResult<()> {
        let data = ReplayData::from_path(path)?;
        self.load(data);
        Ok(())
    }

    /// Rewind the data and start playing
    pub fn start(&mut self) -> ReplayResult<()> {
        let stream = self.stream.as_mut().ok_or(ReplayError::NoData)?;
        stream.reset();
        self.state.begin(self.clock.now());
        log::info!(
            "replay session started: {} s of {} rows",
            self.config.playback_duration_secs.unwrap_or_default(),
            stream.data().len()
        );
        Ok(())
    }

    /// Stop playing; history is kept
    pub fn stop(&mut self) {
        if self.state.running {
            self.state.halt();
            log::info!("replay session stopped after {} rows", self.state.history.len());
        }
    }

    /// Release and record every row due at the current time
    pub fn tick(&mut self) -> TickOutcome {
        let Some(started_at) = self.state.started_at.filter(|_| self.state.running) else {
            return TickOutcome::Idle;
        };
        let Some(stream) = self.stream.as_mut() else {
            return TickOutcome::Idle;
        };

        let index = elapsed_secs(started_at, self.clock.now()).floor() as usize;
        let duration = self.config.playback_duration_secs.unwrap_or_default() as usize;
        let finished = index > duration || index >= stream.data().len();

        if let Some(last) = stream.data().len().checked_sub(1) {
            stream.release_through(index.min(duration).min(last));
        }
        let (rows, _) = drain_ready(stream);

        let mut anomalies = 0;
        for row in &rows {
            let report = self.detector.evaluate(row.vibration_mm_s, row.sound_db);
            anomalies += report.len();
            self.state.record(
                HistoryPoint {
                    label: row.time.to_string(),
                    vibration_mm_s: row.vibration_mm_s,
                    sound_db: row.sound_db,
                },
                &report,
            );
        }

        if finished {
            self.state.halt();
            log::info!(
                "replay session completed: {} rows, {} anomalies",
                self.state.history.len(),
                self.state.anomalies.len()
            );
            return TickOutcome::Completed;
        }

        log::debug!("replay index {index}: {} rows, {anomalies} anomalies", rows.len());
        TickOutcome::Advanced {
            generated: rows.len(),
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationRanges, ValueRange};
    use crate::detector::Thresholds;
    use crate::replay::ReplayRow;
    use crate::time::FixedTime;
    use rand::SeedableRng;

    fn live(config: SimulationConfig) -> (FixedTime, LiveSession<StdRng, FixedTime>) {
        let clock = FixedTime::new(1_000_000);
        let simulator = SensorSimulator::new(StdRng::seed_from_u64(9), clock.clone());
        (clock, LiveSession::new(simulator, config))
    }

    fn replay_rows(count: usize) -> ReplayData {
        ReplayData::from_rows(
            (0..count)
                .map(|i| ReplayRow {
                    time: i as f64,
                    vibration_mm_s: if i == 1 { 9.0 } else { 1.0 },
                    sound_db: 50.0,
                })
                .collect(),
        )
    }

    #[test]
    fn catch_up_count() {
        assert_eq!(readings_due(2.3, 2, 3), 1);
        assert_eq!(readings_due(2.3, 2, 4), 0);
        assert_eq!(readings_due(2.3, 2, 10), 0);
        assert_eq!(readings_due(0.0, 20, 0), 0);
        assert_eq!(readings_due(-1.0, 2, 0), 0);
        assert_eq!(readings_due(f64::NAN, 2, 0), 0);
    }

    #[test]
    fn ticks_while_stopped_change_nothing() {
        let (clock, mut session) = live(SimulationConfig::default());

        clock.advance(3_000);
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(session.state().history().is_empty());
    }

    #[test]
    fn late_tick_catches_up() {
        let (clock, mut session) = live(SimulationConfig::default());
        session.start();

        clock.advance(1_000);
        assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 2, .. }));

        clock.advance(2_300);
        assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 4, .. }));
        assert_eq!(session.state().history().len(), 6);
    }

    #[test]
    fn stops_once_run_time_exceeded() {
        let config = SimulationConfig {
            total_run_time_secs: 5,
            ..SimulationConfig::default()
        };
        let (clock, mut session) = live(config);
        session.start();

        clock.advance(5_000);
        assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 10, .. }));
        assert!(session.state().is_running());

        clock.advance(1);
        assert_eq!(session.tick(), TickOutcome::Completed);
        assert!(!session.state().is_running());
        assert_eq!(session.state().history().len(), 10);

        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn anomalies_are_labelled_and_logged() {
        let config = SimulationConfig {
            thresholds: Thresholds::new(0.1, 0.1),
            ranges: SimulationRanges {
                vibration: ValueRange::new(5.0, 10.0),
                ..SimulationRanges::standard()
            },
            ..SimulationConfig::default()
        };
        let (clock, mut session) = live(config);
        session.start();

        clock.advance(500);
        let outcome = session.tick();
        assert_eq!(outcome, TickOutcome::Advanced { generated: 1, anomalies: 2 });

        let log = session.state().anomalies();
        let label = &session.state().history()[0].label;
        assert!(log[0].starts_with(&format!("{label} - High vibration detected: ")));
        assert!(log[1].starts_with(&format!("{label} - High sound level detected: ")));
    }

    #[test]
    fn restart_clears_history() {
        let (clock, mut session) = live(SimulationConfig::default());
        session.start();
        clock.advance(2_000);
        session.tick();
        session.stop();
        assert_eq!(session.state().history().len(), 4);

        session.start();
        assert!(session.state().history().is_empty());
        assert_eq!(session.state().started_at(), Some(1_002_000));
    }

    #[test]
    fn recent_anomalies_keeps_tail() {
        let mut state = SessionState::default();
        state.anomalies = (0..15).map(|i| i.to_string()).collect();

        let recent = state.recent_anomalies(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0], "5");
        assert_eq!(state.recent_anomalies(100).len(), 15);
    }

    #[test]
    fn replay_start_without_data_fails() {
        let mut session = ReplaySession::new(FixedTime::new(0), ReplayConfig::default());
        assert!(matches!(session.start(), Err(ReplayError::NoData)));
        assert!(!session.state().is_running());
    }

    #[test]
    fn replay_releases_one_row_per_second() {
        let clock = FixedTime::new(0);
        let mut session = ReplaySession::new(clock.clone(), ReplayConfig::default());
        session.load(replay_rows(5));
        session.start().unwrap();

        assert_eq!(session.tick(), TickOutcome::Advanced { generated: 1, anomalies: 0 });

        clock.advance(1_000);
        assert_eq!(session.tick(), TickOutcome::Advanced { generated: 1, anomalies: 1 });
        assert_eq!(session.state().anomalies()[0], "1 - High vibration detected: 9.00 mm/s");

        clock.advance(400);
        assert_eq!(session.tick(), TickOutcome::Advanced { generated: 0, anomalies: 0 });
    }

    #[test]
    fn replay_late_tick_releases_skipped_rows() {
        let clock = FixedTime::new(0);
        let mut session = ReplaySession::new(clock.clone(), ReplayConfig::default());
        session.load(replay_rows(10));
        session.start().unwrap();

        clock.advance(3_200);
        assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 4, .. }));
        let labels: Vec<_> = session.state().history().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["0", "1", "2", "3"]);
    }

    #[test]
    fn replay_stops_at_playback_duration() {
        let clock = FixedTime::new(0);
        let config = ReplayConfig {
            playback_duration_secs: Some(2),
            ..ReplayConfig::default()
        };
        let mut session = ReplaySession::new(clock.clone(), config);
        session.load(replay_rows(10));
        session.start().unwrap();

        clock.advance(2_000);
        assert!(matches!(session.tick(), TickOutcome::Advanced { generated: 3, .. }));

        clock.advance(1_000);
        assert_eq!(session.tick(), TickOutcome::Completed);
        assert_eq!(session.state().history().len(), 3);
    }

    #[test]
    fn replay_stops_when_data_exhausted() {
        let clock = FixedTime::new(0);
        let mut session = ReplaySession::new(clock.clone(), ReplayConfig::default());
        session.load(replay_rows(3));
        assert_eq!(session.config().playback_duration_secs, Some(2));
        session.start().unwrap();

        clock.advance(10_000);
        assert_eq!(session.tick(), TickOutcome::Completed);
        assert_eq!(session.state().history().len(), 3);
        assert!(!session.state().is_running());
    }

    #[test]
    fn reload_resets_session() {
        let clock = FixedTime::new(0);
        let mut session = ReplaySession::new(clock.clone(), ReplayConfig::default());
        session.load(replay_rows(5));
        session.start().unwrap();
        clock.advance(1_000);
        session.tick();

        session.load(replay_rows(2));
        assert!(!session.state().is_running());
        assert!(session.state().history().is_empty());
        assert_eq!(session.data().map(ReplayData::len), Some(2));
    }
}
