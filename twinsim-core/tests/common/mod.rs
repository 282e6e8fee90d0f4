//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;
use twinsim_core::{
    FixedTime, LiveSession, ReplayConfig, ReplaySession, SensorSimulator, SimulationConfig,
    Timestamp,
};

/// Arbitrary start instant, well clear of zero
pub const START: Timestamp = 1_700_000_000_000;

/// Header line accepted by the replay loader
pub const HEADER: &str = "Time,Vibration (mm/s),Sound Level (dB)";

/// Live session on a settable clock with a fixed seed
pub fn live_session(config: SimulationConfig) -> (FixedTime, LiveSession<StdRng, FixedTime>) {
    let clock = FixedTime::new(START);
    let simulator = SensorSimulator::new(StdRng::seed_from_u64(0xD1617), clock.clone());
    (clock, LiveSession::new(simulator, config))
}

/// Replay session on a settable clock, no data loaded
pub fn replay_session(config: ReplayConfig) -> (FixedTime, ReplaySession<FixedTime>) {
    let clock = FixedTime::new(START);
    (clock.clone(), ReplaySession::new(clock, config))
}

/// Write `lines` to a temporary CSV file
pub fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// CSV with one row per second, `(vibration, sound)` per row
pub fn recording(samples: &[(f64, f64)]) -> NamedTempFile {
    let rows: Vec<String> = samples
        .iter()
        .enumerate()
        .map(|(second, (vibration, sound))| format!("{second},{vibration},{sound}"))
        .collect();

    let mut lines = vec![HEADER];
    lines.extend(rows.iter().map(String::as_str));
    csv_file(&lines)
}
