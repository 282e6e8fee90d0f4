//! Core loop for TwinSim
//!
//! Simulates three sensor channels, merges one reading per channel into an
//! event, and checks each event against static thresholds. The session
//! module wraps that loop in the Stopped/Running state machine every
//! dashboard front-end drives from its timer.
//!
//! ```text
//! tick → SensorSimulator (×3) → ingest → ThresholdDetector → SessionState
//! ```
//!
//! ```no_run
//! use twinsim_core::{ingest, SensorSimulator, ThresholdDetector};
//!
//! let mut simulator = SensorSimulator::from_entropy();
//! let detector = ThresholdDetector::default();
//!
//! let event = ingest(
//!     simulator.camera(),
//!     simulator.vibration(),
//!     simulator.microphone(),
//! );
//!
//! for anomaly in detector.detect(&event).iter() {
//!     println!("{anomaly}");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod events;
pub mod readings;
pub mod replay;
pub mod session;
pub mod simulator;
pub mod stream;
pub mod time;

// Public API
pub use config::{ReplayConfig, SimulationConfig, SimulationRanges, ValueRange};
pub use detector::{Anomaly, AnomalyReport, Thresholds, ThresholdDetector};
pub use errors::{ConfigError, ReplayError};
pub use events::{ingest, Event};
pub use readings::{CameraReading, MicrophoneReading, Reading, SensorKind, VibrationReading};
pub use replay::{ReplayData, ReplayRow, ReplayStream};
pub use session::{readings_due, HistoryPoint, LiveSession, ReplaySession, SessionState, TickOutcome};
pub use simulator::SensorSimulator;
pub use stream::{Stream, StreamError};
pub use time::{FixedTime, SystemTime, TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
