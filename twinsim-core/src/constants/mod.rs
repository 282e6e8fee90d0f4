//! Constants for TwinSim Core
//!
//! Numeric defaults and operator-facing bounds used throughout the
//! simulation loop, grouped by domain:
//! - **Sensors**: simulated value ranges and units
//! - **Detection**: default anomaly thresholds
//! - **Session**: run duration, rate and history limits
//! - **Time**: unit conversions and the tick interval

/// Simulated sensor ranges and units.
pub mod sensors;

/// Default thresholds for the anomaly detector.
pub mod detection;

/// Configuration bounds and defaults for simulation sessions.
pub mod session;

/// Time unit conversions and tick intervals.
pub mod time;

pub use detection::{DEFAULT_SOUND_THRESHOLD_DB, DEFAULT_VIBRATION_THRESHOLD_MM_S};
pub use session::{
    DEFAULT_READINGS_PER_SECOND, DEFAULT_TOTAL_RUN_TIME_SECS, RECENT_ANOMALY_LIMIT,
};
pub use time::{MS_PER_SECOND, TICK_INTERVAL_MS};
