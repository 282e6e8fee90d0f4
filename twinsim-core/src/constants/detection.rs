//! Default Anomaly Thresholds
//!
//! A reading is anomalous when it strictly exceeds its threshold. The
//! operator may override both values within the bounds below.

/// Default vibration threshold (mm/s).
pub const DEFAULT_VIBRATION_THRESHOLD_MM_S: f64 = 8.0;

/// Default sound threshold (dB).
///
/// Common occupational exposure action level.
pub const DEFAULT_SOUND_THRESHOLD_DB: f64 = 85.0;

/// Smallest vibration threshold the operator may configure (mm/s).
pub const VIBRATION_THRESHOLD_MIN_MM_S: f64 = 0.1;

/// Largest vibration threshold the operator may configure (mm/s).
pub const VIBRATION_THRESHOLD_MAX_MM_S: f64 = 100.0;

/// Smallest sound threshold the operator may configure (dB).
pub const SOUND_THRESHOLD_MIN_DB: f64 = 0.1;

/// Largest sound threshold the operator may configure (dB).
pub const SOUND_THRESHOLD_MAX_DB: f64 = 200.0;

/// Upper bound on anomalies per event: one per checked channel.
pub const MAX_ANOMALIES_PER_EVENT: usize = 2;
