//! Simulated Sensor Ranges
//!
//! Uniform ranges the simulator draws from. Two presets exist: the
//! standard ranges of the baseline simulator and the wider ranges used by
//! the denser-anomaly dashboard.

// ===== VIBRATION (mm/s) =====

/// Lower bound of the standard vibration range (mm/s).
pub const VIBRATION_STANDARD_MIN_MM_S: f64 = 0.0;

/// Upper bound of the standard vibration range (mm/s).
///
/// Sits above the default 8.0 mm/s threshold, so roughly one reading in
/// five is flagged.
pub const VIBRATION_STANDARD_MAX_MM_S: f64 = 10.0;

/// Upper bound of the wide vibration range (mm/s).
pub const VIBRATION_WIDE_MAX_MM_S: f64 = 20.0;

// ===== SOUND LEVEL (dB) =====

/// Lower bound of every sound range (dB). Roughly a quiet room.
pub const SOUND_STANDARD_MIN_DB: f64 = 30.0;

/// Upper bound of the standard sound range (dB).
///
/// Normal speech is about 60 dB; loud machinery is 80 dB and above.
pub const SOUND_STANDARD_MAX_DB: f64 = 90.0;

/// Upper bound of the wide sound range (dB).
pub const SOUND_WIDE_MAX_DB: f64 = 120.0;

// ===== UNITS =====

/// Unit label for vibration velocity.
pub const VIBRATION_UNIT: &str = "mm/s";

/// Unit label for sound level.
pub const SOUND_UNIT: &str = "dB";
