//! Session Configuration Bounds
//!
//! Limits applied at the configuration boundary so out-of-range values
//! never reach the simulation loop.

// ===== RUN DURATION =====

/// Default total run time of a live session (seconds).
pub const DEFAULT_TOTAL_RUN_TIME_SECS: u32 = 30;

/// Shortest run a live session accepts (seconds).
pub const TOTAL_RUN_TIME_MIN_SECS: u32 = 1;

/// Longest run a live session accepts (seconds). Ten minutes.
pub const TOTAL_RUN_TIME_MAX_SECS: u32 = 600;

// ===== GENERATION RATE =====

/// Default number of readings generated per second.
pub const DEFAULT_READINGS_PER_SECOND: u32 = 2;

/// Slowest accepted generation rate (readings/second).
pub const READINGS_PER_SECOND_MIN: u32 = 1;

/// Fastest accepted generation rate (readings/second).
pub const READINGS_PER_SECOND_MAX: u32 = 20;

// ===== DISPLAY =====

/// Number of anomaly log entries a dashboard shows.
pub const RECENT_ANOMALY_LIMIT: usize = 10;

/// Message shown in place of the anomaly log while it is empty.
pub const NO_ANOMALIES_MESSAGE: &str = "No anomalies detected yet.";

// ===== CONSOLE LOOP =====

/// Default number of cycles for the console loop.
pub const DEFAULT_CONSOLE_CYCLES: u32 = 10;

/// Default delay between console cycles (seconds).
pub const DEFAULT_CONSOLE_DELAY_SECS: u64 = 1;
