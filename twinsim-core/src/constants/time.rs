//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Interval between dashboard ticks (milliseconds).
///
/// Both the live and the replay dashboard poll at 1 Hz.
pub const TICK_INTERVAL_MS: u64 = 1000;
