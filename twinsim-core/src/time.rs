//! Time management for the simulation loop
//!
//! Provides a clock abstraction so the simulator and the session state
//! machine can run against the system clock in the shells and against a
//! settable clock in tests:
//! - `SystemTime`: wall clock, milliseconds since the Unix epoch
//! - `FixedTime`: manually advanced, shared between clones

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, TimeZone};

use crate::constants::time::MS_PER_SECOND;

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time
    fn is_wall_clock(&self) -> bool;
}

/// System time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing
///
/// Clones share the same instant, so a test can keep one handle and advance
/// the clock seen by a simulator or session that owns another.
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Rc<Cell<Timestamp>>,
}

impl FixedTime {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Rc::new(Cell::new(timestamp)),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get() + ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Seconds elapsed between two timestamps
///
/// Returns 0.0 if the clock went backwards.
pub fn elapsed_secs(start: Timestamp, now: Timestamp) -> f64 {
    now.saturating_sub(start) as f64 / MS_PER_SECOND as f64
}

/// Format a timestamp as local `HH:MM:SS`
pub fn clock_label(timestamp: Timestamp) -> String {
    format_local(timestamp, "%H:%M:%S")
}

/// Format a timestamp like C `ctime`, e.g. `Tue Mar  4 10:15:02 2025`
pub fn ctime_label(timestamp: Timestamp) -> String {
    format_local(timestamp, "%a %b %e %H:%M:%S %Y")
}

fn format_local(timestamp: Timestamp, pattern: &str) -> String {
    match Local.timestamp_millis_opt(timestamp as i64).single() {
        Some(datetime) => datetime.format(pattern).to_string(),
        None => String::from("--:--:--"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn fixed_time_clones_share_instant() {
        let time = FixedTime::new(0);
        let handle = time.clone();

        handle.set(42_000);
        assert_eq!(time.now(), 42_000);
        assert!(!time.is_wall_clock());
    }

    #[test]
    fn elapsed_seconds() {
        assert_eq!(elapsed_secs(1_000, 3_300), 2.3);
        assert_eq!(elapsed_secs(5_000, 4_000), 0.0);
    }

    #[test]
    fn clock_label_shape() {
        let label = clock_label(SystemTime.now());
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
