//! Threshold Anomaly Detector
//!
//! ## Overview
//!
//! Compares the two measured channels of an [`Event`] against fixed
//! thresholds and reports every violation. Checks run in a fixed order:
//!
//! 1. vibration velocity > vibration threshold
//! 2. sound level > sound threshold
//!
//! The comparison is strict: a value equal to its threshold is normal.
//! NaN compares false against everything and is never flagged. There are no
//! lower bounds, no multi-event patterns and no hysteresis.
//!
//! ## Output
//!
//! Each [`Anomaly`] renders as a human-readable line with the measured value
//! to two decimals:
//!
//! ```text
//! High vibration detected: 9.50 mm/s
//! High sound level detected: 90.00 dB
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use twinsim_core::{Thresholds, ThresholdDetector};
//!
//! let detector = ThresholdDetector::new(Thresholds::default());
//! let report = detector.evaluate(9.5, 90.0);
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.descriptions()[0], "High vibration detected: 9.50 mm/s");
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::detection::{
    DEFAULT_SOUND_THRESHOLD_DB, DEFAULT_VIBRATION_THRESHOLD_MM_S, MAX_ANOMALIES_PER_EVENT,
};
use crate::constants::sensors::{SOUND_UNIT, VIBRATION_UNIT};
use crate::events::Event;
use crate::readings::SensorKind;

/// Detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Vibration threshold in mm/s
    pub vibration_mm_s: f64,
    /// Sound threshold in dB
    pub sound_db: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            vibration_mm_s: DEFAULT_VIBRATION_THRESHOLD_MM_S,
            sound_db: DEFAULT_SOUND_THRESHOLD_DB,
        }
    }
}

impl Thresholds {
    /// Create thresholds with custom limits
    pub fn new(vibration_mm_s: f64, sound_db: f64) -> Self {
        Self {
            vibration_mm_s,
            sound_db,
        }
    }
}

/// A reading that exceeded its threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anomaly {
    /// Vibration above the vibration threshold
    HighVibration {
        /// Measured velocity in mm/s
        velocity_mm_s: f64,
        /// Threshold that was exceeded
        threshold: f64,
    },
    /// Sound level above the sound threshold
    HighSoundLevel {
        /// Measured level in dB
        level_db: f64,
        /// Threshold that was exceeded
        threshold: f64,
    },
}

impl Anomaly {
    /// Channel that raised the anomaly
    pub fn kind(&self) -> SensorKind {
        match self {
            Anomaly::HighVibration { .. } => SensorKind::Vibration,
            Anomaly::HighSoundLevel { .. } => SensorKind::Microphone,
        }
    }

    /// Offending measurement
    pub fn value(&self) -> f64 {
        match self {
            Anomaly::HighVibration { velocity_mm_s, .. } => *velocity_mm_s,
            Anomaly::HighSoundLevel { level_db, .. } => *level_db,
        }
    }

    /// Threshold the measurement exceeded
    pub fn threshold(&self) -> f64 {
        match self {
            Anomaly::HighVibration { threshold, .. } | Anomaly::HighSoundLevel { threshold, .. } => {
                *threshold
            }
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::HighVibration { velocity_mm_s, .. } => {
                write!(f, "High vibration detected: {:.2} {}", velocity_mm_s, VIBRATION_UNIT)
            }
            Anomaly::HighSoundLevel { level_db, .. } => {
                write!(f, "High sound level detected: {:.2} {}", level_db, SOUND_UNIT)
            }
        }
    }
}

/// Ordered anomalies for one event, vibration before sound
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnomalyReport {
    anomalies: heapless::Vec<Anomaly, MAX_ANOMALIES_PER_EVENT>,
}

impl AnomalyReport {
    /// Number of anomalies
    pub fn len(&self) -> usize {
        self.anomalies.len()
    }

    /// True when the event was normal
    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Iterate anomalies in check order
    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.anomalies.iter()
    }

    /// Human-readable description of each anomaly
    pub fn descriptions(&self) -> Vec<String> {
        self.anomalies.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, anomaly: Anomaly) {
        // Capacity matches the number of checks in `evaluate`
        let _ = self.anomalies.push(anomaly);
    }
}

impl<'a> IntoIterator for &'a AnomalyReport {
    type Item = &'a Anomaly;
    type IntoIter = core::slice::Iter<'a, Anomaly>;

    fn into_iter(self) -> Self::IntoIter {
        self.anomalies.iter()
    }
}

/// Static-threshold detector
///
/// `ThresholdDetector::default()` is the baseline detector with the
/// default thresholds; dashboards build one from operator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdDetector {
    thresholds: Thresholds,
}

impl ThresholdDetector {
    /// Create detector with custom thresholds
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Check one event
    pub fn detect(&self, event: &Event) -> AnomalyReport {
        self.evaluate(event.vibration_mm_s(), event.sound_db())
    }

    /// Check a bare vibration/sound pair
    ///
    /// Used for replayed rows, which carry no camera reading.
    pub fn evaluate(&self, vibration_mm_s: f64, sound_db: f64) -> AnomalyReport {
        let mut report = AnomalyReport::default();

        if vibration_mm_s > self.thresholds.vibration_mm_s {
            report.push(Anomaly::HighVibration {
                velocity_mm_s: vibration_mm_s,
                threshold: self.thresholds.vibration_mm_s,
            });
        }

        if sound_db > self.thresholds.sound_db {
            report.push(Anomaly::HighSoundLevel {
                level_db: sound_db,
                threshold: self.thresholds.sound_db,
            });
        }

        report
    }
}
