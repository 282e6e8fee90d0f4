//! Operator Configuration
//!
//! Everything an operator can tune lives here: run duration, generation
//! rate, detection thresholds and simulated value ranges. Values are
//! clamped once at this boundary (`SimulationConfig::clamped`,
//! `ReplayConfig::clamped_to`), so the session and detector never see an
//! out-of-range setting.
//!
//! | Parameter          | Range                    | Default |
//! |--------------------|--------------------------|---------|
//! | total run time     | 1-600 s                  | 30 s    |
//! | readings/second    | 1-20                     | 2       |
//! | vibration threshold| 0.1-100 mm/s             | 8.0     |
//! | sound threshold    | 0.1-200 dB               | 85.0    |
//! | playback duration  | 0 to the data's max time | max     |
//!
//! Configuration files are TOML with every key optional:
//!
//! ```rust
//! use twinsim_core::SimulationConfig;
//!
//! let config = SimulationConfig::from_toml_str(r#"
//!     readings_per_second = 5
//!     [thresholds]
//!     vibration_mm_s = 12.0
//! "#)?;
//!
//! assert_eq!(config.readings_per_second, 5);
//! assert_eq!(config.thresholds.sound_db, 85.0);
//! # Ok::<(), twinsim_core::ConfigError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::detection::{
    DEFAULT_SOUND_THRESHOLD_DB, DEFAULT_VIBRATION_THRESHOLD_MM_S, SOUND_THRESHOLD_MAX_DB,
    SOUND_THRESHOLD_MIN_DB, VIBRATION_THRESHOLD_MAX_MM_S, VIBRATION_THRESHOLD_MIN_MM_S,
};
use crate::constants::sensors::{
    SOUND_STANDARD_MAX_DB, SOUND_STANDARD_MIN_DB, SOUND_WIDE_MAX_DB, VIBRATION_STANDARD_MAX_MM_S,
    VIBRATION_STANDARD_MIN_MM_S, VIBRATION_WIDE_MAX_MM_S,
};
use crate::constants::session::{
    DEFAULT_READINGS_PER_SECOND, DEFAULT_TOTAL_RUN_TIME_SECS, READINGS_PER_SECOND_MAX,
    READINGS_PER_SECOND_MIN, TOTAL_RUN_TIME_MAX_SECS, TOTAL_RUN_TIME_MIN_SECS,
};
use crate::detector::Thresholds;
use crate::errors::ConfigError;

/// Closed interval a simulated value is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl ValueRange {
    /// Create a range, swapping the bounds if given in reverse
    pub fn new(min: f64, max: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self { min, max }
    }

    /// Check if `value` lies within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Usable copy of this range, or `fallback` if a bound is not finite
    fn sanitized(self, fallback: ValueRange) -> Self {
        if !self.min.is_finite() || !self.max.is_finite() || !(self.max - self.min).is_finite() {
            log::warn!("range [{}, {}] is not finite, using [{}, {}]", self.min, self.max, fallback.min, fallback.max);
            return fallback;
        }
        Self::new(self.min, self.max)
    }
}

/// Simulated value ranges for the two measured channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRanges {
    /// Vibration velocity range in mm/s
    pub vibration: ValueRange,
    /// Sound level range in dB
    pub sound: ValueRange,
}

impl Default for SimulationRanges {
    fn default() -> Self {
        Self::standard()
    }
}

impl SimulationRanges {
    /// Baseline ranges: 0-10 mm/s, 30-90 dB
    pub fn standard() -> Self {
        Self {
            vibration: ValueRange::new(VIBRATION_STANDARD_MIN_MM_S, VIBRATION_STANDARD_MAX_MM_S),
            sound: ValueRange::new(SOUND_STANDARD_MIN_DB, SOUND_STANDARD_MAX_DB),
        }
    }

    /// Wider ranges for denser anomalies: 0-20 mm/s, 30-120 dB
    pub fn wide() -> Self {
        Self {
            vibration: ValueRange::new(VIBRATION_STANDARD_MIN_MM_S, VIBRATION_WIDE_MAX_MM_S),
            sound: ValueRange::new(SOUND_STANDARD_MIN_DB, SOUND_WIDE_MAX_DB),
        }
    }

    /// Copy with every range finite and ordered
    pub fn sanitized(self) -> Self {
        let standard = Self::standard();
        Self {
            vibration: self.vibration.sanitized(standard.vibration),
            sound: self.sound.sanitized(standard.sound),
        }
    }
}

/// Live simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Session stops once elapsed time exceeds this (seconds)
    pub total_run_time_secs: u32,
    /// Target generation rate (readings/second)
    pub readings_per_second: u32,
    /// Detection thresholds
    pub thresholds: Thresholds,
    /// Simulated value ranges
    pub ranges: SimulationRanges,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_run_time_secs: DEFAULT_TOTAL_RUN_TIME_SECS,
            readings_per_second: DEFAULT_READINGS_PER_SECOND,
            thresholds: Thresholds::default(),
            ranges: SimulationRanges::standard(),
        }
    }
}

impl SimulationConfig {
    /// Parse configuration TOML; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Copy with every value inside its operator bounds
    pub fn clamped(self) -> Self {
        Self {
            total_run_time_secs: clamp_count(
                "total run time",
                self.total_run_time_secs,
                TOTAL_RUN_TIME_MIN_SECS,
                TOTAL_RUN_TIME_MAX_SECS,
            ),
            readings_per_second: clamp_count(
                "readings per second",
                self.readings_per_second,
                READINGS_PER_SECOND_MIN,
                READINGS_PER_SECOND_MAX,
            ),
            thresholds: clamp_thresholds(self.thresholds),
            ranges: self.ranges.sanitized(),
        }
    }
}

/// CSV replay settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Stop after this many seconds of playback; `None` plays everything
    pub playback_duration_secs: Option<u32>,
    /// Detection thresholds
    pub thresholds: Thresholds,
}

impl ReplayConfig {
    /// Parse replay configuration TOML; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a replay configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Copy bounded by the loaded data's max time
    ///
    /// The result always carries an explicit playback duration.
    pub fn clamped_to(self, max_time_secs: u32) -> Self {
        let requested = self.playback_duration_secs.unwrap_or(max_time_secs);
        Self {
            playback_duration_secs: Some(clamp_count("playback duration", requested, 0, max_time_secs)),
            thresholds: clamp_thresholds(self.thresholds),
        }
    }
}

fn clamp_thresholds(thresholds: Thresholds) -> Thresholds {
    Thresholds {
        vibration_mm_s: clamp_value(
            "vibration threshold",
            thresholds.vibration_mm_s,
            VIBRATION_THRESHOLD_MIN_MM_S,
            VIBRATION_THRESHOLD_MAX_MM_S,
            DEFAULT_VIBRATION_THRESHOLD_MM_S,
        ),
        sound_db: clamp_value(
            "sound threshold",
            thresholds.sound_db,
            SOUND_THRESHOLD_MIN_DB,
            SOUND_THRESHOLD_MAX_DB,
            DEFAULT_SOUND_THRESHOLD_DB,
        ),
    }
}

fn clamp_count(name: &str, value: u32, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} outside [{min}, {max}], using {clamped}");
    }
    clamped
}

fn clamp_value(name: &str, value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("{name} {value} is not a number, using {fallback}");
        return fallback;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} outside [{min}, {max}], using {clamped}");
    }
    clamped
}
