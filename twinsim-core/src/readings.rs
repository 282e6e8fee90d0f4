//! Sensor Readings
//!
//! One struct per channel, each carrying the timestamp it was produced at.
//! Readings are plain values: created fresh on every tick, never mutated,
//! and identified only by their timestamp.
//!
//! | Channel    | Payload                 | Unit |
//! |------------|-------------------------|------|
//! | Camera     | `captured` flag         | -    |
//! | Vibration  | velocity magnitude      | mm/s |
//! | Microphone | sound pressure level    | dB   |

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::sensors::{SOUND_UNIT, VIBRATION_UNIT};
use crate::time::Timestamp;

/// Sensor channel enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Frame capture trigger
    Camera,
    /// Vibration velocity probe
    Vibration,
    /// Sound level meter
    Microphone,
}

impl SensorKind {
    /// All channels, in event slot order
    pub const ALL: [SensorKind; 3] = [SensorKind::Camera, SensorKind::Vibration, SensorKind::Microphone];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Camera => "camera",
            SensorKind::Vibration => "vibration",
            SensorKind::Microphone => "microphone",
        }
    }

    /// Get expected unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::Camera => "",
            SensorKind::Vibration => VIBRATION_UNIT,
            SensorKind::Microphone => SOUND_UNIT,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Camera capture notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraReading {
    /// When the frame was captured
    pub timestamp: Timestamp,
    /// Whether a frame was captured on this tick
    pub captured: bool,
}

/// Vibration velocity measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibrationReading {
    /// When the measurement was taken
    pub timestamp: Timestamp,
    /// Velocity magnitude in mm/s
    pub velocity_mm_s: f64,
}

/// Sound level measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicrophoneReading {
    /// When the measurement was taken
    pub timestamp: Timestamp,
    /// Sound pressure level in dB
    pub level_db: f64,
}

/// A reading from any channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reading {
    /// Camera capture
    Camera(CameraReading),
    /// Vibration measurement
    Vibration(VibrationReading),
    /// Microphone measurement
    Microphone(MicrophoneReading),
}

impl Reading {
    /// Channel this reading came from
    pub fn kind(&self) -> SensorKind {
        match self {
            Reading::Camera(_) => SensorKind::Camera,
            Reading::Vibration(_) => SensorKind::Vibration,
            Reading::Microphone(_) => SensorKind::Microphone,
        }
    }

    /// Get reading timestamp
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Reading::Camera(r) => r.timestamp,
            Reading::Vibration(r) => r.timestamp,
            Reading::Microphone(r) => r.timestamp,
        }
    }

    /// Measured value, if the channel produces one
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Camera(_) => None,
            Reading::Vibration(r) => Some(r.velocity_mm_s),
            Reading::Microphone(r) => Some(r.level_db),
        }
    }
}

impl From<CameraReading> for Reading {
    fn from(reading: CameraReading) -> Self {
        Reading::Camera(reading)
    }
}

impl From<VibrationReading> for Reading {
    fn from(reading: VibrationReading) -> Self {
        Reading::Vibration(reading)
    }
}

impl From<MicrophoneReading> for Reading {
    fn from(reading: MicrophoneReading) -> Self {
        Reading::Microphone(reading)
    }
}
