//! Event Ingestion
//!
//! ## Overview
//!
//! An [`Event`] is the merged set of one reading per channel for a single
//! tick. Ingestion is a structural merge: the three readings are stored as
//! given, with no validation and no transformation.
//!
//! ```text
//! CameraReading ─────┐
//! VibrationReading ──┼─→ ingest() ─→ Event ─→ ThresholdDetector
//! MicrophoneReading ─┘                  └───→ SessionState history
//! ```
//!
//! ## Slot Typing
//!
//! Each slot has its own reading type, so an event is complete by
//! construction and a vibration reading cannot land in the microphone
//! slot. Two readings of the *same* type are still indistinguishable; the
//! caller is trusted to pass the readings of one tick.

use serde::{Deserialize, Serialize};

use crate::readings::{CameraReading, MicrophoneReading, Reading, SensorKind, VibrationReading};
use crate::time::Timestamp;

/// One reading of each channel, produced in the same tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Camera slot
    pub camera: CameraReading,
    /// Vibration slot
    pub vibration: VibrationReading,
    /// Microphone slot
    pub microphone: MicrophoneReading,
}

/// Merge three readings into an event
pub fn ingest(
    camera: CameraReading,
    vibration: VibrationReading,
    microphone: MicrophoneReading,
) -> Event {
    Event {
        camera,
        vibration,
        microphone,
    }
}

impl Event {
    /// Get event timestamp (the camera capture time)
    pub fn timestamp(&self) -> Timestamp {
        self.camera.timestamp
    }

    /// Vibration velocity in mm/s
    pub fn vibration_mm_s(&self) -> f64 {
        self.vibration.velocity_mm_s
    }

    /// Sound level in dB
    pub fn sound_db(&self) -> f64 {
        self.microphone.level_db
    }

    /// Reading stored under a channel
    pub fn reading(&self, kind: SensorKind) -> Reading {
        match kind {
            SensorKind::Camera => self.camera.into(),
            SensorKind::Vibration => self.vibration.into(),
            SensorKind::Microphone => self.microphone.into(),
        }
    }

    /// All readings in slot order
    pub fn readings(&self) -> [Reading; 3] {
        SensorKind::ALL.map(|kind| self.reading(kind))
    }
}
