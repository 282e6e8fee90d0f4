//! Sensor Simulator
//!
//! Produces synthetic readings for the three channels on demand. Each call
//! reads the simulator's clock and, for the measured channels, draws one
//! value uniformly from the configured [`SimulationRanges`]:
//!
//! | Channel    | Standard      | Wide           |
//! |------------|---------------|----------------|
//! | camera     | captured=true | captured=true  |
//! | vibration  | 0-10 mm/s     | 0-20 mm/s      |
//! | microphone | 30-90 dB      | 30-120 dB      |
//!
//! Both the random source and the clock are type parameters, so tests run a
//! seeded `StdRng` against a [`FixedTime`](crate::time::FixedTime).
//!
//! ```rust
//! use twinsim_core::{SensorSimulator, SimulationRanges};
//!
//! let mut simulator = SensorSimulator::with_seed(7).with_ranges(SimulationRanges::wide());
//! let reading = simulator.vibration();
//!
//! assert!(SimulationRanges::wide().vibration.contains(reading.velocity_mm_s));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SimulationRanges, ValueRange};
use crate::events::{ingest, Event};
use crate::readings::{CameraReading, MicrophoneReading, VibrationReading};
use crate::time::{SystemTime, TimeSource};

/// Synthetic reading generator
#[derive(Debug, Clone)]
pub struct SensorSimulator<R = StdRng, T = SystemTime> {
    rng: R,
    clock: T,
    ranges: SimulationRanges,
}

impl SensorSimulator<StdRng, SystemTime> {
    /// Wall-clock simulator seeded from the OS
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SystemTime)
    }

    /// Wall-clock simulator with a reproducible value sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SystemTime)
    }
}

impl<R: Rng, T: TimeSource> SensorSimulator<R, T> {
    /// Create a simulator with the standard ranges
    pub fn new(rng: R, clock: T) -> Self {
        Self {
            rng,
            clock,
            ranges: SimulationRanges::standard(),
        }
    }

    /// Replace the value ranges
    pub fn with_ranges(mut self, ranges: SimulationRanges) -> Self {
        self.ranges = ranges.sanitized();
        self
    }

    /// Swap the clock, keeping the random source and ranges
    pub fn with_clock<U: TimeSource>(self, clock: U) -> SensorSimulator<R, U> {
        SensorSimulator {
            rng: self.rng,
            clock,
            ranges: self.ranges,
        }
    }

    /// Ranges values are drawn from
    pub fn ranges(&self) -> &SimulationRanges {
        &self.ranges
    }

    /// Clock used for reading timestamps
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Simulate a camera capture
    pub fn camera(&self) -> CameraReading {
        CameraReading {
            timestamp: self.clock.now(),
            captured: true,
        }
    }

    /// Simulate a vibration measurement
    pub fn vibration(&mut self) -> VibrationReading {
        let velocity_mm_s = self.sample(self.ranges.vibration);
        VibrationReading {
            timestamp: self.clock.now(),
            velocity_mm_s,
        }
    }

    /// Simulate a sound level measurement
    pub fn microphone(&mut self) -> MicrophoneReading {
        let level_db = self.sample(self.ranges.sound);
        MicrophoneReading {
            timestamp: self.clock.now(),
            level_db,
        }
    }

    /// One reading per channel, merged into an event
    pub fn event(&mut self) -> Event {
        let camera = self.camera();
        let vibration = self.vibration();
        let microphone = self.microphone();
        ingest(camera, vibration, microphone)
    }

    fn sample(&mut self, range: ValueRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }
}
