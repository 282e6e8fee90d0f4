//! CSV Replay Source
//!
//! ## Overview
//!
//! Loads a recorded run from CSV and hands its rows out one elapsed second
//! at a time. The file needs a header row with at least these columns,
//! checked in this order; any other columns are ignored:
//!
//! | Column             | Meaning                         |
//! |--------------------|---------------------------------|
//! | `Time`             | time label of the row (seconds) |
//! | `Vibration (mm/s)` | vibration velocity              |
//! | `Sound Level (dB)` | sound level                     |
//!
//! Rows are consumed in file order; the `Time` column only labels them and
//! bounds the playback duration ([`ReplayData::max_time_secs`]).
//!
//! ## Release Model
//!
//! [`ReplayStream`] implements [`Stream`]. The session releases rows up
//! to an index as time passes; the stream yields released rows, answers
//! `WouldBlock` once it reaches the release watermark and `EndOfStream`
//! after the last row.
//!
//! ```text
//! rows:      [0] [1] [2] [3] [4]
//! released:   ✓   ✓   ✓            release_through(2)
//! position:           ^            next poll yields row 2
//! ```

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ReplayError, ReplayResult};
use crate::stream::{Stream, StreamError};

/// Header of the time-label column
pub const TIME_COLUMN: &str = "Time";
/// Header of the vibration column
pub const VIBRATION_COLUMN: &str = "Vibration (mm/s)";
/// Header of the sound level column
pub const SOUND_COLUMN: &str = "Sound Level (dB)";
/// Required columns, in validation order
pub const REQUIRED_COLUMNS: [&str; 3] = [TIME_COLUMN, VIBRATION_COLUMN, SOUND_COLUMN];

/// One recorded sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayRow {
    /// Value of the `Time` column
    pub time: f64,
    /// Vibration velocity in mm/s
    pub vibration_mm_s: f64,
    /// Sound level in dB
    pub sound_db: f64,
}

/// Validated rows of a replay file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayData {
    rows: Vec<ReplayRow>,
}

impl ReplayData {
    /// Open and parse a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: io::Read>(reader: R) -> ReplayResult<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let mut indices = [0usize; 3];
        for (index, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *index = headers
                .iter()
                .position(|header| header == column)
                .ok_or(ReplayError::MissingColumn { column })?;
        }
        let [time_index, vibration_index, sound_index] = indices;

        let mut rows = Vec::new();
        for (offset, record) in csv.records().enumerate() {
            let record = record?;
            let cell = |index: usize, column: &'static str| -> ReplayResult<f64> {
                let raw = record.get(index).unwrap_or_default();
                raw.parse().map_err(|_| ReplayError::InvalidValue {
                    row: offset + 1,
                    column,
                    value: raw.to_owned(),
                })
            };

            rows.push(ReplayRow {
                time: cell(time_index, TIME_COLUMN)?,
                vibration_mm_s: cell(vibration_index, VIBRATION_COLUMN)?,
                sound_db: cell(sound_index, SOUND_COLUMN)?,
            });
        }

        Ok(Self { rows })
    }

    /// Build from rows already in memory
    pub fn from_rows(rows: Vec<ReplayRow>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the file had no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in file order
    pub fn rows(&self) -> &[ReplayRow] {
        &self.rows
    }

    /// Largest `Time` value, truncated to whole seconds
    ///
    /// Zero for an empty file. Non-finite and negative times are ignored.
    pub fn max_time_secs(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row.time)
            .filter(|time| time.is_finite())
            .fold(0.0_f64, f64::max) as u32
    }
}

/// Cursor over replay rows, released one index at a time
#[derive(Debug, Clone)]
pub struct ReplayStream {
    data: ReplayData,
    position: usize,
    released: usize,
}

impl ReplayStream {
    /// Create a stream with nothing released
    pub fn new(data: ReplayData) -> Self {
        Self {
            data,
            position: 0,
            released: 0,
        }
    }

    /// Make every row with index ≤ `index` available
    ///
    /// The watermark only moves forward.
    pub fn release_through(&mut self, index: usize) {
        let watermark = index.saturating_add(1).min(self.data.len());
        self.released = self.released.max(watermark);
    }

    /// Rewind and withdraw every released row
    pub fn reset(&mut self) {
        self.position = 0;
        self.released = 0;
    }

    /// Index of the next row to yield
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of rows released so far
    pub fn released(&self) -> usize {
        self.released
    }

    /// Check if every row has been yielded
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Underlying data
    pub fn data(&self) -> &ReplayData {
        &self.data
    }
}

impl Stream for ReplayStream {
    type Item = ReplayRow;
    type Error = StreamError;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        if self.is_exhausted() {
            return Err(nb::Error::Other(StreamError::EndOfStream));
        }
        if self.position >= self.released {
            return Err(nb::Error::WouldBlock);
        }

        let row = self.data.rows[self.position];
        self.position += 1;
        Ok(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.released - self.position,
            Some(self.data.len() - self.position),
        )
    }
}
