//! Error Types
//!
//! ## Error Categories
//!
//! ### Replay Input
//! - `MissingColumn`: the CSV header lacks a required column
//! - `InvalidValue`: a required cell is not a number
//! - `Io` / `Csv`: the file could not be read or is not CSV
//! - `NoData`: a replay session was started before any data was loaded
//!
//! ### Configuration
//! - `Io`: the configuration file could not be read
//! - `Parse`: the file is not valid TOML for `SimulationConfig`
//!
//! Out-of-range configuration values are not errors; they are clamped at
//! the configuration boundary. Domain anomalies (a reading above its
//! threshold) are data, not errors, and never appear here.
//!
//! ## Error Handling Strategy
//!
//! ```rust,no_run
//! use twinsim_core::{ReplayData, ReplayError};
//!
//! match ReplayData::from_path("recording.csv") {
//!     Ok(data) => println!("loaded {} rows", data.len()),
//!     Err(ReplayError::MissingColumn { column }) => {
//!         eprintln!("CSV must contain column '{column}'");
//!     }
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors raised while loading or starting a CSV replay
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Header row lacks a required column
    #[error("CSV must contain column '{column}'")]
    MissingColumn {
        /// Name of the missing column
        column: &'static str,
    },

    /// A required cell could not be parsed as a number
    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidValue {
        /// 1-based data row number (header excluded)
        row: usize,
        /// Column the cell belongs to
        column: &'static str,
        /// Raw cell contents
        value: String,
    },

    /// Replay started with nothing loaded
    #[error("no replay data loaded, upload a CSV first")]
    NoData,

    /// Underlying file error
    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (unbalanced quotes, ragged rows, bad UTF-8)
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while loading configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Underlying file error
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid configuration TOML
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
