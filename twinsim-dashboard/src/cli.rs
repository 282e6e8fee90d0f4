//! Command-line interface
//!
//! Flags override values read from `--config`; the merged result is
//! clamped by the session that consumes it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use twinsim_core::constants::session::{DEFAULT_CONSOLE_CYCLES, DEFAULT_CONSOLE_DELAY_SECS};
use twinsim_core::{ReplayConfig, SensorSimulator, SimulationConfig, SimulationRanges};

/// TwinSim - simulated sensor digital twin with threshold anomaly detection
#[derive(Debug, Parser)]
#[command(name = "twinsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a fixed number of simulated events
    Console {
        /// Number of cycles to run
        #[arg(long, default_value_t = DEFAULT_CONSOLE_CYCLES)]
        cycles: u32,

        /// Seconds between cycles
        #[arg(long, default_value_t = DEFAULT_CONSOLE_DELAY_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        delay: u64,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Live dashboard over simulated sensors
    Live {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Total run duration in seconds (1-600)
        #[arg(long)]
        run_time: Option<u32>,

        /// Readings generated per second (1-20)
        #[arg(long)]
        rate: Option<u32>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Dashboard replaying a recorded CSV
    Replay {
        /// CSV with Time, Vibration (mm/s) and Sound Level (dB) columns
        csv: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Playback duration in seconds (defaults to the data's max time)
        #[arg(long)]
        duration: Option<u32>,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

/// Detection threshold overrides
#[derive(Debug, Default, Args)]
pub struct ThresholdArgs {
    /// Vibration threshold in mm/s (0.1-100)
    #[arg(long)]
    pub vibration_threshold: Option<f64>,

    /// Sound threshold in dB (0.1-200)
    #[arg(long)]
    pub sound_threshold: Option<f64>,
}

/// Simulated sensor options
#[derive(Debug, Default, Args)]
pub struct SimulationArgs {
    /// Draw from the wide ranges (0-20 mm/s, 30-120 dB)
    #[arg(long)]
    pub wide_ranges: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimulationArgs {
    /// Wall-clock simulator honouring `--seed` and `--wide-ranges`
    pub fn simulator(&self) -> SensorSimulator {
        let simulator = match self.seed {
            Some(seed) => SensorSimulator::with_seed(seed),
            None => SensorSimulator::from_entropy(),
        };
        if self.wide_ranges {
            simulator.with_ranges(SimulationRanges::wide())
        } else {
            simulator
        }
    }
}

/// Merge the live configuration file with command-line overrides
pub fn live_config(
    path: Option<&PathBuf>,
    run_time: Option<u32>,
    rate: Option<u32>,
    thresholds: &ThresholdArgs,
    simulation: &SimulationArgs,
) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(run_time) = run_time {
        config.total_run_time_secs = run_time;
    }
    if let Some(rate) = rate {
        config.readings_per_second = rate;
    }
    if let Some(value) = thresholds.vibration_threshold {
        config.thresholds.vibration_mm_s = value;
    }
    if let Some(value) = thresholds.sound_threshold {
        config.thresholds.sound_db = value;
    }
    if simulation.wide_ranges {
        config.ranges = SimulationRanges::wide();
    }

    Ok(config)
}

/// Merge the replay configuration file with command-line overrides
pub fn replay_config(
    path: Option<&PathBuf>,
    duration: Option<u32>,
    thresholds: &ThresholdArgs,
) -> Result<ReplayConfig> {
    let mut config = match path {
        Some(path) => {
            ReplayConfig::load(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ReplayConfig::default(),
    };

    if duration.is_some() {
        config.playback_duration_secs = duration;
    }
    if let Some(value) = thresholds.vibration_threshold {
        config.thresholds.vibration_mm_s = value;
    }
    if let Some(value) = thresholds.sound_threshold {
        config.thresholds.sound_db = value;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn console_defaults() {
        let cli = Cli::try_parse_from(["twinsim", "console"]).unwrap();
        match cli.command {
            Commands::Console { cycles, delay, simulation } => {
                assert_eq!(cycles, 10);
                assert_eq!(delay, 1);
                assert!(!simulation.wide_ranges);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_delay_rejected() {
        assert!(Cli::try_parse_from(["twinsim", "console", "--delay", "0"]).is_err());
    }

    #[test]
    fn live_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "twinsim",
            "-v",
            "live",
            "--run-time",
            "90",
            "--rate",
            "5",
            "--sound-threshold",
            "70",
            "--wide-ranges",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Commands::Live { config, run_time, rate, thresholds, simulation } = cli.command else {
            panic!("expected live command");
        };
        let merged = live_config(config.as_ref(), run_time, rate, &thresholds, &simulation).unwrap();

        assert_eq!(merged.total_run_time_secs, 90);
        assert_eq!(merged.readings_per_second, 5);
        assert_eq!(merged.thresholds.sound_db, 70.0);
        assert_eq!(merged.thresholds.vibration_mm_s, 8.0);
        assert_eq!(merged.ranges, SimulationRanges::wide());
    }

    #[test]
    fn replay_takes_path_and_duration() {
        let cli = Cli::try_parse_from(["twinsim", "replay", "run.csv", "--duration", "12"]).unwrap();

        let Commands::Replay { csv, config, duration, thresholds } = cli.command else {
            panic!("expected replay command");
        };
        assert_eq!(csv, PathBuf::from("run.csv"));

        let merged = replay_config(config.as_ref(), duration, &thresholds).unwrap();
        assert_eq!(merged.playback_duration_secs, Some(12));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let path = PathBuf::from("/nonexistent/twinsim.toml");
        let err = live_config(Some(&path), None, None, &ThresholdArgs::default(), &SimulationArgs::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to load /nonexistent/twinsim.toml"));
    }
}
