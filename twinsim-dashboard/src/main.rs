//! TwinSim - terminal dashboards for the simulated sensor loop
//!
//! # Commands
//!
//! - `twinsim console` - print a fixed number of simulated events
//! - `twinsim live` - live dashboard with run time and rate controls
//! - `twinsim replay <csv>` - replay a recorded run one row per second
//!
//! # Examples
//!
//! ```bash
//! # Ten events, one per second
//! twinsim console
//!
//! # A 90 second run at 5 readings/s over the wide ranges
//! twinsim live --run-time 90 --rate 5 --wide-ranges
//!
//! # Replay the first 20 seconds of a recording
//! twinsim replay recording.csv --duration 20 --vibration-threshold 6.5
//! ```
//!
//! Set `RUST_LOG` to adjust logging; `-v` switches the default to debug.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twinsim_core::{LiveSession, ReplaySession, SystemTime};

mod cli;
mod render;
mod shell;

use cli::{Cli, Commands};

fn setup_logging(verbose: bool) {
    let default = if verbose {
        "twinsim=debug"
    } else {
        "twinsim=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Console { cycles, delay, simulation } => {
            info!(cycles, delay, "starting console simulation");
            shell::run_console(simulation.simulator(), cycles, Duration::from_secs(delay)).await
        }
        Commands::Live { config, run_time, rate, thresholds, simulation } => {
            let config = cli::live_config(config.as_ref(), run_time, rate, &thresholds, &simulation)?;
            let mut session = LiveSession::new(simulation.simulator(), config);
            session.start();
            shell::run_dashboard(&mut session).await
        }
        Commands::Replay { csv, config, duration, thresholds } => {
            let config = cli::replay_config(config.as_ref(), duration, &thresholds)?;
            let mut session = ReplaySession::new(SystemTime, config);
            session
                .load_csv(&csv)
                .with_context(|| format!("failed to load {}", csv.display()))?;
            if let Some(data) = session.data() {
                info!(rows = data.len(), max_time_secs = data.max_time_secs(), "CSV loaded");
            }
            session.start()?;
            shell::run_dashboard(&mut session).await
        }
    }
}
