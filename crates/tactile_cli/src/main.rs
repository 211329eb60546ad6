//! Tactile CLI
//!
//! Headless driver for press and like feedback.
//!
//! ```bash
//! tactile simulate scenario.json
//! tactile simulate scenario.json --config tactile.toml --sample-every 1
//! tactile simulate scenario.json --report out/report.json
//! tactile config > tactile.toml
//! ```

mod report;
mod runner;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tactile_feedback::FeedbackConfig;
use tracing_subscriber::EnvFilter;

use crate::runner::{run_scenario, SimulationOptions};
use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "tactile")]
#[command(about = "Simulate press and like micro-animations frame by frame")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON scenario and print the sampled values
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// TOML config with [animation] and [press] tables
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Record a sample every N frames
        #[arg(long, default_value = "4")]
        sample_every: u64,

        /// Write the report to a relative path instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            sample_every,
            report,
        } => simulate(&scenario, config.as_deref(), sample_every, report.as_deref()),
        Commands::Config => {
            print!("{}", FeedbackConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn simulate(
    scenario_path: &Path,
    config_path: Option<&Path>,
    sample_every: u64,
    report_path: Option<&Path>,
) -> Result<()> {
    let scenario = Scenario::from_path(scenario_path)?;
    let config = match config_path {
        Some(path) => FeedbackConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FeedbackConfig::default(),
    };

    let report = run_scenario(&scenario, &config, SimulationOptions { sample_every })?;

    match report_path {
        Some(path) => {
            report
                .write_to_path(path)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }
    Ok(())
}
