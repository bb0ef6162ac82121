//! Thermal Power CLI
//!
//! Turns thermal power-actor event tables into per-cluster frequency,
//! load and cooling state tables.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use thermal_power::commands::{
    display_version, execute_cdev_states, execute_freqs, execute_load, CdevArgs, EventKind,
    FreqsArgs, LoadArgs,
};

/// Thermal Power - per-cluster views of thermal power-actor events
#[derive(Parser, Debug)]
#[command(name = "thermal-power")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Frequencies of each cluster or device, in MHz
    Freqs {
        /// Event table export (JSON records)
        #[arg(short, long)]
        input: PathBuf,

        /// Event the table holds
        #[arg(short, long, value_enum)]
        event: EventKind,

        /// Cpumask to cluster name, e.g. 000000f0=A15 (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Output path for JSON table (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combined load of each cluster (thermal_power_cpu_get events)
    Load {
        /// Event table export (JSON records)
        #[arg(short, long)]
        input: PathBuf,

        /// Cpumask to cluster name, e.g. 000000f0=A15 (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Normalize by cluster capacity (max frequency x cpus)
        #[arg(long)]
        normalized: bool,

        /// Output path for JSON table (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cooling state evolution of each cooling device
    CdevStates {
        /// Event table export (JSON records)
        #[arg(short, long)]
        input: PathBuf,

        /// cpu-out or devfreq-out
        #[arg(short, long, value_enum)]
        event: EventKind,

        /// Only show devices covering these CPUs, e.g. 0,1
        #[arg(long, value_delimiter = ',')]
        cpus: Option<Vec<u32>>,

        /// Only show these devfreq devices
        #[arg(long, value_delimiter = ',')]
        devices: Option<Vec<String>>,

        /// Output path for JSON series (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Freqs {
            input,
            event,
            labels,
            output,
        } => {
            execute_freqs(FreqsArgs {
                input,
                event,
                labels,
                output,
            })?;
        }

        Commands::Load {
            input,
            labels,
            normalized,
            output,
        } => {
            execute_load(LoadArgs {
                input,
                labels,
                normalized,
                output,
            })?;
        }

        Commands::CdevStates {
            input,
            event,
            cpus,
            devices,
            output,
        } => {
            execute_cdev_states(CdevArgs {
                input,
                event,
                cpus,
                devices,
                output,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
