use clap::ValueEnum;
use std::path::PathBuf;

/// Thermal power-actor event selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventKind {
    /// thermal_power_cpu_get
    CpuIn,
    /// thermal_power_cpu_limit
    CpuOut,
    /// thermal_power_devfreq_get_power
    DevfreqIn,
    /// thermal_power_devfreq_limit
    DevfreqOut,
}

/// Arguments for the freqs command
#[derive(Debug, Clone)]
pub struct FreqsArgs {
    /// Event table export (JSON records)
    pub input: PathBuf,

    /// Event the table holds
    pub event: EventKind,

    /// KEY=LABEL cpumask mappings (CPU events only)
    pub labels: Vec<String>,

    /// Output path; stdout if None
    pub output: Option<PathBuf>,
}

/// Arguments for the load command
#[derive(Debug, Clone)]
pub struct LoadArgs {
    /// `thermal_power_cpu_get` event table export
    pub input: PathBuf,

    /// KEY=LABEL cpumask mappings
    pub labels: Vec<String>,

    /// Normalize by cluster capacity
    pub normalized: bool,

    pub output: Option<PathBuf>,
}

/// Arguments for the cdev-states command
#[derive(Debug, Clone)]
pub struct CdevArgs {
    pub input: PathBuf,

    /// Either `CpuOut` or `DevfreqOut`
    pub event: EventKind,

    /// Only keep CPU cooling devices covering these CPUs
    pub cpus: Option<Vec<u32>>,

    /// Only keep these devfreq devices
    pub devices: Option<Vec<String>>,

    pub output: Option<PathBuf>,
}
