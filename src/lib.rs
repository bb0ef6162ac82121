//! Thermal Power
//!
//! Reshapes thermal power-actor trace events (cpufreq and devfreq cooling
//! devices) into per-cluster frequency, load and cooling state tables for
//! plotting.
//!
//! This crate provides the core implementation for the
//! `thermal-power` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! thermal-power freqs --input cpu_in_power.json --event cpu-in \
//!     --label 000000f0=A15 --label 0000000f=A7
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod power;
pub mod utils;
