//! Analysis command implementations.
//!
//! Each command:
//! 1. Reads the event table export
//! 2. Builds the requested view
//! 3. Writes the result as JSON (file or stdout)

use super::models::{CdevArgs, EventKind, FreqsArgs, LoadArgs};
use crate::aggregator::{LabelMap, WideTable};
use crate::output::{document_to_string, write_document, CdevDocument, WideTableDocument};
use crate::parser::{read_event_table, EventTable};
use crate::power::{
    CdevSeries, CpuInPower, CpuOutPower, DevfreqInPower, DevfreqOutPower, ThermalEvent,
};
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Execute the freqs command
pub fn execute_freqs(args: FreqsArgs) -> Result<()> {
    let table = build_freqs(&args)?;

    info!(
        "Frequencies: {} rows, columns [{}]",
        table.len(),
        table.labels().collect::<Vec<_>>().join(", ")
    );

    emit(&WideTableDocument::new(&table), args.output.as_deref())
}

/// Execute the load command
pub fn execute_load(args: LoadArgs) -> Result<()> {
    let table = build_load(&args)?;

    info!(
        "{} load: {} rows, columns [{}]",
        if args.normalized { "Normalized" } else { "Combined" },
        table.len(),
        table.labels().collect::<Vec<_>>().join(", ")
    );

    emit(&WideTableDocument::new(&table), args.output.as_deref())
}

/// Execute the cdev-states command
pub fn execute_cdev_states(args: CdevArgs) -> Result<()> {
    let series = build_cdev_states(&args)?;

    for s in &series {
        info!(
            "{}: {} events, states {}..={}",
            s.title,
            s.states.len(),
            s.min_state,
            s.max_state
        );
    }

    emit(&CdevDocument::new(series), args.output.as_deref())
}

/// Frequencies in MHz for the selected event
///
/// **Public** - separated from output so it can be tested directly
pub fn build_freqs(args: &FreqsArgs) -> Result<WideTable> {
    let table = load_table(&args.input, args.event)?;

    let freqs = match args.event {
        EventKind::CpuIn => {
            CpuInPower::from_table(table).all_freqs(&parse_labels(&args.labels)?)?
        }
        EventKind::CpuOut => {
            CpuOutPower::from_table(table).all_freqs(&parse_labels(&args.labels)?)?
        }
        EventKind::DevfreqIn | EventKind::DevfreqOut => {
            if !args.labels.is_empty() {
                warn!("Labels are ignored for devfreq events");
            }
            if args.event == EventKind::DevfreqIn {
                DevfreqInPower::from_table(table).all_freqs()?
            } else {
                DevfreqOutPower::from_table(table).all_freqs()?
            }
        }
    };

    Ok(freqs)
}

/// Combined or normalized cluster load from `thermal_power_cpu_get` events
pub fn build_load(args: &LoadArgs) -> Result<WideTable> {
    let view = CpuInPower::from_table(load_table(&args.input, EventKind::CpuIn)?);
    let labels = parse_labels(&args.labels)?;

    debug!(
        "Load columns of {} rows: {:?}",
        view.table().len(),
        view.load_columns().names()
    );

    let load = if args.normalized {
        view.normalized_load_data(&labels)
    } else {
        view.load_data(&labels)
    };

    load.context("Failed to aggregate load")
}

/// Cooling state series for a limit event
pub fn build_cdev_states(args: &CdevArgs) -> Result<Vec<CdevSeries>> {
    let table = load_table(&args.input, args.event)?;

    let series = match args.event {
        EventKind::CpuOut => {
            if args.devices.is_some() {
                warn!("--devices is ignored for cpu events");
            }
            CpuOutPower::from_table(table).cdev_states(args.cpus.as_deref())?
        }
        EventKind::DevfreqOut => {
            if args.cpus.is_some() {
                warn!("--cpus is ignored for devfreq events");
            }
            DevfreqOutPower::from_table(table).cdev_states(args.devices.as_deref())?
        }
        EventKind::CpuIn | EventKind::DevfreqIn => {
            bail!("Cooling states are only reported by cpu-out and devfreq-out events")
        }
    };

    Ok(series)
}

/// Read the event table and log which event it is read as
///
/// **Private** - shared by all commands
fn load_table(input: &Path, event: EventKind) -> Result<EventTable> {
    let table = read_event_table(input)
        .with_context(|| format!("Failed to read event table {}", input.display()))?;

    let name = match event {
        EventKind::CpuIn => CpuInPower::NAME,
        EventKind::CpuOut => CpuOutPower::NAME,
        EventKind::DevfreqIn => DevfreqInPower::NAME,
        EventKind::DevfreqOut => DevfreqOutPower::NAME,
    };
    info!("Loaded {} rows of {} from {}", table.len(), name, input.display());

    Ok(table)
}

fn parse_labels(labels: &[String]) -> Result<LabelMap> {
    if labels.is_empty() {
        bail!("CPU events need at least one --label CPUMASK=NAME");
    }

    LabelMap::from_entries(labels).context("Invalid --label")
}

/// Write a document to `output`, or print it when no path is given
fn emit<T: Serialize>(document: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_document(document, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", document_to_string(document)?),
    }

    Ok(())
}
