//! Combined load, normalized load and frequency scaling.
//!
//! `thermal_power_cpu_get` reports one load field per CPU of the cooling
//! device (load0..loadN). These are summed into a single load per event
//! and optionally normalized against the cluster's capacity:
//!
//! ```text
//! normalized = sum(load) * freq / (max_freq_of_cluster * cpus_in_cluster)
//! ```

use super::mask::count_set_bits;
use super::pivot::{pivot, LabelMap, WideTable};
use crate::parser::EventTable;
use crate::utils::config::LOAD_COLUMN;
use crate::utils::error::{LoadError, PivotError, TableError};
use log::{debug, warn};

/// Load columns summed into the combined load
///
/// **Public** - lists contributing columns explicitly instead of relying on
/// column naming inside the aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadColumns {
    names: Vec<String>,
}

impl LoadColumns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Every numeric column of `table` whose name starts with `prefix`
    pub fn with_prefix(table: &EventTable, prefix: &str) -> Self {
        Self::new(table.numeric_column_names().filter(|name| name.starts_with(prefix)))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Row-wise sum of the load columns
///
/// # Errors
/// * `LoadError::NoLoadColumns` - `columns` is empty
/// * `LoadError::Table` - a listed column does not exist
pub fn combined_load(table: &EventTable, columns: &LoadColumns) -> Result<Vec<f64>, LoadError> {
    let (first, rest) = columns.names.split_first().ok_or(LoadError::NoLoadColumns)?;

    let mut load = table.numeric_column(first)?.to_vec();
    for name in rest {
        for (total, value) in load.iter_mut().zip(table.numeric_column(name)?) {
            *total += value;
        }
    }

    Ok(load)
}

/// Combined load pivoted by group
pub fn grouped_load(
    table: &EventTable,
    group_column: &str,
    columns: &LoadColumns,
    labels: &LabelMap,
) -> Result<WideTable, LoadError> {
    let load = combined_load(table, columns)?;
    let load_table = derived_table(table, group_column, load)?;

    Ok(pivot(&load_table, LOAD_COLUMN, group_column, labels)?)
}

/// Combined load weighted by frequency and normalized per group, pivoted
///
/// **Public** - every row of a group is divided by the group's maximum
/// observed frequency times the number of CPUs in its mask. Label map
/// keys with no rows in the table are skipped.
///
/// # Errors
/// * `LoadError::Mask` - a label map key is not a cpumask
/// * `LoadError::ZeroNormalizer` - a group's divisor is zero
/// * `LoadError::Pivot` - a group key in the table has no label
pub fn normalized_load(
    table: &EventTable,
    group_column: &str,
    freq_column: &str,
    columns: &LoadColumns,
    labels: &LabelMap,
) -> Result<WideTable, LoadError> {
    let groups = table.text_column(group_column)?;
    let freqs = table.numeric_column(freq_column)?;

    let mut load = combined_load(table, columns)?;
    for (value, freq) in load.iter_mut().zip(freqs) {
        *value *= freq;
    }

    for key in labels.keys() {
        let num_cpus = count_set_bits(key)?;
        let rows: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.as_str() == key)
            .map(|(row, _)| row)
            .collect();

        if rows.is_empty() {
            warn!("No {} rows for group {}, skipping normalization", group_column, key);
            continue;
        }

        let max_freq = rows.iter().map(|&row| freqs[row]).fold(f64::NEG_INFINITY, f64::max);
        let divisor = max_freq * f64::from(num_cpus);
        if divisor == 0.0 {
            return Err(LoadError::ZeroNormalizer { key: key.to_string() });
        }

        debug!(
            "Normalizing {} rows of {} by {} (max freq {}, {} cpus)",
            rows.len(),
            key,
            divisor,
            max_freq,
            num_cpus
        );

        for row in rows {
            load[row] /= divisor;
        }
    }

    let load_table = derived_table(table, group_column, load)?;

    Ok(pivot(&load_table, LOAD_COLUMN, group_column, labels)?)
}

/// Frequency column pivoted by group and divided by `divisor`
///
/// Use `CPU_FREQ_DIVISOR` or `DEVFREQ_FREQ_DIVISOR` to get MHz.
pub fn scaled_frequencies(
    table: &EventTable,
    group_column: &str,
    freq_column: &str,
    labels: &LabelMap,
    divisor: f64,
) -> Result<WideTable, PivotError> {
    let freqs = pivot(table, freq_column, group_column, labels)?;

    Ok(freqs.map_values(|freq| freq / divisor))
}

/// A single numeric column divided by `divisor`, labelled with its name
pub fn scaled_column(
    table: &EventTable,
    column: &str,
    divisor: f64,
) -> Result<WideTable, TableError> {
    let values = table
        .numeric_column(column)?
        .iter()
        .map(|value| value / divisor)
        .collect();

    WideTable::new(table.index().to_vec()).with_column(column, values)
}

/// Group column of `table` next to a derived load column
fn derived_table(
    table: &EventTable,
    group_column: &str,
    load: Vec<f64>,
) -> Result<EventTable, TableError> {
    let groups = table.text_column(group_column)?;

    EventTable::new(table.index().to_vec())
        .with_text_column(group_column, groups.iter().cloned())?
        .with_numeric_column(LOAD_COLUMN, load)
}
