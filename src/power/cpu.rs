//! cpufreq cooling power actor events.

use super::cdev::{group_rows, CdevSeries};
use super::{thermal_event, ThermalEvent};
use crate::aggregator::{
    cpu_list_to_mask, grouped_load, mask_to_cpu_list, mask_to_int, normalized_load,
    scaled_frequencies, CpuMask, LabelMap, LoadColumns, WideTable,
};
use crate::parser::EventTable;
use crate::utils::config::{
    CDEV_STATE_COLUMN, CPUS_COLUMN, CPU_FREQ_DIVISOR, FREQ_COLUMN, LOAD_PREFIX,
};
use crate::utils::error::PowerError;
use log::debug;

/// Power requested by the cpufreq cooling devices (`thermal_power_cpu_get`)
#[derive(Debug, Clone)]
pub struct CpuInPower {
    table: EventTable,
}

thermal_event!(CpuInPower, "thermal_power_cpu_get", "cpu_in_power");

impl CpuInPower {
    /// Per-cpu load columns of the event (load0..loadN)
    pub fn load_columns(&self) -> LoadColumns {
        LoadColumns::with_prefix(&self.table, LOAD_PREFIX)
    }

    /// Combined load of each cluster
    ///
    /// # Arguments
    /// * `labels` - cpumask to cluster name
    pub fn load_data(&self, labels: &LabelMap) -> Result<WideTable, PowerError> {
        Ok(grouped_load(&self.table, CPUS_COLUMN, &self.load_columns(), labels)?)
    }

    /// Combined load of each cluster relative to its capacity
    pub fn normalized_load_data(&self, labels: &LabelMap) -> Result<WideTable, PowerError> {
        Ok(normalized_load(
            &self.table,
            CPUS_COLUMN,
            FREQ_COLUMN,
            &self.load_columns(),
            labels,
        )?)
    }

    /// "In" frequencies as seen by the governor, in MHz
    pub fn all_freqs(&self, labels: &LabelMap) -> Result<WideTable, PowerError> {
        Ok(scaled_frequencies(
            &self.table,
            CPUS_COLUMN,
            FREQ_COLUMN,
            labels,
            CPU_FREQ_DIVISOR,
        )?)
    }
}

/// Power limits applied to the cpufreq cooling devices (`thermal_power_cpu_limit`)
#[derive(Debug, Clone)]
pub struct CpuOutPower {
    table: EventTable,
}

thermal_event!(CpuOutPower, "thermal_power_cpu_limit", "cpu_out_power");

impl CpuOutPower {
    /// Maximum frequencies allowed by the governor, in MHz
    pub fn all_freqs(&self, labels: &LabelMap) -> Result<WideTable, PowerError> {
        Ok(scaled_frequencies(
            &self.table,
            CPUS_COLUMN,
            FREQ_COLUMN,
            labels,
            CPU_FREQ_DIVISOR,
        )?)
    }

    /// Cooling state evolution of each cooling device
    ///
    /// **Public** - data behind the cooling state plot
    ///
    /// # Arguments
    /// * `cpus` - only keep cooling devices covering at least one of these
    ///   CPUs (devices may cover other CPUs too); all devices if None
    ///
    /// # Errors
    /// * `PowerError::EmptyInput` - the event table has no rows
    /// * `PowerError::Mask` - a cpumask in the table is malformed
    /// * `PowerError::NoMatchingTrace` - no cooling device covers `cpus`
    /// * `PowerError::InvalidState` - a cooling state is not an integer
    pub fn cdev_states(&self, cpus: Option<&[u32]>) -> Result<Vec<CdevSeries>, PowerError> {
        if self.table.is_empty() {
            return Err(PowerError::EmptyInput(Self::NAME.to_string()));
        }

        let masks: Vec<CpuMask> = self
            .table
            .text_column(CPUS_COLUMN)?
            .iter()
            .map(|mask| mask_to_int(mask))
            .collect::<Result<_, _>>()?;
        let states = self.table.numeric_column(CDEV_STATE_COLUMN)?;

        let selected = cpus.map(|cpus| cpu_list_to_mask(cpus.iter().copied()));
        let groups = group_rows(&masks, |mask| {
            selected.as_ref().map_or(true, |global| mask.intersects(global))
        });

        if groups.is_empty() {
            return Err(PowerError::NoMatchingTrace {
                event: Self::event_name().to_string(),
                requested: format!("CPUs {:?}", cpus.unwrap_or_default()),
            });
        }

        debug!("Found {} cpu cooling devices", groups.len());

        groups
            .into_iter()
            .map(|(mask, rows)| {
                let cpu_list = mask_to_cpu_list(&mask);
                let title = format!("Cooling state evolution of CPUS {:?}", cpu_list);
                CdevSeries::from_rows(
                    mask.to_string(),
                    Some(cpu_list),
                    title,
                    &rows,
                    self.table.index(),
                    states,
                )
            })
            .collect()
    }
}
