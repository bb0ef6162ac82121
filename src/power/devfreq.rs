//! devfreq cooling power actor events.
//!
//! devfreq reports frequencies in Hz, unlike cpufreq which uses kHz.

use super::cdev::{group_rows, CdevSeries};
use super::{thermal_event, ThermalEvent};
use crate::aggregator::{scaled_column, WideTable};
use crate::parser::EventTable;
use crate::utils::config::{CDEV_STATE_COLUMN, DEVFREQ_FREQ_DIVISOR, DEVICE_COLUMN, FREQ_COLUMN};
use crate::utils::error::PowerError;
use log::debug;

/// Power requested by devfreq cooling devices (`thermal_power_devfreq_get_power`)
#[derive(Debug, Clone)]
pub struct DevfreqInPower {
    table: EventTable,
}

thermal_event!(DevfreqInPower, "thermal_power_devfreq_get_power:", "devfreq_in_power");

impl DevfreqInPower {
    /// Frequencies of the devfreq device in MHz, as a single `freq` column
    pub fn all_freqs(&self) -> Result<WideTable, PowerError> {
        Ok(scaled_column(&self.table, FREQ_COLUMN, DEVFREQ_FREQ_DIVISOR)?)
    }
}

/// Power limits applied to devfreq cooling devices (`thermal_power_devfreq_limit`)
#[derive(Debug, Clone)]
pub struct DevfreqOutPower {
    table: EventTable,
}

thermal_event!(DevfreqOutPower, "thermal_power_devfreq_limit:", "devfreq_out_power");

impl DevfreqOutPower {
    /// Output frequencies of the devfreq device in MHz, as a single `freq` column
    pub fn all_freqs(&self) -> Result<WideTable, PowerError> {
        Ok(scaled_column(&self.table, FREQ_COLUMN, DEVFREQ_FREQ_DIVISOR)?)
    }

    /// Cooling state evolution of each devfreq device
    ///
    /// # Arguments
    /// * `devices` - device names to keep; all devices if None
    ///
    /// # Errors
    /// * `PowerError::EmptyInput` - the event table has no rows
    /// * `PowerError::NoMatchingTrace` - none of `devices` appear in the table
    /// * `PowerError::InvalidState` - a cooling state is not an integer
    pub fn cdev_states(&self, devices: Option<&[String]>) -> Result<Vec<CdevSeries>, PowerError> {
        if self.table.is_empty() {
            return Err(PowerError::EmptyInput(Self::NAME.to_string()));
        }

        let names = self.table.text_column(DEVICE_COLUMN)?;
        let states = self.table.numeric_column(CDEV_STATE_COLUMN)?;

        let groups = group_rows(names, |name| {
            devices.map_or(true, |devices| devices.contains(name))
        });

        if groups.is_empty() {
            return Err(PowerError::NoMatchingTrace {
                event: Self::event_name().to_string(),
                requested: format!("devices {:?}", devices.unwrap_or_default()),
            });
        }

        debug!("Found {} devfreq cooling devices", groups.len());

        groups
            .into_iter()
            .map(|(name, rows)| {
                let title = format!("Cooling state evolution of {}", name);
                CdevSeries::from_rows(name, None, title, &rows, self.table.index(), states)
            })
            .collect()
    }
}
