//! Views over the thermal power-actor trace events.
//!
//! Each view wraps the event table of one trace event and exposes the
//! per-cluster tables derived from it:
//! - `thermal_power_cpu_get` (CpuInPower): frequencies and load
//! - `thermal_power_cpu_limit` (CpuOutPower): frequencies and cooling states
//! - `thermal_power_devfreq_get_power` (DevfreqInPower): frequencies
//! - `thermal_power_devfreq_limit` (DevfreqOutPower): frequencies and cooling states

use crate::parser::EventTable;

/// A trace event backed by an event table
pub trait ThermalEvent: Sized {
    /// Event name matched in a trace line
    const UNIQUE_WORD: &'static str;

    /// Name of the event table
    const NAME: &'static str;

    /// Event name without the trailing `:` some trace matching words carry
    fn event_name() -> &'static str {
        Self::UNIQUE_WORD.trim_end_matches(':')
    }

    fn from_table(table: EventTable) -> Self;

    fn table(&self) -> &EventTable;
}

/// Implement [`ThermalEvent`] for a view wrapping a single `table` field
macro_rules! thermal_event {
    ($view:ty, $unique_word:literal, $name:literal) => {
        impl $crate::power::ThermalEvent for $view {
            const UNIQUE_WORD: &'static str = $unique_word;
            const NAME: &'static str = $name;

            fn from_table(table: $crate::parser::EventTable) -> Self {
                Self { table }
            }

            fn table(&self) -> &$crate::parser::EventTable {
                &self.table
            }
        }
    };
}

pub(crate) use thermal_event;

pub mod cdev;
pub mod cpu;
pub mod devfreq;

// Re-export main types
pub use cdev::CdevSeries;
pub use cpu::{CpuInPower, CpuOutPower};
pub use devfreq::{DevfreqInPower, DevfreqOutPower};
