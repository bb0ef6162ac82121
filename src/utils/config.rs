//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Frequency unit conversion to MHz.
// cpufreq cooling events report kHz, devfreq cooling events report Hz.
pub const CPU_FREQ_DIVISOR: f64 = 1_000.0;
pub const DEVFREQ_FREQ_DIVISOR: f64 = 1_000_000.0;

/// Prefix shared by the per-cpu load fields of `thermal_power_cpu_get`
pub const LOAD_PREFIX: &str = "load";

// Column names used by the thermal power-actor events
pub const CPUS_COLUMN: &str = "cpus";
pub const DEVICE_COLUMN: &str = "type";
pub const FREQ_COLUMN: &str = "freq";
pub const CDEV_STATE_COLUMN: &str = "cdev_state";
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Name of the combined load column produced by the aggregator
pub const LOAD_COLUMN: &str = "load";
