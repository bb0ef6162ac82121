use crate::utils::config::{CPU_FREQ_DIVISOR, DEVFREQ_FREQ_DIVISOR, SCHEMA_VERSION};

/// Display version information
pub fn display_version() {
    println!("Thermal Power v{}", env!("CARGO_PKG_VERSION"));
    println!("Output Schema: v{}", SCHEMA_VERSION);
    println!();
    println!(
        "Frequency units: cpufreq / {} = MHz, devfreq / {} = MHz",
        CPU_FREQ_DIVISOR, DEVFREQ_FREQ_DIVISOR
    );
}
