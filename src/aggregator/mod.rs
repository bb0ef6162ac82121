//! Reshaping of thermal event tables into per-cluster tables.
//!
//! This module provides:
//! - cpumask decoding (mask)
//! - label pivot with forward fill (pivot)
//! - combined/normalized load and frequency scaling (load)

pub mod load;
pub mod mask;
pub mod pivot;

// Re-export main types and functions
pub use load::{
    combined_load, grouped_load, normalized_load, scaled_column, scaled_frequencies, LoadColumns,
};
pub use mask::{count_set_bits, cpu_list_to_mask, mask_to_cpu_list, mask_to_int, CpuMask};
pub use pivot::{pivot, LabelMap, WideTable};
