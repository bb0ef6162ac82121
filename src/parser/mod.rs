//! Event table model and ingestion.
//!
//! This module handles:
//! - The immutable columnar event table the aggregator reads
//! - Reading tabular event exports (JSON records) into that table

pub mod event_table;
pub mod records;

// Re-export main types
pub use event_table::EventTable;
pub use records::{parse_event_table, read_event_table};
