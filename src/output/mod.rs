//! Output writers for pivoted tables and cooling state series.

pub mod json;
pub mod schema;

// Re-export main functions
pub use json::{document_to_string, read_wide_table, write_document};
pub use schema::{CdevDocument, WideTableDocument};
