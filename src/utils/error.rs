//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding a textual CPU mask
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("Invalid cpumask: {0:?}")]
    InvalidFormat(String),
}

/// Errors that can occur while building or reading an event table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column {column} has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur during a label pivot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("\"{key}\" not found, available keys: {}", .available.join(", "))]
    UnknownGroup { key: String, available: Vec<String> },

    #[error("Label {label:?} is used by both {first:?} and {second:?}")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },

    #[error("Group key {0:?} is mapped more than once")]
    DuplicateKey(String),

    #[error("Invalid label mapping {0:?}, expected KEY=LABEL")]
    InvalidLabelEntry(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors that can occur while aggregating load and frequency data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("No load columns to combine")]
    NoLoadColumns,

    #[error("Normalization divisor for group {key:?} is zero")]
    ZeroNormalizer { key: String },

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Pivot(#[from] PivotError),
}

/// Errors raised by the power event views
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PowerError {
    #[error("Empty {0} event table")]
    EmptyInput(String),

    #[error("No {event} trace for {requested}")]
    NoMatchingTrace { event: String, requested: String },

    #[error("Cooling state {value} at row {row} is not an integer")]
    InvalidState { row: usize, value: f64 },

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Pivot(#[from] PivotError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors that can occur while reading an event table export
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid event table format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
