//! Read tabular event exports into an [`EventTable`].
//!
//! The input is a JSON array of flat records, one per trace event:
//!
//! ```json
//! [{"timestamp": 0.1, "cpus": "000000f0", "freq": 1900000, "load0": 50}]
//! ```
//!
//! String fields become text columns and numeric fields numeric columns.
//! `timestamp` is optional and becomes the row index.

use super::event_table::EventTable;
use crate::utils::config::TIMESTAMP_FIELD;
use crate::utils::error::ParseError;
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Kind of a record field, fixed by the first record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Numeric,
}

/// Read an event table from a JSON file
///
/// **Public** - entry point used by the CLI
///
/// # Errors
/// * `ParseError::Io` - file cannot be read
/// * `ParseError::JsonError` - file is not JSON
/// * `ParseError::InvalidFormat` - records are not a consistent flat table
pub fn read_event_table(path: impl AsRef<Path>) -> Result<EventTable, ParseError> {
    let path = path.as_ref();
    debug!("Reading event table from: {}", path.display());

    let text = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&text)?;

    parse_event_table(&raw)
}

/// Build an event table from a JSON array of records
///
/// **Public** - main entry point for ingestion
///
/// # Errors
/// * `ParseError::InvalidFormat` - not an array of objects, a field has an
///   unsupported kind, or records disagree on their fields
pub fn parse_event_table(raw: &Value) -> Result<EventTable, ParseError> {
    let records = raw
        .as_array()
        .ok_or_else(|| ParseError::InvalidFormat("Event table must be a JSON array".to_string()))?;

    let records: Vec<&Map<String, Value>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record
                .as_object()
                .ok_or_else(|| ParseError::InvalidFormat(format!("Record {} is not an object", i)))
        })
        .collect::<Result<_, _>>()?;

    let Some(first) = records.first() else {
        debug!("Event table is empty");
        return Ok(EventTable::default());
    };

    let has_timestamp = first.contains_key(TIMESTAMP_FIELD);
    let schema = detect_schema(first)?;

    let mut index = Vec::with_capacity(records.len());
    let mut text: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    let mut numeric: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let expected_fields = schema.len() + usize::from(has_timestamp);
        if record.len() != expected_fields {
            return Err(ParseError::InvalidFormat(format!(
                "Record {} has {} fields, expected {}",
                row,
                record.len(),
                expected_fields
            )));
        }

        if has_timestamp {
            index.push(numeric_field(record, TIMESTAMP_FIELD, row)?);
        } else {
            index.push(row as f64);
        }

        for &(name, kind) in &schema {
            match kind {
                FieldKind::Text => text
                    .entry(name)
                    .or_default()
                    .push(text_field(record, name, row)?),
                FieldKind::Numeric => numeric
                    .entry(name)
                    .or_default()
                    .push(numeric_field(record, name, row)?),
            }
        }
    }

    let mut table = EventTable::new(index);
    for (name, values) in text {
        table = table.with_text_column(name, values)?;
    }
    for (name, values) in numeric {
        table = table.with_numeric_column(name, values)?;
    }

    debug!("Parsed event table: {} rows", table.len());

    Ok(table)
}

/// Derive column kinds from the first record
///
/// **Private** - internal helper for parse_event_table
fn detect_schema(first: &Map<String, Value>) -> Result<Vec<(&str, FieldKind)>, ParseError> {
    first
        .iter()
        .filter(|(name, _)| name.as_str() != TIMESTAMP_FIELD)
        .map(|(name, value)| match value {
            Value::String(_) => Ok((name.as_str(), FieldKind::Text)),
            Value::Number(_) => Ok((name.as_str(), FieldKind::Numeric)),
            other => Err(ParseError::InvalidFormat(format!(
                "Field {:?} has unsupported value {}",
                name, other
            ))),
        })
        .collect()
}

fn text_field(record: &Map<String, Value>, name: &str, row: usize) -> Result<String, ParseError> {
    match record.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ParseError::InvalidFormat(format!(
            "Record {} field {:?} must be a string",
            row, name
        ))),
    }
}

fn numeric_field(record: &Map<String, Value>, name: &str, row: usize) -> Result<f64, ParseError> {
    record.get(name).and_then(Value::as_f64).ok_or_else(|| {
        ParseError::InvalidFormat(format!("Record {} field {:?} must be a number", row, name))
    })
}
