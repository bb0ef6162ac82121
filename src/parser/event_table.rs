//! Columnar table of parsed trace events.
//!
//! Rows are kept in trace order and the row position is the time axis.
//! Every column, text or numeric, has exactly one cell per row.

use crate::utils::error::TableError;
use std::collections::BTreeMap;

/// Immutable table of trace events of a single kind
///
/// **Public** - input to every aggregation in this crate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    /// Timestamp of each row, in trace order
    index: Vec<f64>,

    /// Text columns (cpumasks, device names)
    text: BTreeMap<String, Vec<String>>,

    /// Numeric columns (frequencies, loads, cooling states)
    numeric: BTreeMap<String, Vec<f64>>,
}

impl EventTable {
    /// Create a table with the given row timestamps and no columns
    pub fn new(index: Vec<f64>) -> Self {
        Self {
            index,
            text: BTreeMap::new(),
            numeric: BTreeMap::new(),
        }
    }

    /// Create a table of `rows` rows indexed by row position
    pub fn with_row_count(rows: usize) -> Self {
        Self::new((0..rows).map(|i| i as f64).collect())
    }

    /// Add a text column
    ///
    /// # Errors
    /// * `TableError::LengthMismatch` - column length differs from the row count
    pub fn with_text_column<I, S>(
        mut self,
        name: impl Into<String>,
        values: I,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.check_len(&name, values.len())?;
        self.text.insert(name, values);
        Ok(self)
    }

    /// Add a numeric column
    ///
    /// # Errors
    /// * `TableError::LengthMismatch` - column length differs from the row count
    pub fn with_numeric_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.numeric.insert(name, values);
        Ok(self)
    }

    fn check_len(&self, column: &str, found: usize) -> Result<(), TableError> {
        if found != self.index.len() {
            return Err(TableError::LengthMismatch {
                column: column.to_string(),
                expected: self.index.len(),
                found,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row timestamps
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    /// Look up a text column by name
    pub fn text_column(&self, name: &str) -> Result<&[String], TableError> {
        self.text
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Look up a numeric column by name
    pub fn numeric_column(&self, name: &str) -> Result<&[f64], TableError> {
        self.numeric
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Names of all numeric columns, sorted
    pub fn numeric_column_names(&self) -> impl Iterator<Item = &str> {
        self.numeric.keys().map(String::as_str)
    }
}
