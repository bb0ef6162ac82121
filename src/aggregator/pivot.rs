//! Pivot long (group, value) event rows into one column per label.
//!
//! The row axis of the result is the row axis of the source table: each
//! group's values stay at their own row and the gaps between them are
//! forward filled. Groups are therefore aligned by event order, not by a
//! time join.
//!
//! Example:
//!
//! ```text
//!   cpus      freq            A15  A7
//!   000000f0  1               1    NaN
//!   0000000f  3      ---->    1    3
//!   000000f0  2               2    3
//!   0000000f  6               2    6
//! ```

use crate::parser::EventTable;
use crate::utils::error::{PivotError, TableError};
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Injective mapping from group key (cpumask, device name) to display label
///
/// **Public** - built once by the caller and reused across pivots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<String, String>,
}

impl LabelMap {
    /// Build a label map from (key, label) pairs
    ///
    /// # Errors
    /// * `PivotError::DuplicateKey` - a key appears twice
    /// * `PivotError::DuplicateLabel` - two keys share a label
    pub fn new<I, K, L>(pairs: I) -> Result<Self, PivotError>
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut labels = BTreeMap::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for (key, label) in pairs {
            let (key, label) = (key.into(), label.into());

            if labels.contains_key(&key) {
                return Err(PivotError::DuplicateKey(key));
            }
            if let Some(first) = owners.get(&label) {
                return Err(PivotError::DuplicateLabel {
                    label,
                    first: first.clone(),
                    second: key,
                });
            }

            owners.insert(label.clone(), key.clone());
            labels.insert(key, label);
        }

        Ok(Self { labels })
    }

    /// Build a label map from `KEY=LABEL` strings
    ///
    /// Keys may contain commas, as multi-word cpumasks do.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, PivotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pairs = entries
            .into_iter()
            .map(|entry| {
                let entry = entry.as_ref();
                match entry.split_once('=') {
                    Some((key, label)) if !key.trim().is_empty() && !label.trim().is_empty() => {
                        Ok((key.trim().to_string(), label.trim().to_string()))
                    }
                    _ => Err(PivotError::InvalidLabelEntry(entry.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Group keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

/// Table with one numeric column per label over a shared row index
///
/// **Public** - output of every pivot, consumed by plotting and export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    /// Row timestamps, copied from the source table
    index: Vec<f64>,

    /// Columns by label; missing cells are NaN
    columns: BTreeMap<String, Vec<f64>>,
}

impl WideTable {
    pub fn new(index: Vec<f64>) -> Self {
        Self {
            index,
            columns: BTreeMap::new(),
        }
    }

    /// Add or replace a column
    ///
    /// # Errors
    /// * `TableError::LengthMismatch` - column length differs from the index
    pub fn with_column(
        mut self,
        label: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        let label = label.into();
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                column: label,
                expected: self.index.len(),
                found: values.len(),
            });
        }
        self.columns.insert(label, values);
        Ok(self)
    }

    pub fn index(&self) -> &[f64] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns.get(label).map(Vec::as_slice)
    }

    /// Column labels, sorted
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// New table with `f` applied to every cell
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|(label, values)| (label.clone(), values.iter().map(|&v| f(v)).collect()))
                .collect(),
        }
    }
}

/// Pivot `value_column` into one column per label of `group_column`
///
/// **Public** - core of every per-cluster view
///
/// Every group key in the table is resolved before any column is built,
/// so an unmapped key yields no partial result. An empty table yields an
/// empty wide table.
///
/// # Errors
/// * `PivotError::UnknownGroup` - a group key has no label
/// * `PivotError::Table` - a column does not exist
pub fn pivot(
    table: &EventTable,
    value_column: &str,
    group_column: &str,
    labels: &LabelMap,
) -> Result<WideTable, PivotError> {
    let groups = table.text_column(group_column)?;
    let values = table.numeric_column(value_column)?;

    let mut resolved: HashMap<&str, &str> = HashMap::new();
    for key in groups {
        if resolved.contains_key(key.as_str()) {
            continue;
        }
        let label = labels.get(key).ok_or_else(|| PivotError::UnknownGroup {
            key: key.clone(),
            available: labels.keys().map(str::to_string).collect(),
        })?;
        resolved.insert(key.as_str(), label);
    }

    debug!(
        "Pivoting {} rows of {} by {} into {} columns",
        table.len(),
        value_column,
        group_column,
        resolved.len()
    );

    let mut columns: BTreeMap<String, Vec<f64>> = resolved
        .values()
        .map(|label| (label.to_string(), vec![f64::NAN; table.len()]))
        .collect();

    for (row, (key, &value)) in groups.iter().zip(values).enumerate() {
        if let Some(column) = columns.get_mut(resolved[key.as_str()]) {
            column[row] = value;
        }
    }

    for column in columns.values_mut() {
        forward_fill(column);
    }

    Ok(WideTable {
        index: table.index().to_vec(),
        columns,
    })
}

/// Replace NaN cells with the last non-NaN value above them
fn forward_fill(column: &mut [f64]) {
    let mut last = None;
    for cell in column.iter_mut() {
        if cell.is_nan() {
            if let Some(value) = last {
                *cell = value;
            }
        } else {
            last = Some(*cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_fill_leaves_leading_gap() {
        let mut column = vec![f64::NAN, 3.0, f64::NAN, 6.0, f64::NAN];
        forward_fill(&mut column);
        assert!(column[0].is_nan());
        assert_eq!(&column[1..], &[3.0, 3.0, 6.0, 6.0]);
    }

    #[test]
    fn test_label_map_rejects_shared_label() {
        let result = LabelMap::new([("000000f0", "big"), ("0000000f", "big")]);
        assert_eq!(
            result,
            Err(PivotError::DuplicateLabel {
                label: "big".to_string(),
                first: "000000f0".to_string(),
                second: "0000000f".to_string(),
            })
        );
    }

    #[test]
    fn test_label_map_rejects_repeated_key() {
        let result = LabelMap::new([("000000f0", "big"), ("000000f0", "little")]);
        assert_eq!(result, Err(PivotError::DuplicateKey("000000f0".to_string())));
    }

    #[test]
    fn test_label_map_from_entries() {
        let labels = LabelMap::from_entries(["00000000,000000f0=A15", " 0000000f = A7 "]).unwrap();
        assert_eq!(labels.get("00000000,000000f0"), Some("A15"));
        assert_eq!(labels.get("0000000f"), Some("A7"));
        assert_eq!(labels.keys().count(), 2);

        assert_eq!(
            LabelMap::from_entries(["no-separator"]),
            Err(PivotError::InvalidLabelEntry("no-separator".to_string()))
        );
        assert!(LabelMap::from_entries(["=A7"]).is_err());
    }

    #[test]
    fn test_wide_table_length_check() {
        let result = WideTable::new(vec![0.0, 1.0]).with_column("A7", vec![1.0]);
        assert!(matches!(result, Err(TableError::LengthMismatch { found: 1, .. })));
    }

    #[test]
    fn test_map_values() {
        let table = WideTable::new(vec![0.0, 1.0])
            .with_column("A7", vec![1000.0, f64::NAN])
            .unwrap();
        let scaled = table.map_values(|v| v / 1000.0);
        assert_eq!(scaled.column("A7").unwrap()[0], 1.0);
        assert!(scaled.column("A7").unwrap()[1].is_nan());
    }
}
