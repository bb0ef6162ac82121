//! Output JSON schema definitions.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::WideTable;
use crate::power::CdevSeries;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pivoted table written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideTableDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the document was generated
    pub generated_at: String,

    /// Row timestamps
    pub index: Vec<f64>,

    /// One column per label; missing cells are null
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl WideTableDocument {
    pub fn new(table: &WideTable) -> Self {
        let columns = table
            .columns()
            .map(|(label, values)| {
                let cells = values
                    .iter()
                    .map(|&v| if v.is_nan() { None } else { Some(v) })
                    .collect();
                (label.to_string(), cells)
            })
            .collect();

        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            index: table.index().to_vec(),
            columns,
        }
    }
}

/// Cooling state series written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdevDocument {
    pub version: String,
    pub generated_at: String,
    pub series: Vec<CdevSeries>,
}

impl CdevDocument {
    pub fn new(series: Vec<CdevSeries>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            series,
        }
    }
}
