//! Cooling device state series, one per cooling device.

use crate::utils::error::PowerError;
use serde::{Deserialize, Serialize};

/// Cooling state evolution of one cooling device
///
/// **Public** - consumed by plotting and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdevSeries {
    /// Cooling device key (cpumask or devfreq device name)
    pub device: String,

    /// CPUs covered by the device (CPU cooling devices only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<Vec<u32>>,

    /// Display title
    pub title: String,

    /// Timestamps of the device's events
    pub index: Vec<f64>,

    /// Cooling state at each event
    pub states: Vec<i64>,

    /// Lowest state seen
    pub min_state: i64,

    /// Highest state seen
    pub max_state: i64,
}

impl CdevSeries {
    /// Build a series from the given rows of the event table columns
    ///
    /// # Errors
    /// * `PowerError::InvalidState` - a cooling state is not a whole number
    pub(crate) fn from_rows(
        device: String,
        cpus: Option<Vec<u32>>,
        title: String,
        rows: &[usize],
        index: &[f64],
        states: &[f64],
    ) -> Result<Self, PowerError> {
        let states: Vec<i64> = rows
            .iter()
            .map(|&row| {
                let state = states[row];
                if !state.is_finite() || state.fract() != 0.0 {
                    return Err(PowerError::InvalidState { row, value: state });
                }
                Ok(state as i64)
            })
            .collect::<Result<_, _>>()?;
        let min_state = states.iter().copied().min().unwrap_or_default();
        let max_state = states.iter().copied().max().unwrap_or_default();

        Ok(Self {
            device,
            cpus,
            title,
            index: rows.iter().map(|&row| index[row]).collect(),
            states,
            min_state,
            max_state,
        })
    }

    /// Integer states spanned by the series, for one tick per state
    pub fn state_ticks(&self) -> std::ops::RangeInclusive<i64> {
        self.min_state..=self.max_state
    }
}

/// Group row positions by key, keeping keys in first-appearance order
pub(crate) fn group_rows<K, F>(keys: &[K], keep: F) -> Vec<(K, Vec<usize>)>
where
    K: PartialEq + Clone,
    F: Fn(&K) -> bool,
{
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();

    for (row, key) in keys.iter().enumerate() {
        if !keep(key) {
            continue;
        }
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((key.clone(), vec![row])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_rows_first_appearance_order() {
        let keys = [3u64, 1, 3, 2, 1];
        let groups = group_rows(&keys, |_| true);
        assert_eq!(
            groups,
            vec![(3, vec![0, 2]), (1, vec![1, 4]), (2, vec![3])]
        );
    }

    #[test]
    fn test_group_rows_filter() {
        let keys = ["gpu", "npu", "gpu"];
        let groups = group_rows(&keys, |k| *k == "gpu");
        assert_eq!(groups, vec![("gpu", vec![0, 2])]);
    }

    #[test]
    fn test_series_state_range() {
        let series = CdevSeries::from_rows(
            "gpu".to_string(),
            None,
            "Cooling state evolution of gpu".to_string(),
            &[0, 2],
            &[0.1, 0.2, 0.3],
            &[4.0, 0.0, 1.0],
        )
        .unwrap();
        assert_eq!(series.index, vec![0.1, 0.3]);
        assert_eq!(series.states, vec![4, 1]);
        assert_eq!(series.state_ticks(), 1..=4);
    }

    #[test]
    fn test_series_rejects_fractional_state() {
        let result = CdevSeries::from_rows(
            "gpu".to_string(),
            None,
            "Cooling state evolution of gpu".to_string(),
            &[0, 1],
            &[0.1, 0.2],
            &[1.0, 1.5],
        );
        assert_eq!(result, Err(PowerError::InvalidState { row: 1, value: 1.5 }));
    }

    #[test]
    fn test_series_rejects_nan_state() {
        let result = CdevSeries::from_rows(
            "gpu".to_string(),
            None,
            "Cooling state evolution of gpu".to_string(),
            &[0],
            &[0.1],
            &[f64::NAN],
        );
        assert!(matches!(result, Err(PowerError::InvalidState { row: 0, .. })));
    }
}
