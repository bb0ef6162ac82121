use pretty_assertions::assert_eq;
use thermal_power::aggregator::{
    count_set_bits, cpu_list_to_mask, mask_to_cpu_list, mask_to_int, normalized_load, pivot,
    scaled_frequencies, CpuMask, LabelMap, LoadColumns, WideTable,
};
use thermal_power::parser::EventTable;
use thermal_power::utils::config::{CPU_FREQ_DIVISOR, DEVFREQ_FREQ_DIVISOR};
use thermal_power::utils::error::{LoadError, MaskError, PivotError, TableError};

/// Column contents with NaN replaced by None so tables compare with ==
fn cells(table: &WideTable, label: &str) -> Vec<Option<f64>> {
    table
        .column(label)
        .unwrap()
        .iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

fn big_little_table() -> EventTable {
    EventTable::with_row_count(4)
        .with_text_column("cpus", ["000000f0", "0000000f", "000000f0", "0000000f"])
        .unwrap()
        .with_numeric_column("freq", vec![1.0, 3.0, 2.0, 6.0])
        .unwrap()
}

fn big_little_labels() -> LabelMap {
    LabelMap::new([("000000f0", "A15"), ("0000000f", "A7")]).unwrap()
}

#[test]
fn test_mask_codec() {
    assert_eq!(mask_to_int("0000000f"), Ok(CpuMask::from(15u64)));
    assert_eq!(
        mask_to_int("bad-mask"),
        Err(MaskError::InvalidFormat("bad-mask".to_string()))
    );
    assert_eq!(count_set_bits("000000f0"), Ok(4));
    assert_eq!(count_set_bits("0,0,0,0,f,0"), Ok(4));
    assert_eq!(count_set_bits("0000000f,00000000,00000000"), Ok(4));
}

#[test]
fn test_cpu_list_roundtrip() {
    let sets: [&[u32]; 5] = [&[], &[0], &[7, 3, 1], &[63, 0, 32, 31], &[100, 64, 1]];
    for set in sets {
        let mut sorted = set.to_vec();
        sorted.sort_unstable();
        let mask = cpu_list_to_mask(set.iter().copied());
        assert_eq!(mask_to_cpu_list(&mask), sorted);
    }
}

#[test]
fn test_pivot_forward_fills() {
    let wide = pivot(&big_little_table(), "freq", "cpus", &big_little_labels()).unwrap();

    assert_eq!(wide.labels().collect::<Vec<_>>(), vec!["A15", "A7"]);
    assert_eq!(wide.index(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(cells(&wide, "A15"), vec![Some(1.0), Some(1.0), Some(2.0), Some(2.0)]);
    assert_eq!(cells(&wide, "A7"), vec![None, Some(3.0), Some(3.0), Some(6.0)]);
}

#[test]
fn test_pivot_unknown_group() {
    let labels = LabelMap::new([("000000f0", "A15")]).unwrap();
    let err = pivot(&big_little_table(), "freq", "cpus", &labels).unwrap_err();

    assert_eq!(
        err,
        PivotError::UnknownGroup {
            key: "0000000f".to_string(),
            available: vec!["000000f0".to_string()],
        }
    );
    assert_eq!(err.to_string(), "\"0000000f\" not found, available keys: 000000f0");
}

#[test]
fn test_pivot_ignores_unused_labels() {
    let labels =
        LabelMap::new([("000000f0", "A15"), ("0000000f", "A7"), ("00000f00", "X1")]).unwrap();
    let wide = pivot(&big_little_table(), "freq", "cpus", &labels).unwrap();
    assert_eq!(wide.column("X1"), None);
}

#[test]
fn test_pivot_empty_table() {
    let table = EventTable::default()
        .with_text_column("cpus", Vec::<String>::new())
        .unwrap()
        .with_numeric_column("freq", vec![])
        .unwrap();
    let wide = pivot(&table, "freq", "cpus", &big_little_labels()).unwrap();
    assert!(wide.is_empty());
    assert_eq!(wide.labels().count(), 0);
}

#[test]
fn test_pivot_missing_column() {
    let err = pivot(&big_little_table(), "cdev_state", "cpus", &big_little_labels()).unwrap_err();
    assert_eq!(err, PivotError::Table(TableError::ColumnNotFound("cdev_state".to_string())));
}

#[test]
fn test_normalized_load_single_group() {
    let table = EventTable::with_row_count(2)
        .with_text_column("cpus", ["00000003", "00000003"])
        .unwrap()
        .with_numeric_column("freq", vec![10.0, 20.0])
        .unwrap()
        .with_numeric_column("load0", vec![1.0, 1.0])
        .unwrap();
    let labels = LabelMap::new([("00000003", "little")]).unwrap();

    let load_columns = LoadColumns::new(["load0"]);
    let wide = normalized_load(&table, "cpus", "freq", &load_columns, &labels).unwrap();

    assert_eq!(cells(&wide, "little"), vec![Some(0.25), Some(0.5)]);
}

#[test]
fn test_normalized_load_uses_per_group_max() {
    let table = EventTable::with_row_count(3)
        .with_text_column("cpus", ["00000001", "00000006", "00000001"])
        .unwrap()
        .with_numeric_column("freq", vec![50.0, 100.0, 25.0])
        .unwrap()
        .with_numeric_column("load0", vec![10.0, 40.0, 20.0])
        .unwrap()
        .with_numeric_column("load1", vec![10.0, 40.0, 20.0])
        .unwrap();
    let labels = LabelMap::new([("00000001", "little"), ("00000006", "big")]).unwrap();
    let columns = LoadColumns::new(["load0", "load1"]);

    let wide = normalized_load(&table, "cpus", "freq", &columns, &labels).unwrap();

    // little: max 50, 1 cpu; big: max 100, 2 cpus
    assert_eq!(cells(&wide, "little"), vec![Some(20.0), Some(20.0), Some(20.0)]);
    assert_eq!(cells(&wide, "big"), vec![None, Some(40.0), Some(40.0)]);
}

#[test]
fn test_normalized_load_zero_divisor() {
    let table = EventTable::with_row_count(1)
        .with_text_column("cpus", ["00000001"])
        .unwrap()
        .with_numeric_column("freq", vec![0.0])
        .unwrap()
        .with_numeric_column("load0", vec![5.0])
        .unwrap();
    let labels = LabelMap::new([("00000001", "little")]).unwrap();

    let load_columns = LoadColumns::new(["load0"]);
    let err = normalized_load(&table, "cpus", "freq", &load_columns, &labels).unwrap_err();
    assert_eq!(err, LoadError::ZeroNormalizer { key: "00000001".to_string() });
}

#[test]
fn test_normalized_load_requires_load_columns() {
    let err = normalized_load(
        &big_little_table(),
        "cpus",
        "freq",
        &LoadColumns::default(),
        &big_little_labels(),
    )
    .unwrap_err();
    assert_eq!(err, LoadError::NoLoadColumns);
}

#[test]
fn test_frequency_divisors() {
    let table = EventTable::with_row_count(2)
        .with_text_column("cpus", ["0000000f", "0000000f"])
        .unwrap()
        .with_numeric_column("freq", vec![1_000.0, 1_000_000.0])
        .unwrap();
    let labels = LabelMap::new([("0000000f", "A7")]).unwrap();

    let khz = scaled_frequencies(&table, "cpus", "freq", &labels, CPU_FREQ_DIVISOR).unwrap();
    assert_eq!(cells(&khz, "A7"), vec![Some(1.0), Some(1000.0)]);

    let hz = scaled_frequencies(&table, "cpus", "freq", &labels, DEVFREQ_FREQ_DIVISOR).unwrap();
    assert_eq!(cells(&hz, "A7"), vec![Some(0.001), Some(1.0)]);
}
