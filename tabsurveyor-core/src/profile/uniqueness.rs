//! Row-level uniqueness analysis.
//!
//! A row is a duplicate when every cell equals the corresponding cell of an
//! earlier row. Missing cells compare equal to each other.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{CellValue, Dataset};

/// Hashable view of a cell used to compare whole rows.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(u64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(&'a str),
}

impl<'a> From<&'a CellValue> for CellKey<'a> {
    fn from(value: &'a CellValue) -> Self {
        match value {
            CellValue::Null => CellKey::Null,
            CellValue::Boolean(b) => CellKey::Boolean(*b),
            CellValue::Integer(i) => CellKey::Integer(*i),
            CellValue::Float(f) if f.is_nan() => CellKey::Null,
            // Fold -0.0 into 0.0 so the two compare equal
            CellValue::Float(f) if *f == 0.0 => CellKey::Float(0.0_f64.to_bits()),
            CellValue::Float(f) => CellKey::Float(f.to_bits()),
            CellValue::Date(d) => CellKey::Date(*d),
            CellValue::DateTime(dt) => CellKey::DateTime(*dt),
            CellValue::Text(s) => CellKey::Text(s.as_str()),
        }
    }
}

/// Counts rows that exactly repeat an earlier row.
///
/// Every occurrence after the first counts, so three identical rows yield 2.
pub(crate) fn count_duplicate_rows(dataset: &Dataset) -> usize {
    let columns = dataset.columns();
    if columns.is_empty() {
        return 0;
    }

    let mut seen_rows: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(dataset.num_rows());
    let mut duplicate_count: usize = 0;

    for row in 0..dataset.num_rows() {
        let key: Vec<CellKey<'_>> = columns
            .iter()
            .map(|column| CellKey::from(&column.values[row]))
            .collect();

        if !seen_rows.insert(key) {
            duplicate_count += 1;
        }
    }

    duplicate_count
}
