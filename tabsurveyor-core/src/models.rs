//! Core data models for tabular dataset representation.
//!
//! A [`Dataset`] is column-oriented: an ordered list of uniquely named
//! [`Column`]s, each holding one [`CellValue`] per row. The shape invariants
//! (equal column lengths, unique names) are enforced by [`Dataset::new`], so
//! everything downstream can index rows without re-checking them.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyorError};

/// Literal a missing cell stringifies to for text matching and display.
pub const NULL_DISPLAY: &str = "nan";

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing value
    Null,
    /// True or false
    Boolean(bool),
    /// Signed 64-bit integer
    Integer(i64),
    /// 64-bit float; NaN counts as missing
    Float(f64),
    /// Calendar date without a time component
    Date(NaiveDate),
    /// Date and time without a timezone
    DateTime(NaiveDateTime),
    /// Free text, possibly empty
    Text(String),
}

impl CellValue {
    /// Returns true for a missing cell: `Null` or a NaN float. Empty text,
    /// zero and false are present.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Stringifies the cell the way it is shown and searched.
    ///
    /// Whole floats keep one decimal (`1.0`) so they stay distinguishable
    /// from integers; a missing cell becomes [`NULL_DISPLAY`].
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => NULL_DISPLAY.to_string(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Returns the column type this value would imply on its own.
    pub fn value_type(&self) -> Option<ColumnType> {
        match self {
            CellValue::Null => None,
            CellValue::Boolean(_) => Some(ColumnType::Boolean),
            CellValue::Integer(_) => Some(ColumnType::Integer),
            CellValue::Float(_) => Some(ColumnType::Float),
            CellValue::Date(_) | CellValue::DateTime(_) => Some(ColumnType::DateTime),
            CellValue::Text(_) => Some(ColumnType::Text),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        NULL_DISPLAY.to_string()
    } else if value.is_infinite() {
        (if value > 0.0 { "inf" } else { "-inf" }).to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Whole numbers
    Integer,
    /// Floating-point numbers; ingestion also uses it for integers with gaps
    Float,
    /// True/false values
    Boolean,
    /// Dates and datetimes
    DateTime,
    /// Anything else
    Text,
}

impl ColumnType {
    /// Stable label reported as the column's declared type.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
        }
    }

    /// Infers a column type from its values, ignoring nulls.
    ///
    /// Integers mixed with floats widen to float; any other mix falls back
    /// to text. A column with no present values is typed float, matching how
    /// a blank column reads from CSV.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut inferred: Option<ColumnType> = None;
        for value_type in values.into_iter().filter_map(CellValue::value_type) {
            inferred = Some(match (inferred, value_type) {
                (None, t) => t,
                (Some(current), t) if current == t => current,
                (Some(ColumnType::Integer), ColumnType::Float)
                | (Some(ColumnType::Float), ColumnType::Integer) => ColumnType::Float,
                _ => return ColumnType::Text,
            });
        }
        inferred.unwrap_or(ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Unique column name
    pub name: String,
    /// Declared column type
    pub column_type: ColumnType,
    /// One cell per row
    pub values: Vec<CellValue>,
}

impl Column {
    /// Creates a column, inferring its type from the values.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let column_type = ColumnType::infer(&values);
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Creates a column with an explicitly declared type.
    pub fn with_type(
        name: impl Into<String>,
        column_type: ColumnType,
        values: Vec<CellValue>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// An immutable, rectangular table of named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Dataset {
    /// Creates a dataset after checking its shape.
    ///
    /// # Errors
    /// Returns [`SurveyorError::InvalidDataset`] if column names repeat or
    /// columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, Column::len);

        let mut seen: HashSet<&str> = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SurveyorError::invalid_dataset(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            if column.len() != num_rows {
                return Err(SurveyorError::invalid_dataset(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name,
                    column.len(),
                    num_rows
                )));
            }
        }

        Ok(Self { columns, num_rows })
    }

    /// Number of rows (N).
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (M).
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns in source order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Returns the cells of one row, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        (index < self.num_rows)
            .then(|| self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Returns up to `n` leading rows for previews.
    pub fn head(&self, n: usize) -> Vec<Vec<&CellValue>> {
        (0..self.num_rows.min(n)).filter_map(|i| self.row(i)).collect()
    }

    /// Returns true if the dataset has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[Option<i64>]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Integer))
            .collect()
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(CellValue::Null.to_display_string(), "nan");
        assert_eq!(CellValue::Boolean(false).to_display_string(), "false");
        assert_eq!(CellValue::Integer(-7).to_display_string(), "-7");
        assert_eq!(CellValue::Float(1.0).to_display_string(), "1.0");
        assert_eq!(CellValue::Float(2.5).to_display_string(), "2.5");
        assert_eq!(CellValue::Float(f64::INFINITY).to_display_string(), "inf");
        assert_eq!(CellValue::Text(String::new()).to_display_string(), "");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(date).to_display_string(), "2024-03-09");
        let dt = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(
            CellValue::DateTime(dt).to_display_string(),
            "2024-03-09 07:05:00"
        );
    }

    #[test]
    fn test_null_and_nan_are_missing() {
        assert!(CellValue::Null.is_null());
        assert!(CellValue::Float(f64::NAN).is_null());
        assert!(!CellValue::Float(0.0).is_null());
        assert!(!CellValue::Text(String::new()).is_null());
        assert!(!CellValue::Integer(0).is_null());
        assert!(!CellValue::Boolean(false).is_null());
    }

    #[test]
    fn test_column_type_inference() {
        assert_eq!(ColumnType::infer(&ints(&[Some(1), None])), ColumnType::Integer);
        assert_eq!(
            ColumnType::infer(&[CellValue::Integer(1), CellValue::Float(0.5)]),
            ColumnType::Float
        );
        assert_eq!(
            ColumnType::infer(&[CellValue::Integer(1), CellValue::Text("a".into())]),
            ColumnType::Text
        );
        assert_eq!(ColumnType::infer(&[CellValue::Null]), ColumnType::Float);
        assert_eq!(ColumnType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn test_dataset_shape() {
        let dataset = Dataset::new(vec![
            Column::new("a", ints(&[Some(1), None, Some(3)])),
            Column::new("b", ints(&[Some(4), Some(5), Some(6)])),
        ])
        .unwrap();

        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(dataset.num_columns(), 2);
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
        assert_eq!(dataset.column("a").unwrap().missing_count(), 1);
        assert_eq!(
            dataset.row(2).unwrap(),
            vec![&CellValue::Integer(3), &CellValue::Integer(6)]
        );
        assert!(dataset.row(3).is_none());
        assert_eq!(dataset.head(10).len(), 3);
        assert_eq!(dataset.head(1).len(), 1);
    }

    #[test]
    fn test_dataset_rejects_ragged_columns() {
        let result = Dataset::new(vec![
            Column::new("a", ints(&[Some(1), Some(2)])),
            Column::new("b", ints(&[Some(1)])),
        ]);
        assert!(matches!(result, Err(SurveyorError::InvalidDataset { .. })));
    }

    #[test]
    fn test_dataset_rejects_duplicate_names() {
        let result = Dataset::new(vec![
            Column::new("a", ints(&[Some(1)])),
            Column::new("a", ints(&[Some(2)])),
        ]);
        assert!(matches!(result, Err(SurveyorError::InvalidDataset { .. })));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.num_rows(), 0);

        let no_rows = Dataset::new(vec![Column::new("a", Vec::new())]).unwrap();
        assert!(no_rows.is_empty());
        assert_eq!(no_rows.num_columns(), 1);
    }
}
