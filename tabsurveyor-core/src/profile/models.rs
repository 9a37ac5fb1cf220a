//! Dataset profile models.
//!
//! This module defines the data structures returned by a profiling call.
//! Every percentage is on a 0-100 scale and is 0.0 whenever its
//! denominator is zero.

use serde::{Deserialize, Serialize};

use crate::models::ColumnType;

/// Returns `part / whole * 100`, or 0.0 when `whole` is zero.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Completeness status of one included column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatus {
    /// Column name
    pub name: String,
    /// True when the column has no missing cells
    pub is_complete: bool,
    /// Count of present cells
    pub complete_count: usize,
    /// Count of missing cells
    pub missing_count: usize,
    /// Present cells as a percentage of the row count
    pub completion_rate: f64,
    /// Declared column type
    pub dtype: ColumnType,
}

impl ColumnStatus {
    /// Creates a column status from its missing count and the row count.
    pub fn new(
        name: impl Into<String>,
        missing_count: usize,
        num_rows: usize,
        dtype: ColumnType,
    ) -> Self {
        let name = name.into();

        if missing_count > num_rows {
            tracing::warn!(
                "Profile anomaly: missing_count ({}) exceeds row count ({}) for column '{}'",
                missing_count,
                num_rows,
                name
            );
        }

        let complete_count = num_rows.saturating_sub(missing_count);
        Self {
            name,
            is_complete: missing_count == 0,
            complete_count,
            missing_count,
            completion_rate: percentage(complete_count, num_rows),
            dtype,
        }
    }
}

/// Missing-value count for a column that has at least one missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingBreakdown {
    /// Column name
    pub name: String,
    /// Count of missing cells
    pub missing_count: usize,
    /// Missing cells as a percentage of the row count
    pub percentage: f64,
}

impl MissingBreakdown {
    /// Creates a breakdown entry.
    pub fn new(name: impl Into<String>, missing_count: usize, num_rows: usize) -> Self {
        Self {
            name: name.into(),
            missing_count,
            percentage: percentage(missing_count, num_rows),
        }
    }
}

/// Word-search hit count for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordResult {
    /// Column name
    pub name: String,
    /// Number of cells containing the search term
    pub count: usize,
    /// Matching cells as a percentage of the row count
    pub percentage: f64,
}

impl WordResult {
    /// Creates a word result.
    pub fn new(name: impl Into<String>, count: usize, num_rows: usize) -> Self {
        Self {
            name: name.into(),
            count,
            percentage: percentage(count, num_rows),
        }
    }
}

/// One matching cell shown as a word-search example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordExample {
    /// Column name
    pub name: String,
    /// 1-based row number
    pub row_number: usize,
    /// Stringified cell value, capped in length
    pub value: String,
}

/// Declared type of a dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDtype {
    /// Column name
    pub name: String,
    /// Declared column type
    pub dtype: ColumnType,
}

/// Word-search results for a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordSearch {
    /// Matching columns, most matches first
    pub results: Vec<WordResult>,
    /// Example matches in column-then-row order
    pub examples: Vec<WordExample>,
    /// Sum of all per-column counts
    pub total_occurrences: usize,
}

/// Complete profile of a dataset.
///
/// Created once per profiling call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Number of rows (N)
    pub num_rows: usize,
    /// Number of columns (M)
    pub num_columns: usize,
    /// Rows repeating an earlier row exactly
    pub num_duplicates: usize,
    /// Missing cells across all columns
    pub total_missing: usize,
    /// Missing cells as a percentage of N x M
    pub missing_percentage: f64,
    /// Number of complete included columns
    pub complete_columns_count: usize,
    /// Names of complete included columns
    pub complete_columns: Vec<String>,
    /// Status of every included column
    pub all_columns: Vec<ColumnStatus>,
    /// Statuses whose name matches the column query
    pub filtered_columns: Vec<ColumnStatus>,
    /// All column names in source order
    pub column_names: Vec<String>,
    /// Declared type of every column in source order
    pub dtypes: Vec<ColumnDtype>,
    /// Columns with missing cells, most missing first
    pub missing_breakdown: Vec<MissingBreakdown>,
    /// Word-search hits per column, most hits first
    pub word_results: Vec<WordResult>,
    /// Word-search examples
    pub word_examples: Vec<WordExample>,
    /// Total word-search hits
    pub word_total_occurrences: usize,
    /// Excluded columns present in the dataset
    pub excluded_columns: Vec<String>,
    /// Column query the profile was computed for
    pub column_query: String,
    /// Word query the profile was computed for
    pub word_query: String,
}

impl Profile {
    /// Looks up the declared type of a column.
    pub fn dtype(&self, name: &str) -> Option<ColumnType> {
        self.dtypes
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.dtype)
    }

    /// Looks up the status of an included column.
    pub fn column_status(&self, name: &str) -> Option<&ColumnStatus> {
        self.all_columns.iter().find(|s| s.name == name)
    }

    /// Returns true if a column query was given.
    pub fn has_column_query(&self) -> bool {
        !self.column_query.is_empty()
    }

    /// Returns true if a word query was given.
    pub fn has_word_query(&self) -> bool {
        !self.word_query.is_empty()
    }
}
