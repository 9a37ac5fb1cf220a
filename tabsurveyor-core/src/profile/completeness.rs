//! Completeness analysis for dataset profiling.
//!
//! Missing cells are counted over every column, while per-column status and
//! the complete-column list only cover columns outside the excluded set.

use crate::models::Dataset;

use super::config::ExcludedSet;
use super::models::{ColumnStatus, MissingBreakdown, percentage};

/// Missing-value accounting for one dataset.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompletenessMetrics {
    pub(crate) total_missing: usize,
    pub(crate) missing_percentage: f64,
    pub(crate) column_statuses: Vec<ColumnStatus>,
    pub(crate) complete_columns: Vec<String>,
    pub(crate) missing_breakdown: Vec<MissingBreakdown>,
}

/// Analyzes missing values across the dataset.
pub(crate) fn analyze_completeness(
    dataset: &Dataset,
    excluded: &ExcludedSet,
) -> CompletenessMetrics {
    let num_rows = dataset.num_rows();
    let missing_counts: Vec<usize> = dataset
        .columns()
        .iter()
        .map(|column| column.missing_count())
        .collect();

    let total_missing: usize = missing_counts.iter().sum();
    let total_cells = num_rows.saturating_mul(dataset.num_columns());

    let column_statuses: Vec<ColumnStatus> = dataset
        .columns()
        .iter()
        .zip(&missing_counts)
        .filter(|(column, _)| !excluded.contains(&column.name))
        .map(|(column, &missing)| {
            ColumnStatus::new(&column.name, missing, num_rows, column.column_type)
        })
        .collect();

    let complete_columns = column_statuses
        .iter()
        .filter(|status| status.is_complete)
        .map(|status| status.name.clone())
        .collect();

    // Excluded columns still count here
    let mut missing_breakdown: Vec<MissingBreakdown> = dataset
        .columns()
        .iter()
        .zip(&missing_counts)
        .filter(|(_, missing)| **missing > 0)
        .map(|(column, &missing)| MissingBreakdown::new(&column.name, missing, num_rows))
        .collect();
    // Stable sort: ties keep column order
    missing_breakdown.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));

    CompletenessMetrics {
        total_missing,
        missing_percentage: percentage(total_missing, total_cells),
        column_statuses,
        complete_columns,
        missing_breakdown,
    }
}
