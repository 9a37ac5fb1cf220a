//! Profiler facade.
//!
//! This module provides the `Profiler` that runs every analysis over a
//! dataset and assembles the resulting `Profile`.

use crate::models::Dataset;

use super::completeness::analyze_completeness;
use super::config::ProfilerConfig;
use super::models::{ColumnDtype, Profile};
use super::search::{filter_columns, search_word};
use super::uniqueness::count_duplicate_rows;

/// Dataset profiler.
///
/// The profiler borrows a `Dataset` immutably and returns a fresh `Profile`
/// on every call. It holds no state besides its configuration, so one
/// instance can serve any number of datasets, including from several
/// threads at once.
///
/// # Example
///
/// ```rust
/// use tabsurveyor_core::{CellValue, Column, Dataset, Profiler};
///
/// let dataset = Dataset::new(vec![
///     Column::new("city", vec![CellValue::Text("Cairo".into()), CellValue::Null]),
/// ])
/// .unwrap();
///
/// let profile = Profiler::with_defaults().profile(&dataset, "", "cai");
/// assert_eq!(profile.total_missing, 1);
/// assert_eq!(profile.word_total_occurrences, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Creates a new profiler with the given configuration.
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Creates a new profiler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProfilerConfig::default())
    }

    /// Returns a reference to the profiler configuration.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles a dataset.
    ///
    /// `column_query` filters the column status list by name and
    /// `word_query` searches cell contents; an empty string skips either
    /// step. Callers are expected to trim the queries.
    pub fn profile(&self, dataset: &Dataset, column_query: &str, word_query: &str) -> Profile {
        let excluded = &self.config.excluded_columns;

        let completeness = analyze_completeness(dataset, excluded);
        let num_duplicates = count_duplicate_rows(dataset);
        let filtered_columns = filter_columns(&completeness.column_statuses, column_query);
        let word_search = search_word(dataset, excluded, word_query, &self.config);

        let excluded_columns: Vec<String> = excluded
            .iter()
            .filter(|name| dataset.column(name).is_some())
            .map(str::to_string)
            .collect();

        let dtypes = dataset
            .columns()
            .iter()
            .map(|column| ColumnDtype {
                name: column.name.clone(),
                dtype: column.column_type,
            })
            .collect();

        tracing::debug!(
            "Profiled {} rows x {} columns: {} missing cells, {} duplicate rows, {} excluded columns",
            dataset.num_rows(),
            dataset.num_columns(),
            completeness.total_missing,
            num_duplicates,
            excluded_columns.len()
        );

        Profile {
            num_rows: dataset.num_rows(),
            num_columns: dataset.num_columns(),
            num_duplicates,
            total_missing: completeness.total_missing,
            missing_percentage: completeness.missing_percentage,
            complete_columns_count: completeness.complete_columns.len(),
            complete_columns: completeness.complete_columns,
            all_columns: completeness.column_statuses,
            filtered_columns,
            column_names: dataset.column_names(),
            dtypes,
            missing_breakdown: completeness.missing_breakdown,
            word_results: word_search.results,
            word_examples: word_search.examples,
            word_total_occurrences: word_search.total_occurrences,
            excluded_columns,
            column_query: column_query.to_string(),
            word_query: word_query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Column, ColumnType};
    use crate::profile::config::ExcludedSet;
    use crate::profile::models::{WordExample, WordResult};

    fn sample_dataset(a: &[Option<i64>]) -> Dataset {
        Dataset::new(vec![
            Column::new(
                "A",
                a.iter()
                    .map(|v| v.map_or(CellValue::Null, CellValue::Integer))
                    .collect(),
            ),
            Column::new(
                "B",
                ["x", "y", "x"]
                    .iter()
                    .map(|s| CellValue::Text((*s).to_string()))
                    .collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_nan_and_null_agree_across_metrics() {
        let dataset = Dataset::new(vec![Column::new(
            "a",
            vec![CellValue::Float(f64::NAN), CellValue::Null],
        )])
        .unwrap();

        let profile = Profiler::with_defaults().profile(&dataset, "", "");

        assert_eq!(profile.total_missing, 2);
        assert_eq!(profile.num_duplicates, 1);
        assert!(profile.complete_columns.is_empty());
    }

    #[test]
    fn test_profile_three_row_scenario() {
        let dataset = sample_dataset(&[Some(1), None, Some(1)]);

        let profile = Profiler::with_defaults().profile(&dataset, "", "x");

        assert_eq!(profile.num_rows, 3);
        assert_eq!(profile.num_columns, 2);
        // Rows 1 and 3 are both (1, "x")
        assert_eq!(profile.num_duplicates, 1);
        assert_eq!(profile.total_missing, 1);
        assert!((profile.missing_percentage - 16.667).abs() < 0.001);

        let a = profile.column_status("A").unwrap();
        assert_eq!(a.missing_count, 1);
        assert!(!a.is_complete);
        assert_eq!(profile.missing_breakdown.len(), 1);
        assert!((profile.missing_breakdown[0].percentage - 33.33).abs() < 0.01);

        assert!(profile.column_status("B").unwrap().is_complete);
        assert_eq!(profile.complete_columns, vec!["B"]);
        assert_eq!(profile.complete_columns_count, 1);

        assert_eq!(profile.word_results.len(), 1);
        let hit: &WordResult = &profile.word_results[0];
        assert_eq!(hit.name, "B");
        assert_eq!(hit.count, 2);
        assert!((hit.percentage - 66.67).abs() < 0.01);
        assert_eq!(
            profile.word_examples,
            vec![
                WordExample {
                    name: "B".to_string(),
                    row_number: 1,
                    value: "x".to_string()
                },
                WordExample {
                    name: "B".to_string(),
                    row_number: 3,
                    value: "x".to_string()
                },
            ]
        );
        assert_eq!(profile.word_total_occurrences, 2);
    }

    #[test]
    fn test_profile_rows_differing_in_a() {
        let dataset = sample_dataset(&[Some(1), None, Some(2)]);

        let profile = Profiler::with_defaults().profile(&dataset, "", "");

        assert_eq!(profile.num_duplicates, 0);
    }

    #[test]
    fn test_profile_empty_dataset() {
        let dataset = Dataset::new(vec![Column::new("a", vec![]), Column::new("b", vec![])])
            .unwrap();

        let profile = Profiler::with_defaults().profile(&dataset, "a", "a");

        assert_eq!(profile.num_rows, 0);
        assert_eq!(profile.num_duplicates, 0);
        assert_eq!(profile.missing_percentage, 0.0);
        assert_eq!(profile.complete_columns, vec!["a", "b"]);
        assert!(profile.all_columns.iter().all(|s| s.completion_rate == 0.0));
        assert_eq!(profile.filtered_columns.len(), 1);
        assert!(profile.word_results.is_empty());
    }

    #[test]
    fn test_profile_empty_column_query() {
        let dataset = sample_dataset(&[Some(1), None, Some(2)]);

        let profile = Profiler::with_defaults().profile(&dataset, "", "");

        assert!(profile.filtered_columns.is_empty());
        assert!(!profile.has_column_query());
        assert!(!profile.has_word_query());
    }

    #[test]
    fn test_profile_column_query() {
        let dataset = sample_dataset(&[Some(1), None, Some(2)]);

        let profile = Profiler::with_defaults().profile(&dataset, "b", "");

        assert_eq!(profile.filtered_columns.len(), 1);
        assert_eq!(profile.filtered_columns[0].name, "B");
        assert_eq!(profile.column_query, "b");
    }

    #[test]
    fn test_profile_excluded_columns() {
        let dataset = Dataset::new(vec![
            Column::new("Governorate", vec![CellValue::Null, CellValue::Text("x".into())]),
            Column::new("name", vec![CellValue::Text("x".into()), CellValue::Text("y".into())]),
            Column::new("CreatedAt", vec![CellValue::Null, CellValue::Null]),
        ])
        .unwrap();

        let profile = Profiler::with_defaults().profile(&dataset, "", "x");

        // ExcludedSet order, not dataset order
        assert_eq!(profile.excluded_columns, vec!["CreatedAt", "Governorate"]);
        assert_eq!(profile.all_columns.len(), 1);
        assert_eq!(profile.total_missing, 3);
        assert_eq!(profile.missing_breakdown[0].name, "CreatedAt");
        assert_eq!(profile.word_total_occurrences, 1);
        assert_eq!(profile.column_names, vec!["Governorate", "name", "CreatedAt"]);
    }

    #[test]
    fn test_profile_without_excludes() {
        let dataset = Dataset::new(vec![Column::new("Governorate", vec![CellValue::Null])])
            .unwrap();
        let profiler =
            Profiler::new(ProfilerConfig::new().with_excluded_columns(ExcludedSet::empty()));

        let profile = profiler.profile(&dataset, "", "");

        assert!(profile.excluded_columns.is_empty());
        assert_eq!(profile.all_columns.len(), 1);
    }

    #[test]
    fn test_profile_dtypes_keep_column_order() {
        let dataset = Dataset::new(vec![
            Column::new("z", vec![CellValue::Float(1.5)]),
            Column::new("a", vec![CellValue::Boolean(true)]),
        ])
        .unwrap();

        let profile = Profiler::with_defaults().profile(&dataset, "", "");

        assert_eq!(profile.dtypes[0].name, "z");
        assert_eq!(profile.dtype("z"), Some(ColumnType::Float));
        assert_eq!(profile.dtype("a"), Some(ColumnType::Boolean));
        assert_eq!(profile.dtype("missing"), None);
    }

    #[test]
    fn test_profile_is_deterministic() {
        let dataset = sample_dataset(&[Some(1), None, Some(1)]);
        let profiler = Profiler::with_defaults();

        assert_eq!(
            profiler.profile(&dataset, "a", "x"),
            profiler.profile(&dataset, "a", "x")
        );
    }

    #[test]
    fn test_profiler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Profiler>();
        assert_send_sync::<Dataset>();
        assert_send_sync::<Profile>();
    }
}
