//! End-to-end tests: CSV on disk through ingestion, session store and
//! profiling.
//!
//! This test suite covers:
//! - File-based ingestion with the extension and size checks
//! - Profiles of realistic exports carrying bookkeeping columns
//! - Session replacement semantics of the dataset store
//! - JSON serialization of a complete profile

use std::io::Write;

use tabsurveyor_core::{
    ColumnType, DatasetStore, ExcludedSet, IngestConfig, Profiler, ProfilerConfig, Result,
    SurveyorError, read_csv_path,
};
use tempfile::{Builder, NamedTempFile};

const EXPORT: &str = "\
BookNumber,Title,Pages,Price,Governorate,CreatedAt,DeletedAt
1,Cairo Nights,320,12.5,Cairo,2024-01-05 10:30:00,
2,River Songs,,9,Giza,2024-01-06 11:00:00,
3,Desert Notes,150,,Cairo,2024-01-07 09:15:00,
2,River Songs,,9,Giza,2024-01-06 11:00:00,
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

// =============================================================================
// Ingestion
// =============================================================================

#[test]
fn test_integration_read_export() -> Result<()> {
    let file = write_csv(EXPORT);

    let dataset = read_csv_path(file.path(), &IngestConfig::default())?;

    assert_eq!(dataset.num_rows(), 4);
    assert_eq!(dataset.num_columns(), 7);
    assert_eq!(dataset.column("BookNumber").unwrap().column_type, ColumnType::Integer);
    // Pages has gaps, so it is read as float
    assert_eq!(dataset.column("Pages").unwrap().column_type, ColumnType::Float);
    assert_eq!(dataset.column("Price").unwrap().column_type, ColumnType::Float);
    assert_eq!(dataset.column("CreatedAt").unwrap().column_type, ColumnType::DateTime);
    assert_eq!(dataset.column("DeletedAt").unwrap().column_type, ColumnType::Float);
    assert_eq!(dataset.head(10).len(), 4);
    assert_eq!(dataset.head(2).len(), 2);

    Ok(())
}

#[test]
fn test_integration_rejects_non_csv() {
    let mut file = Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(EXPORT.as_bytes()).unwrap();

    let result = read_csv_path(file.path(), &IngestConfig::default());
    assert!(matches!(result, Err(SurveyorError::UnsupportedFile { .. })));

    let config = IngestConfig::new().with_require_csv_extension(false);
    assert!(read_csv_path(file.path(), &config).is_ok());
}

#[test]
fn test_integration_rejects_oversized_file() {
    let file = write_csv(EXPORT);
    let config = IngestConfig::new().with_max_bytes(16);

    let result = read_csv_path(file.path(), &config);
    assert!(matches!(
        result,
        Err(SurveyorError::InputTooLarge { limit: 16, .. })
    ));
}

#[test]
fn test_integration_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_csv_path(&dir.path().join("absent.csv"), &IngestConfig::default());
    assert!(matches!(result, Err(SurveyorError::Io { .. })));
}

#[test]
fn test_integration_header_only_file() {
    let file = write_csv("a,b\n");
    let result = read_csv_path(file.path(), &IngestConfig::default());
    assert!(matches!(result, Err(SurveyorError::EmptyInput { .. })));
}

// =============================================================================
// Profiling
// =============================================================================

#[test]
fn test_integration_profile_export() -> Result<()> {
    let file = write_csv(EXPORT);
    let dataset = read_csv_path(file.path(), &IngestConfig::default())?;

    let profile = Profiler::with_defaults().profile(&dataset, "title", "river");

    assert_eq!(profile.num_duplicates, 1);
    assert_eq!(
        profile.excluded_columns,
        vec!["CreatedAt", "DeletedAt", "Governorate"]
    );

    // Pages 2, Price 1, DeletedAt 4
    assert_eq!(profile.total_missing, 7);
    assert!((profile.missing_percentage - 25.0).abs() < 0.001);

    let included: Vec<&str> = profile.all_columns.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(included, vec!["BookNumber", "Title", "Pages", "Price"]);
    assert_eq!(profile.complete_columns, vec!["BookNumber", "Title"]);

    let breakdown: Vec<(&str, usize)> = profile
        .missing_breakdown
        .iter()
        .map(|m| (m.name.as_str(), m.missing_count))
        .collect();
    assert_eq!(
        breakdown,
        vec![("DeletedAt", 4), ("Pages", 2), ("Price", 1)]
    );

    assert_eq!(profile.filtered_columns.len(), 1);
    assert_eq!(profile.filtered_columns[0].name, "Title");

    assert_eq!(profile.word_total_occurrences, 2);
    assert_eq!(profile.word_results[0].name, "Title");
    assert!((profile.word_results[0].percentage - 50.0).abs() < 0.001);
    let rows: Vec<usize> = profile.word_examples.iter().map(|e| e.row_number).collect();
    assert_eq!(rows, vec![2, 4]);

    Ok(())
}

#[test]
fn test_integration_search_ignores_excluded_columns() -> Result<()> {
    let file = write_csv(EXPORT);
    let dataset = read_csv_path(file.path(), &IngestConfig::default())?;

    let default_profile = Profiler::with_defaults().profile(&dataset, "", "giza");
    assert_eq!(default_profile.word_total_occurrences, 0);

    let profiler = Profiler::new(ProfilerConfig::new().with_excluded_columns(ExcludedSet::empty()));
    let profile = profiler.profile(&dataset, "", "giza");
    assert_eq!(profile.word_total_occurrences, 2);
    assert_eq!(profile.word_results[0].name, "Governorate");
    assert_eq!(profile.all_columns.len(), 7);

    Ok(())
}

#[test]
fn test_integration_search_matches_rendered_values() -> Result<()> {
    let file = write_csv(EXPORT);
    let dataset = read_csv_path(file.path(), &IngestConfig::default())?;

    // Whole floats render with one decimal
    let profile = Profiler::with_defaults().profile(&dataset, "", "9.0");
    assert_eq!(profile.word_results[0].name, "Price");
    assert_eq!(profile.word_results[0].count, 2);

    // Missing cells render as nan
    let profile = Profiler::with_defaults().profile(&dataset, "", "NAN");
    let pages = profile
        .word_results
        .iter()
        .find(|r| r.name == "Pages")
        .unwrap();
    assert_eq!(pages.count, 2);

    // Integers with gaps render as floats too
    let profile = Profiler::with_defaults().profile(&dataset, "", "320.0");
    assert_eq!(profile.word_results.len(), 1);
    assert_eq!(profile.word_results[0].name, "Pages");
    assert_eq!(profile.word_examples[0].value, "320.0");

    Ok(())
}

#[test]
fn test_integration_profile_serializes() -> Result<()> {
    let file = write_csv(EXPORT);
    let dataset = read_csv_path(file.path(), &IngestConfig::default())?;
    let profile = Profiler::with_defaults().profile(&dataset, "", "cairo");

    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(json["num_rows"], 4);
    assert_eq!(json["dtypes"][0]["name"], "BookNumber");
    assert_eq!(json["dtypes"][0]["dtype"], "integer");
    assert_eq!(json["word_query"], "cairo");

    let back: tabsurveyor_core::Profile = serde_json::from_value(json).unwrap();
    assert_eq!(back, profile);

    Ok(())
}

// =============================================================================
// Session store
// =============================================================================

#[test]
fn test_integration_session_upload_flow() -> Result<()> {
    let store = DatasetStore::new();

    let first = write_csv(EXPORT);
    let session = store.insert(read_csv_path(first.path(), &IngestConfig::default())?);

    let second = write_csv("a\n1\n");
    let session = store.replace(
        Some(session),
        read_csv_path(second.path(), &IngestConfig::default())?,
    );

    assert_eq!(store.len(), 1);
    let dataset = store.get(session)?;
    let profile = Profiler::with_defaults().profile(&dataset, "", "");
    assert_eq!(profile.num_rows, 1);
    assert_eq!(profile.column_names, vec!["a"]);

    Ok(())
}
