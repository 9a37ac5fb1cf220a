//! CSV ingestion with per-column type inference.
//!
//! This is the boundary that turns raw delimited text into a validated
//! [`Dataset`]. Everything the profiler assumes (rectangular shape, unique
//! column names, at least one data row) is established here, and malformed
//! input is rejected before a dataset exists.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SurveyorError};
use crate::models::{CellValue, Column, ColumnType, Dataset};

/// Default upload limit (50 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Tokens read as missing values by default.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["true", "True", "TRUE"];
const FALSE_VALUES: &[&str] = &["false", "False", "FALSE"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// CSV ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Exact (case-sensitive) field values treated as missing
    pub null_values: Vec<String>,
    /// Maximum accepted input size in bytes
    pub max_bytes: u64,
    /// Trim surrounding whitespace from headers and fields
    pub trim_whitespace: bool,
    /// Reject files whose extension is not `.csv`
    pub require_csv_extension: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| (*s).to_string()).collect(),
            max_bytes: DEFAULT_MAX_BYTES,
            trim_whitespace: false,
            require_csv_extension: true,
        }
    }
}

impl IngestConfig {
    /// Creates a new ingest config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method to replace the missing-value tokens.
    pub fn with_null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the byte limit.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Builder method to enable whitespace trimming.
    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    /// Builder method to toggle the `.csv` extension check.
    pub fn with_require_csv_extension(mut self, require: bool) -> Self {
        self.require_csv_extension = require;
        self
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_bytes {
            return Err(SurveyorError::InputTooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Reads a CSV file into a dataset.
///
/// # Errors
/// Fails if the extension check is enabled and the file is not `.csv`, if
/// the file exceeds the byte limit, cannot be read, or does not parse.
pub fn read_csv_path(path: &Path, config: &IngestConfig) -> Result<Dataset> {
    if config.require_csv_extension && !has_csv_extension(path) {
        return Err(SurveyorError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| SurveyorError::io(format!("Failed to stat {}", path.display()), e))?;
    config.check_size(metadata.len())?;

    let bytes = std::fs::read(path)
        .map_err(|e| SurveyorError::io(format!("Failed to read {}", path.display()), e))?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    read_csv_bytes(&bytes, config)
}

/// Parses in-memory CSV content into a dataset.
///
/// # Errors
/// Fails if the content exceeds the byte limit or does not parse.
pub fn read_csv_bytes(bytes: &[u8], config: &IngestConfig) -> Result<Dataset> {
    config.check_size(bytes.len() as u64)?;
    read_csv_reader(bytes, config)
}

/// Parses CSV from any reader into a dataset.
///
/// The byte limit is not enforced here since the reader length is unknown;
/// callers holding a path or buffer should use [`read_csv_path`] or
/// [`read_csv_bytes`].
///
/// # Errors
/// Returns [`SurveyorError::EmptyInput`] when there is no header or no data
/// row, [`SurveyorError::RaggedRow`] when a row is wider than the header and
/// [`SurveyorError::Parse`] for malformed CSV.
pub fn read_csv_reader<R: Read>(reader: R, config: &IngestConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(if config.trim_whitespace {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SurveyorError::parse_failed("Failed to read CSV header", e))?
        .clone();

    if headers.is_empty() {
        return Err(SurveyorError::empty_input("no header row"));
    }

    let names = normalize_headers(headers.iter());
    let width = names.len();
    let null_values: HashSet<&str> = config.null_values.iter().map(String::as_str).collect();

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut num_rows: usize = 0;

    for result in reader.records() {
        let record = result.map_err(|e| {
            SurveyorError::parse_failed(format!("Failed to read CSV row {}", num_rows + 1), e)
        })?;
        num_rows += 1;

        if record.len() > width {
            return Err(SurveyorError::RaggedRow {
                row: num_rows,
                expected: width,
                found: record.len(),
            });
        }

        for (index, column) in raw_columns.iter_mut().enumerate() {
            // Short rows are padded with missing values
            let cell = record
                .get(index)
                .filter(|field| !null_values.contains(field))
                .map(str::to_string);
            column.push(cell);
        }
    }

    if num_rows == 0 {
        return Err(SurveyorError::empty_input("header row but no data rows"));
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| convert_column(name, raw))
        .collect();

    debug!(
        "Parsed CSV with {} rows and {} columns",
        num_rows,
        columns.len()
    );

    Dataset::new(columns)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Makes header names usable as unique column names.
///
/// Blank names become `Unnamed: {index}`; repeated names get a `.1`, `.2`,
/// ... suffix in order of appearance.
fn normalize_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = headers
        .enumerate()
        .map(|(index, name)| {
            if name.trim().is_empty() {
                format!("Unnamed: {}", index)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for name in raw {
        let mut candidate = name.clone();
        while used.contains(&candidate) {
            let suffix = suffixes.entry(name.clone()).or_insert(0);
            *suffix += 1;
            candidate = format!("{}.{}", name, suffix);
        }
        if candidate != name {
            debug!("Renamed duplicate header '{}' to '{}'", name, candidate);
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

/// Converts a column of raw fields into typed cells.
///
/// The first type every present field parses as wins, in the order
/// boolean, integer, float, date, datetime, text. An integer column with
/// gaps is read as float, since integers have no missing marker.
fn convert_column(name: String, raw: Vec<Option<String>>) -> Column {
    let present = || raw.iter().flatten().map(String::as_str);

    if present().next().is_none() {
        let values = vec![CellValue::Null; raw.len()];
        return Column::with_type(name, ColumnType::Float, values);
    }

    if present().all(|s| parse_bool(s).is_some()) {
        return typed_column(name, ColumnType::Boolean, &raw, |s| {
            parse_bool(s).map(CellValue::Boolean)
        });
    }
    if present().all(|s| s.parse::<i64>().is_ok()) {
        if raw.iter().any(Option::is_none) {
            return typed_column(name, ColumnType::Float, &raw, |s| {
                s.parse().ok().map(CellValue::Float)
            });
        }
        return typed_column(name, ColumnType::Integer, &raw, |s| {
            s.parse().ok().map(CellValue::Integer)
        });
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return typed_column(name, ColumnType::Float, &raw, |s| {
            s.parse().ok().map(CellValue::Float)
        });
    }
    if present().all(|s| parse_date(s).is_some()) {
        return typed_column(name, ColumnType::DateTime, &raw, |s| {
            parse_date(s).map(CellValue::Date)
        });
    }
    if present().all(|s| parse_date(s).is_some() || parse_datetime(s).is_some()) {
        return typed_column(name, ColumnType::DateTime, &raw, |s| {
            parse_datetime(s)
                .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
                .map(CellValue::DateTime)
        });
    }

    let values = raw
        .into_iter()
        .map(|cell| cell.map_or(CellValue::Null, CellValue::Text))
        .collect();
    Column::with_type(name, ColumnType::Text, values)
}

fn typed_column(
    name: String,
    column_type: ColumnType,
    raw: &[Option<String>],
    convert: impl Fn(&str) -> Option<CellValue>,
) -> Column {
    let values = raw
        .iter()
        .map(|cell| {
            cell.as_deref()
                .and_then(|s| convert(s))
                .unwrap_or(CellValue::Null)
        })
        .collect();
    Column::with_type(name, column_type, values)
}

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_VALUES.contains(&s) {
        Some(true)
    } else if FALSE_VALUES.contains(&s) {
        Some(false)
    } else {
        None
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}
