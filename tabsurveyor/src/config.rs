//! Configuration loading for the tabsurveyor binary.
//!
//! A JSON file supplies the base configuration; command-line flags are
//! applied on top of it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tabsurveyor_core::{
    ExcludedSet, IngestConfig, ProfilerConfig, Result, SurveyorError,
};

/// Default number of leading rows shown in a report preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Combined configuration for one tabsurveyor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyorConfig {
    /// Profiling options
    pub profiler: ProfilerConfig,
    /// CSV ingestion options
    pub ingest: IngestConfig,
    /// Rows shown in the report preview (0 disables it)
    pub preview_rows: usize,
}

impl Default for SurveyorConfig {
    fn default() -> Self {
        Self {
            profiler: ProfilerConfig::default(),
            ingest: IngestConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Flag values that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Additional columns to exclude
    pub exclude: Vec<String>,
    /// Start from an empty excluded set instead of the configured one
    pub no_default_excludes: bool,
    /// Overall word-search example cap
    pub max_examples: Option<usize>,
    /// Per-column word-search example cap
    pub max_examples_per_column: Option<usize>,
    /// Field delimiter; must be a single ASCII character
    pub delimiter: Option<char>,
    /// Preview row count (0 disables the preview)
    pub preview_rows: Option<usize>,
}

impl SurveyorConfig {
    /// Loads the configuration from an optional JSON file.
    ///
    /// Without a path the defaults are returned. Missing keys in the file
    /// fall back to their defaults.
    ///
    /// # Errors
    /// Fails if the file cannot be read, is not valid JSON or does not pass
    /// validation.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            SurveyorError::io(format!("Failed to read config {}", path.display()), e)
        })?;
        let config = Self::from_json(&contents).map_err(|e| match e {
            SurveyorError::Serialization { source, .. } => SurveyorError::serialization(
                format!("Failed to parse config {}", path.display()),
                source,
            ),
            other => other,
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| SurveyorError::serialization("Failed to parse config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    /// Fails if the delimiter is not a single-byte ASCII character or the
    /// result does not pass validation.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if overrides.no_default_excludes {
            self.profiler.excluded_columns = ExcludedSet::empty();
        }
        self.profiler = self.profiler.with_additional_excluded(
            overrides
                .exclude
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty()),
        );

        if let Some(limit) = overrides.max_examples {
            self.profiler = self.profiler.with_max_examples(limit);
        }
        if let Some(limit) = overrides.max_examples_per_column {
            self.profiler = self.profiler.with_max_examples_per_column(limit);
        }
        if let Some(delimiter) = overrides.delimiter {
            let byte = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| {
                    SurveyorError::configuration(format!(
                        "Delimiter must be a single ASCII character, got '{}'",
                        delimiter
                    ))
                })?;
            self.ingest = self.ingest.with_delimiter(byte);
        }
        if let Some(rows) = overrides.preview_rows {
            self.preview_rows = rows;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validates the combined configuration.
    pub fn validate(&self) -> Result<()> {
        self.profiler
            .validate()
            .map_err(|e| SurveyorError::configuration(e.to_string()))?;

        if matches!(self.ingest.delimiter, b'"' | b'\n' | b'\r') {
            return Err(SurveyorError::configuration(format!(
                "Delimiter {:?} cannot be used",
                char::from(self.ingest.delimiter)
            )));
        }
        if self.ingest.max_bytes == 0 {
            return Err(SurveyorError::configuration(
                "ingest.max_bytes must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsurveyor_core::ingest::DEFAULT_MAX_BYTES;

    #[test]
    fn test_default_config() {
        let config = SurveyorConfig::default();
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.ingest.max_bytes, DEFAULT_MAX_BYTES);
        assert_eq!(config.profiler.excluded_columns.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SurveyorConfig::from_json(
            r#"{"profiler": {"excluded_columns": ["Audit"], "max_examples": 4}, "preview_rows": 0}"#,
        )
        .unwrap();

        assert_eq!(config.profiler.excluded_columns.iter().collect::<Vec<_>>(), vec!["Audit"]);
        assert_eq!(config.profiler.max_examples, 4);
        assert_eq!(config.profiler.max_examples_per_column, 3);
        assert_eq!(config.preview_rows, 0);
        assert_eq!(config.ingest.delimiter, b',');
    }

    #[test]
    fn test_invalid_json() {
        let result = SurveyorConfig::from_json("{not json");
        assert!(matches!(result, Err(SurveyorError::Serialization { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = SurveyorConfig::from_json(r#"{"profiler": {"max_example_chars": 0}}"#);
        assert!(matches!(result, Err(SurveyorError::Configuration { .. })));

        let result = SurveyorConfig::from_json(r#"{"ingest": {"max_bytes": 0}}"#);
        assert!(matches!(result, Err(SurveyorError::Configuration { .. })));
    }

    #[test]
    fn test_overrides() {
        let overrides = ConfigOverrides {
            exclude: vec!["Notes".to_string(), " ".to_string()],
            max_examples: Some(2),
            max_examples_per_column: Some(1),
            delimiter: Some(';'),
            preview_rows: Some(3),
            ..ConfigOverrides::default()
        };

        let config = SurveyorConfig::default().with_overrides(&overrides).unwrap();

        assert_eq!(config.profiler.excluded_columns.len(), 9);
        assert!(config.profiler.excluded_columns.contains("Notes"));
        assert!(config.profiler.excluded_columns.contains("Governorate"));
        assert_eq!(config.profiler.max_examples, 2);
        assert_eq!(config.profiler.max_examples_per_column, 1);
        assert_eq!(config.ingest.delimiter, b';');
        assert_eq!(config.preview_rows, 3);
    }

    #[test]
    fn test_no_default_excludes() {
        let overrides = ConfigOverrides {
            exclude: vec!["Notes".to_string()],
            no_default_excludes: true,
            ..ConfigOverrides::default()
        };

        let config = SurveyorConfig::default().with_overrides(&overrides).unwrap();

        assert_eq!(config.profiler.excluded_columns.iter().collect::<Vec<_>>(), vec!["Notes"]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let overrides = ConfigOverrides {
            delimiter: Some('§'),
            ..ConfigOverrides::default()
        };
        let result = SurveyorConfig::default().with_overrides(&overrides);
        assert!(matches!(result, Err(SurveyorError::Configuration { .. })));

        let overrides = ConfigOverrides {
            delimiter: Some('"'),
            ..ConfigOverrides::default()
        };
        assert!(SurveyorConfig::default().with_overrides(&overrides).is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabsurveyor.json");
        tokio::fs::write(&path, r#"{"preview_rows": 5}"#).await.unwrap();

        let config = SurveyorConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.preview_rows, 5);

        let defaults = SurveyorConfig::load(None).await.unwrap();
        assert_eq!(defaults.preview_rows, DEFAULT_PREVIEW_ROWS);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SurveyorConfig::load(Some(&dir.path().join("absent.json"))).await;
        assert!(matches!(result, Err(SurveyorError::Io { .. })));
    }
}
