//! Error types for dataset ingestion, session handling and reporting.
//!
//! Profiling itself is infallible for a well-formed [`Dataset`](crate::Dataset);
//! every variant here belongs to a boundary that runs before or after it.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for TabSurveyor operations.
#[derive(Debug, Error)]
pub enum SurveyorError {
    /// Input had no header or no data rows
    #[error("Input contains no data: {context}")]
    EmptyInput { context: String },

    /// Tabular input could not be parsed
    #[error("Failed to parse input: {context}")]
    Parse {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// A data row carries more fields than the header declares
    #[error("Row {row} has {found} fields but the header declares {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Input exceeds the configured byte budget
    #[error("Input is {size} bytes, larger than the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    /// File type is not accepted by the ingestion layer
    #[error("Unsupported file: {} (only .csv files are accepted)", path.display())]
    UnsupportedFile { path: PathBuf },

    /// Dataset shape or naming invariants do not hold
    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Report rendering failed
    #[error("Report rendering failed: {context}")]
    Render { context: String },

    /// No dataset is stored under the given session id
    #[error("No dataset stored for session {id}")]
    SessionNotFound { id: uuid::Uuid },
}

/// Convenience type alias for Results with SurveyorError
pub type Result<T> = std::result::Result<T, SurveyorError>;

impl SurveyorError {
    /// Creates an empty-input error
    pub fn empty_input(context: impl Into<String>) -> Self {
        Self::EmptyInput {
            context: context.into(),
        }
    }

    /// Creates a parse error with context
    pub fn parse_failed(context: impl Into<String>, error: csv::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source: error,
        }
    }

    /// Creates an invalid dataset error
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, error: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source: error,
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, error: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source: error,
        }
    }

    /// Creates a rendering error
    pub fn render(context: impl Into<String>) -> Self {
        Self::Render {
            context: context.into(),
        }
    }
}
