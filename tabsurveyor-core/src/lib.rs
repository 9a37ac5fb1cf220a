//! Core data structures and profiling engine for TabSurveyor.
//!
//! This crate provides the dataset model, CSV ingestion, the profiling
//! engine and the session store shared by the `tabsurveyor` binary and any
//! other front end.
//!
//! # Guarantees
//! - Profiling never mutates the dataset and never fails on a well-formed one
//! - Output ordering is deterministic: descending counts, ties in column order
//! - All fallible boundaries return [`Result`] with a typed [`SurveyorError`]
//!
//! # Architecture
//! - `ingest` turns CSV bytes into a validated [`Dataset`]
//! - `profile` computes a [`Profile`] from a borrowed dataset
//! - `store` keeps one dataset handle per session

pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod profile;
pub mod store;

// Re-export commonly used types
pub use error::{Result, SurveyorError};
pub use ingest::{IngestConfig, read_csv_bytes, read_csv_path, read_csv_reader};
pub use logging::{LogFormat, init_logging};
pub use models::{CellValue, Column, ColumnType, Dataset, NULL_DISPLAY};
pub use profile::{
    ColumnDtype, ColumnStatus, ConfigValidationError, ExcludedSet, MissingBreakdown, Profile,
    Profiler, ProfilerConfig, WordExample, WordResult,
};
pub use store::{DatasetStore, SessionId};
