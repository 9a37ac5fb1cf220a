//! Dataset profiling module.
//!
//! This module computes the profile of a dataset:
//! - **Shape**: row and column counts, exact duplicate rows
//! - **Completeness**: missing cells overall and per included column
//! - **Column filter**: case-insensitive name search over column statuses
//! - **Word search**: case-insensitive substring search over cell values
//!
//! Columns in the configured [`ExcludedSet`] are left out of completeness
//! status and word search but still count towards total missing cells and
//! the missing breakdown.
//!
//! # Example
//! ```rust,ignore
//! use tabsurveyor_core::profile::{Profiler, ProfilerConfig};
//!
//! let profiler = Profiler::new(ProfilerConfig::default());
//! let profile = profiler.profile(&dataset, "date", "cairo");
//! println!("{} rows, {:.2}% missing", profile.num_rows, profile.missing_percentage);
//! ```

mod completeness;
mod config;
mod models;
mod profiler;
mod search;
mod uniqueness;

// Re-export public API
pub use config::{
    ConfigValidationError, DEFAULT_EXCLUDED_COLUMNS, DEFAULT_MAX_EXAMPLE_CHARS,
    DEFAULT_MAX_EXAMPLES, DEFAULT_MAX_EXAMPLES_PER_COLUMN, ExcludedSet, ProfilerConfig,
};
pub use models::{
    ColumnDtype, ColumnStatus, MissingBreakdown, Profile, WordExample, WordResult, WordSearch,
};
pub use profiler::Profiler;
