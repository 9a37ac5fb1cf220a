//! Profiler configuration.
//!
//! This module provides the excluded-column set and the limits that bound
//! word-search example output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bookkeeping columns excluded from completeness accounting by default.
pub const DEFAULT_EXCLUDED_COLUMNS: &[&str] = &[
    "CreatedAt",
    "ModifiedAt",
    "DeletedAt",
    "IsDeleted",
    "CreatedById",
    "ModifiedById",
    "DeletedById",
    "Governorate",
];

/// Default number of example rows kept per matching column.
pub const DEFAULT_MAX_EXAMPLES_PER_COLUMN: usize = 3;

/// Default number of example rows kept across all columns.
pub const DEFAULT_MAX_EXAMPLES: usize = 10;

/// Default character cap for a single example value.
pub const DEFAULT_MAX_EXAMPLE_CHARS: usize = 100;

/// Ordered set of column names left out of completeness accounting and
/// word search.
///
/// Names are matched exactly (case-sensitive). Insertion order is kept and
/// repeated names are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExcludedSet {
    names: Vec<String>,
}

impl ExcludedSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Returns true if `name` is excluded.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Adds a name if it is not already present.
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    /// Iterates names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no column is excluded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExcludedSet {
    fn default() -> Self {
        DEFAULT_EXCLUDED_COLUMNS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<Vec<String>> for ExcludedSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<ExcludedSet> for Vec<String> {
    fn from(set: ExcludedSet) -> Self {
        set.names
    }
}

/// Profiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Columns left out of completeness accounting and word search
    pub excluded_columns: ExcludedSet,
    /// Example rows kept per matching column
    pub max_examples_per_column: usize,
    /// Example rows kept across all columns
    pub max_examples: usize,
    /// Character cap for a single example value
    pub max_example_chars: usize,
}

/// Validation errors for profiler configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("max_example_chars must be at least 1, got {0}")]
    InvalidExampleChars(usize),
    #[error("excluded column names must not be blank")]
    BlankExcludedColumn,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            excluded_columns: ExcludedSet::default(),
            max_examples_per_column: DEFAULT_MAX_EXAMPLES_PER_COLUMN,
            max_examples: DEFAULT_MAX_EXAMPLES,
            max_example_chars: DEFAULT_MAX_EXAMPLE_CHARS,
        }
    }
}

impl ProfilerConfig {
    /// Creates a new profiler config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to replace the excluded-column set.
    pub fn with_excluded_columns(mut self, excluded: ExcludedSet) -> Self {
        self.excluded_columns = excluded;
        self
    }

    /// Builder method to exclude additional columns.
    pub fn with_additional_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.excluded_columns.insert(name);
        }
        self
    }

    /// Builder method to set the per-column example limit.
    pub fn with_max_examples_per_column(mut self, limit: usize) -> Self {
        self.max_examples_per_column = limit;
        self
    }

    /// Builder method to set the overall example limit.
    pub fn with_max_examples(mut self, limit: usize) -> Self {
        self.max_examples = limit;
        self
    }

    /// Builder method to set the example value length cap.
    pub fn with_max_example_chars(mut self, limit: usize) -> Self {
        if limit == 0 {
            tracing::warn!("max_example_chars 0 raised to the minimum of 1");
        }
        self.max_example_chars = limit.max(1);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_example_chars == 0 {
            return Err(ConfigValidationError::InvalidExampleChars(
                self.max_example_chars,
            ));
        }
        if self.excluded_columns.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigValidationError::BlankExcludedColumn);
        }
        Ok(())
    }
}
