//! Column-name filtering and free-text search.
//!
//! Both searches are case-insensitive literal substring matches: no regex,
//! no word boundaries.

use crate::models::Dataset;

use super::config::{ExcludedSet, ProfilerConfig};
use super::models::{ColumnStatus, WordExample, WordResult, WordSearch};

const ELLIPSIS: char = '…';

/// Returns the statuses whose name contains `query`, ignoring case.
///
/// An empty query yields an empty list: no query means no filtered view,
/// which is different from a query that matches every column.
pub(crate) fn filter_columns(statuses: &[ColumnStatus], query: &str) -> Vec<ColumnStatus> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    statuses
        .iter()
        .filter(|status| status.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Searches every included column for cells containing `query`.
///
/// Counts cover every matching cell. Examples are collected per column in
/// row order, concatenated in column order and capped by the config limits;
/// the caps never change the counts.
pub(crate) fn search_word(
    dataset: &Dataset,
    excluded: &ExcludedSet,
    query: &str,
    config: &ProfilerConfig,
) -> WordSearch {
    if query.is_empty() {
        return WordSearch::default();
    }

    let needle = query.to_lowercase();
    let num_rows = dataset.num_rows();
    let mut search = WordSearch::default();

    for column in dataset
        .columns()
        .iter()
        .filter(|column| !excluded.contains(&column.name))
    {
        let mut count: usize = 0;
        let mut column_examples: usize = 0;

        for (index, value) in column.values.iter().enumerate() {
            let text = value.to_display_string();
            if !contains_ignore_case(&text, &needle) {
                continue;
            }
            count += 1;

            if column_examples < config.max_examples_per_column
                && search.examples.len() < config.max_examples
            {
                search.examples.push(WordExample {
                    name: column.name.clone(),
                    row_number: index + 1,
                    value: truncate_chars(text, config.max_example_chars),
                });
                column_examples += 1;
            }
        }

        if count > 0 {
            search.total_occurrences += count;
            search
                .results
                .push(WordResult::new(&column.name, count, num_rows));
        }
    }

    // Stable sort: ties keep column order
    search.results.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(
        "Word search matched {} cells in {} columns",
        search.total_occurrences,
        search.results.len()
    );

    search
}

/// Returns true if `text` contains the already-lowercased `needle`.
///
/// ASCII text is compared in place; anything else is lowercased first.
fn contains_ignore_case(text: &str, needle: &str) -> bool {
    if text.is_ascii() && needle.is_ascii() {
        let (text, needle) = (text.as_bytes(), needle.as_bytes());
        needle.is_empty()
            || text
                .windows(needle.len())
                .any(|window| window.eq_ignore_ascii_case(needle))
    } else {
        text.to_lowercase().contains(needle)
    }
}

/// Caps `text` at `max_chars` characters, marking a cut with an ellipsis.
fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = text[..byte_index].to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => text,
    }
}
