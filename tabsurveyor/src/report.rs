//! Report rendering for dataset profiles.
//!
//! Three formats are supported: aligned plain text for terminals, markdown
//! rendered through an askama template, and pretty-printed JSON of the
//! [`Profile`] itself. Percentages are shown with two decimals.

use std::fmt::Write;

use askama::Template;
use clap::ValueEnum;
use tabsurveyor_core::{ColumnStatus, Dataset, Profile, Result, SurveyorError};

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Aligned plain text
    #[default]
    Text,
    /// Markdown tables
    Markdown,
    /// Pretty-printed JSON of the profile
    Json,
}

/// Leading rows of a dataset, stringified for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Column names in dataset order
    pub headers: Vec<String>,
    /// One display string per cell, row by row
    pub rows: Vec<Vec<String>>,
}

impl Preview {
    /// Captures up to `rows` leading rows of `dataset`.
    pub fn from_dataset(dataset: &Dataset, rows: usize) -> Self {
        Self {
            headers: dataset.column_names(),
            rows: dataset
                .head(rows)
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.to_display_string()).collect())
                .collect(),
        }
    }
}

/// Renders a profile in the requested format.
///
/// The preview is ignored for JSON output.
///
/// # Errors
/// Returns [`SurveyorError::Render`] if the template fails and
/// [`SurveyorError::Serialization`] if JSON encoding fails.
pub fn render_report(
    profile: &Profile,
    preview: Option<&Preview>,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Text => render_text(profile, preview),
        ReportFormat::Markdown => render_markdown(profile, preview),
        ReportFormat::Json => serde_json::to_string_pretty(profile)
            .map_err(|e| SurveyorError::serialization("Failed to encode profile as JSON", e)),
    }
}

fn pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Statuses shown in the column table: the filtered view when a column
/// query was given, otherwise every included column.
fn shown_statuses(profile: &Profile) -> (String, &[ColumnStatus]) {
    if profile.has_column_query() {
        (
            format!("Columns matching \"{}\"", profile.column_query),
            profile.filtered_columns.as_slice(),
        )
    } else {
        ("Column status".to_string(), profile.all_columns.as_slice())
    }
}

fn summary_rows(profile: &Profile) -> Vec<(&'static str, String)> {
    vec![
        ("Rows", profile.num_rows.to_string()),
        ("Columns", profile.num_columns.to_string()),
        ("Duplicate rows", profile.num_duplicates.to_string()),
        (
            "Missing cells",
            format!(
                "{} ({})",
                profile.total_missing,
                pct(profile.missing_percentage)
            ),
        ),
        ("Complete columns", profile.complete_columns_count.to_string()),
    ]
}

// ----------------------------------------------------------------------------
// Text
// ----------------------------------------------------------------------------

fn render_text(profile: &Profile, preview: Option<&Preview>) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, profile, preview)
        .map_err(|e| SurveyorError::render(format!("Failed to format text report: {}", e)))?;
    Ok(out)
}

fn write_text(out: &mut String, profile: &Profile, preview: Option<&Preview>) -> std::fmt::Result {
    writeln!(out, "Dataset summary")?;
    for (label, value) in summary_rows(profile) {
        writeln!(out, "  {:<18}{}", format!("{}:", label), value)?;
    }
    if !profile.excluded_columns.is_empty() {
        writeln!(
            out,
            "  Excluded columns: {}",
            profile.excluded_columns.join(", ")
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Complete columns")?;
    if profile.complete_columns.is_empty() {
        writeln!(out, "  none")?;
    }
    for name in &profile.complete_columns {
        writeln!(out, "  {}", name)?;
    }

    let (heading, statuses) = shown_statuses(profile);
    writeln!(out)?;
    writeln!(out, "{}", heading)?;
    if statuses.is_empty() {
        writeln!(out, "  none")?;
    } else {
        let width = name_width(statuses.iter().map(|s| s.name.as_str()));
        writeln!(
            out,
            "  {:<width$}  {:<8}  {:>8}  {:>8}  {:>10}",
            "Column", "Type", "Complete", "Missing", "Completion"
        )?;
        for status in statuses {
            writeln!(
                out,
                "  {:<width$}  {:<8}  {:>8}  {:>8}  {:>10}",
                status.name,
                status.dtype.label(),
                status.complete_count,
                status.missing_count,
                pct(status.completion_rate)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Missing values")?;
    if profile.missing_breakdown.is_empty() {
        writeln!(out, "  none")?;
    } else {
        let width = name_width(profile.missing_breakdown.iter().map(|m| m.name.as_str()));
        for entry in &profile.missing_breakdown {
            writeln!(
                out,
                "  {:<width$}  {:>8}  {:>8}",
                entry.name,
                entry.missing_count,
                pct(entry.percentage)
            )?;
        }
    }

    if profile.has_word_query() {
        writeln!(out)?;
        writeln!(
            out,
            "Word search \"{}\": {} occurrences",
            profile.word_query, profile.word_total_occurrences
        )?;
        if profile.word_results.is_empty() {
            writeln!(out, "  no matches")?;
        } else {
            let width = name_width(profile.word_results.iter().map(|r| r.name.as_str()));
            for result in &profile.word_results {
                writeln!(
                    out,
                    "  {:<width$}  {:>8}  {:>8}",
                    result.name,
                    result.count,
                    pct(result.percentage)
                )?;
            }
            writeln!(out, "Examples")?;
            for example in &profile.word_examples {
                writeln!(
                    out,
                    "  {} row {}: {}",
                    example.name, example.row_number, example.value
                )?;
            }
        }
    }

    if let Some(preview) = preview
        && !preview.rows.is_empty()
    {
        writeln!(out)?;
        writeln!(out, "Preview (first {} rows)", preview.rows.len())?;
        writeln!(out, "  {}", preview.headers.join(" | "))?;
        for row in &preview.rows {
            writeln!(out, "  {}", row.join(" | "))?;
        }
    }

    Ok(())
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Column".len())
}

// ----------------------------------------------------------------------------
// Markdown
// ----------------------------------------------------------------------------

struct SummaryRow {
    label: &'static str,
    value: String,
}

struct StatusRow {
    name: String,
    dtype: &'static str,
    complete: usize,
    missing: usize,
    rate: String,
}

struct CountRow {
    name: String,
    count: usize,
    percentage: String,
}

struct ExampleRow {
    name: String,
    row_number: usize,
    value: String,
}

#[derive(Template)]
#[template(path = "report.md")]
struct MarkdownReport {
    summary: Vec<SummaryRow>,
    excluded_columns: String,
    complete_columns: Vec<String>,
    status_heading: String,
    statuses: Vec<StatusRow>,
    missing: Vec<CountRow>,
    has_word_query: bool,
    word_query: String,
    word_total: usize,
    word_results: Vec<CountRow>,
    examples: Vec<ExampleRow>,
    preview_header: String,
    preview_rule: String,
    preview_rows: Vec<String>,
}

/// Escapes text for use inside a markdown table cell.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn md_row<'a>(cells: impl Iterator<Item = &'a String>) -> String {
    let cells: Vec<String> = cells.map(|c| md_cell(c)).collect();
    format!("| {} |", cells.join(" | "))
}

fn render_markdown(profile: &Profile, preview: Option<&Preview>) -> Result<String> {
    let (status_heading, statuses) = shown_statuses(profile);
    let preview = preview.filter(|p| !p.rows.is_empty());

    let report = MarkdownReport {
        summary: summary_rows(profile)
            .into_iter()
            .map(|(label, value)| SummaryRow { label, value })
            .collect(),
        excluded_columns: profile
            .excluded_columns
            .iter()
            .map(|name| md_cell(name))
            .collect::<Vec<_>>()
            .join(", "),
        complete_columns: profile
            .complete_columns
            .iter()
            .map(|name| md_cell(name))
            .collect(),
        status_heading,
        statuses: statuses
            .iter()
            .map(|status| StatusRow {
                name: md_cell(&status.name),
                dtype: status.dtype.label(),
                complete: status.complete_count,
                missing: status.missing_count,
                rate: pct(status.completion_rate),
            })
            .collect(),
        missing: profile
            .missing_breakdown
            .iter()
            .map(|entry| CountRow {
                name: md_cell(&entry.name),
                count: entry.missing_count,
                percentage: pct(entry.percentage),
            })
            .collect(),
        has_word_query: profile.has_word_query(),
        word_query: profile.word_query.replace('`', "'"),
        word_total: profile.word_total_occurrences,
        word_results: profile
            .word_results
            .iter()
            .map(|result| CountRow {
                name: md_cell(&result.name),
                count: result.count,
                percentage: pct(result.percentage),
            })
            .collect(),
        examples: profile
            .word_examples
            .iter()
            .map(|example| ExampleRow {
                name: md_cell(&example.name),
                row_number: example.row_number,
                value: md_cell(&example.value),
            })
            .collect(),
        preview_header: preview.map_or_else(String::new, |p| md_row(p.headers.iter())),
        preview_rule: preview.map_or_else(String::new, |p| {
            format!("|{}", "---|".repeat(p.headers.len()))
        }),
        preview_rows: preview.map_or_else(Vec::new, |p| {
            p.rows.iter().map(|row| md_row(row.iter())).collect()
        }),
    };

    report
        .render()
        .map_err(|e| SurveyorError::render(format!("Failed to render markdown report: {}", e)))
}
