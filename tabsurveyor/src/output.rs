//! Report output.
//!
//! Reports go to stdout unless an output path is given.

use std::path::Path;

use tabsurveyor_core::{Result, SurveyorError};

/// Writes a rendered report to `output`, or to stdout when `None`.
pub async fn write_report(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => save_report(content, path).await,
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// Saves a report to a file, replacing any existing content.
pub async fn save_report(content: &str, output_path: &Path) -> Result<()> {
    tokio::fs::write(output_path, content)
        .await
        .map_err(|e| {
            SurveyorError::io(format!("Failed to write to {}", output_path.display()), e)
        })?;
    tracing::info!("Report saved to {}", output_path.display());
    Ok(())
}
