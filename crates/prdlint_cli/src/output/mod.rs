//! Output formatting module

mod json;
mod text;

use miette::Result;
use prdlint_core::FileReport;

use crate::cli::OutputFormat;

/// Prints the reports and returns true if any of them contains an error.
pub fn output_results(results: &[FileReport], format: OutputFormat) -> Result<bool> {
    let has_errors = results.iter().any(|r| r.has_errors());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_errors)
}
