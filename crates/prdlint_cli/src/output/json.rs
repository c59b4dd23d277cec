//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use prdlint_core::FileReport;

pub fn output_json(results: &[FileReport]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(results).into_diagnostic()?
    );
    Ok(())
}
