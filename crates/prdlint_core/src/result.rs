//! Per-file lint result.

use std::path::PathBuf;

use serde::Serialize;

use crate::LintReport;

/// Report for one file, plus the text it was computed from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path as discovered or given on the command line.
    pub path: PathBuf,
    /// The analyzed text, kept so fixes can be applied without re-reading.
    #[serde(skip)]
    pub content: String,
    #[serde(flatten)]
    pub report: LintReport,
}

impl FileReport {
    pub fn new(path: PathBuf, content: String, report: LintReport) -> Self {
        Self {
            path,
            content,
            report,
        }
    }

    /// Returns true if the report contains any error issue.
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}
