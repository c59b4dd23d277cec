//! Fix application logic

use std::path::PathBuf;

use prdlint_core::FileReport;
use tracing::error;

/// Summary of applied fixes.
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
    pub skipped: usize,
    pub errors: Vec<(PathBuf, String)>,
}

/// Applies the fixes of every report to its file.
///
/// With `dry_run` the fixes are resolved against the analyzed text but
/// nothing is written.
pub fn apply_fixes(results: &[FileReport], dry_run: bool) -> FixSummary {
    let mut summary = FixSummary {
        total_fixes: 0,
        files_fixed: 0,
        fixes_by_file: Vec::new(),
        skipped: 0,
        errors: Vec::new(),
    };

    for result in results {
        if result.report.fixable_issues().next().is_none() {
            continue;
        }

        let outcome = prdlint_core::apply_fixes(&result.content, &result.report.issues);
        summary.skipped += outcome.skipped;
        if !outcome.modified() {
            continue;
        }

        if !dry_run && let Err(e) = std::fs::write(&result.path, &outcome.output) {
            error!("Failed to fix {}: {}", result.path.display(), e);
            summary.errors.push((result.path.clone(), e.to_string()));
            continue;
        }

        summary
            .fixes_by_file
            .push((result.path.clone(), outcome.applied));
        summary.total_fixes += outcome.applied;
        summary.files_fixed += 1;
    }

    summary
}

/// Outputs the fix summary to stderr, keeping stdout for the report.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 && summary.errors.is_empty() {
        eprintln!("No fixable issues found.");
        return;
    }

    if summary.total_fixes > 0 {
        let action = if dry_run { "Would fix" } else { "Fixed" };

        eprintln!(
            "\n{} {} issues in {} files:",
            action, summary.total_fixes, summary.files_fixed
        );
        for (path, count) in &summary.fixes_by_file {
            eprintln!("  {}: {} fixes", path.display(), count);
        }
        if summary.skipped > 0 {
            eprintln!("  {} overlapping fixes skipped", summary.skipped);
        }

        if dry_run {
            eprintln!("\nRun without --dry-run to apply fixes.");
        }
    }

    if !summary.errors.is_empty() {
        eprintln!("\nFailed to fix {} file(s):", summary.errors.len());
        for (path, err) in &summary.errors {
            eprintln!("  {}: {}", path.display(), err);
        }
    }
}
