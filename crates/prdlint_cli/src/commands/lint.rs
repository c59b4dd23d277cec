//! Lint command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use prdlint_core::{Category, FileReport, Linter, LinterConfig, LinterError};
use tracing::info;

use crate::cli::{Cli, LintArgs};
use crate::fix::{apply_fixes, output_fix_summary};
use crate::output::output_results;

pub fn run_lint(cli: &Cli, args: &LintArgs) -> Result<bool> {
    let mut config = load_config(cli.config.as_deref())?;
    config
        .disabled_categories
        .extend(args.disabled_categories.iter().map(Category::to_string));

    let linter = Linter::new(config).into_diagnostic()?;

    let (mut results, mut failures) = linter.lint_patterns(&args.patterns).into_diagnostic()?;

    if args.fix {
        let summary = apply_fixes(&results, args.dry_run);
        output_fix_summary(&summary, args.dry_run);

        if !args.dry_run && !summary.fixes_by_file.is_empty() {
            results = relint(&linter, &results, &mut failures);
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_errors = output_results(&results, args.format)?;

    let below_min_score = args.min_score.is_some_and(|min| {
        results
            .iter()
            .filter(|r| r.report.score < min)
            .inspect(|r| {
                info!(
                    "{} scored {}, below the minimum of {}",
                    r.path.display(),
                    r.report.score,
                    min
                )
            })
            .count()
            > 0
    });

    Ok(has_errors || below_min_score || !failures.is_empty())
}

/// Lints the files behind `results` again so the report describes what is
/// now on disk. Files that can no longer be read join `failures`.
fn relint(
    linter: &Linter,
    results: &[FileReport],
    failures: &mut Vec<(PathBuf, LinterError)>,
) -> Vec<FileReport> {
    let paths: Vec<PathBuf> = results.iter().map(|r| r.path.clone()).collect();
    let (relinted, lost) = linter.lint_files(&paths);
    failures.extend(lost);
    relinted
}

/// Loads the configuration given on the command line, else the nearest
/// `.prdlint.json`, else the defaults.
pub fn load_config(path: Option<&Path>) -> Result<LinterConfig> {
    if let Some(path) = path {
        return LinterConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
