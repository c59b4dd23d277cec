//! Text output formatter

use prdlint_core::{FileReport, LintIssue, Severity};

pub fn output_text(results: &[FileReport]) {
    for result in results {
        println!("\n{} (score {}):", result.path.display(), result.report.score);
        for issue in &result.report.issues {
            println!("  {}", format_issue(issue));
            if let Some(suggestions) = &issue.suggestions {
                println!("      try: {}", suggestions.join(", "));
            }
        }
    }

    println!();
    println!("{}", summary(results));
}

fn summary(results: &[FileReport]) -> String {
    let total_issues: usize = results.iter().map(|r| r.report.stats.total()).sum();
    let mut line = format!("Checked {} files, found {} issues", results.len(), total_issues);

    let breakdown: Vec<String> = Severity::ALL
        .iter()
        .filter_map(|&severity| {
            let count: usize = results.iter().map(|r| r.report.stats.count(severity)).sum();
            (count > 0).then(|| format!("{} {}", count, severity))
        })
        .collect();
    if !breakdown.is_empty() {
        line.push_str(&format!(" ({})", breakdown.join(", ")));
    }
    line
}

fn format_issue(issue: &LintIssue) -> String {
    let location = issue
        .span
        .as_ref()
        .map(|span| format!("{}:{}", span.line, span.column))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} {} [{}]: {}",
        location, issue.severity, issue.rule_id, issue.message
    )
}
