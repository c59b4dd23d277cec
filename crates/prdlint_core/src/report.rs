//! Report aggregation: run rules, merge issues, score.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::parse;
use crate::rule::RuleSet;
use crate::{LintIssue, Severity};

/// Score deducted per issue, by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub error: u32,
    pub warning: u32,
    pub info: u32,
    pub suggestion: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            error: 15,
            warning: 7,
            info: 2,
            suggestion: 0,
        }
    }
}

impl ScoreWeights {
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Suggestion => self.suggestion,
        }
    }
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityStats {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    pub suggestion: usize,
}

impl SeverityStats {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a LintIssue>) -> Self {
        let mut stats = Self::default();
        for issue in issues {
            *stats.slot(issue.severity) += 1;
        }
        stats
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Suggestion => self.suggestion,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.info + self.suggestion
    }

    fn slot(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
            Severity::Suggestion => &mut self.suggestion,
        }
    }
}

/// Result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// 0-100, higher is better.
    pub score: u8,
    /// Sorted by severity, then start offset; spanless issues last per severity.
    pub issues: Vec<LintIssue>,
    pub stats: SeverityStats,
    pub passed_rule_ids: BTreeSet<String>,
    pub failed_rule_ids: BTreeSet<String>,
}

impl LintReport {
    /// Returns true if any issue has error severity.
    pub fn has_errors(&self) -> bool {
        self.stats.error > 0
    }

    /// Returns the issues that carry an auto-fix.
    pub fn fixable_issues(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|i| i.fix.is_some())
    }
}

/// Analyzes `raw` with every rule in `rules`, sequentially.
///
/// Never fails: degenerate input produces issues, not errors.
pub fn analyze(raw: &str, rules: &RuleSet, weights: &ScoreWeights) -> LintReport {
    analyze_with(raw, rules, weights, false)
}

/// Like [`analyze`], optionally running rules on the rayon pool.
///
/// The report is identical either way; issues are merged in registration
/// order, not completion order.
pub fn analyze_with(
    raw: &str,
    rules: &RuleSet,
    weights: &ScoreWeights,
    parallel: bool,
) -> LintReport {
    let prd = parse(raw);

    let per_rule: Vec<Vec<LintIssue>> = if parallel {
        rules.entries().par_iter().map(|entry| entry.run(&prd)).collect()
    } else {
        rules.entries().iter().map(|entry| entry.run(&prd)).collect()
    };

    let mut passed_rule_ids = BTreeSet::new();
    let mut failed_rule_ids = BTreeSet::new();
    for (entry, issues) in rules.entries().iter().zip(&per_rule) {
        let id = entry.meta().id.clone();
        if issues.iter().any(|i| i.severity.is_failing()) {
            failed_rule_ids.insert(id);
        } else {
            passed_rule_ids.insert(id);
        }
    }

    let mut issues: Vec<LintIssue> = per_rule.into_iter().flatten().collect();
    let stats = SeverityStats::from_issues(&issues);
    let score = compute_score(&issues, weights);

    // Stable: ties keep registration then emission order.
    issues.sort_by_key(|issue| {
        let offset = issue.start_offset();
        (issue.severity, offset.is_none(), offset)
    });

    debug!(
        score,
        issues = issues.len(),
        failed = failed_rule_ids.len(),
        "Analysis finished"
    );

    LintReport {
        score,
        issues,
        stats,
        passed_rule_ids,
        failed_rule_ids,
    }
}

/// 100 minus the summed weights, floored at 0.
fn compute_score(issues: &[LintIssue], weights: &ScoreWeights) -> u8 {
    let penalty: u64 = issues
        .iter()
        .map(|issue| u64::from(weights.weight(issue.severity)))
        .sum();
    // Bounded by 100, so the narrowing is lossless.
    100u64.saturating_sub(penalty) as u8
}
