use prdlint_text::{is_word_bounded, locate_all};
use serde::Deserialize;

use super::to_strings;
use crate::document::{Facet, ParsedPrd};
use crate::rule::{Rule, RuleMeta};
use crate::{Category, LintIssue, Severity};

pub(crate) const FLOWS_COVER_FAILURES: &str = "flows-cover-failures";

const DEFAULT_FAILURE_TERMS: &[&str] = &[
    "error",
    "errors",
    "fail",
    "fails",
    "failed",
    "failure",
    "invalid",
    "timeout",
    "times out",
    "offline",
    "retry",
    "cancel",
    "cancelled",
    "denied",
    "unavailable",
    "not found",
    "expired",
    "rejected",
];

/// Options for `flows-cover-failures`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FailureCoverageOptions {
    /// Words that indicate an unhappy path (case-insensitive, whole words).
    pub failure_terms: Vec<String>,
}

impl Default for FailureCoverageOptions {
    fn default() -> Self {
        Self {
            failure_terms: to_strings(DEFAULT_FAILURE_TERMS),
        }
    }
}

/// Reports flows that only describe the happy path.
///
/// Fires when at least one flow exists and neither the flows nor the edge
/// cases mention any failure term. A document without flows is left to
/// `requires-flows`.
pub struct FlowsCoverFailures {
    meta: RuleMeta,
    options: FailureCoverageOptions,
}

impl FlowsCoverFailures {
    pub fn new(options: FailureCoverageOptions) -> Self {
        Self {
            meta: RuleMeta::new(
                FLOWS_COVER_FAILURES,
                "Flows cover failures",
                Category::Ux,
                Severity::Warning,
            )
            .with_description("User flows should describe what happens when a step fails"),
            options,
        }
    }

    fn mentions_failure(&self, text: &str) -> bool {
        self.options.failure_terms.iter().any(|term| {
            locate_all(text, term, true).any(|span| is_word_bounded(text, &span))
        })
    }
}

impl Rule for FlowsCoverFailures {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let flows = match &prd.flows {
            Some(flows) if !flows.is_empty() => flows,
            _ => return Vec::new(),
        };

        let covered = flows
            .iter()
            .chain(prd.edge_cases.iter().flatten())
            .any(|text| self.mentions_failure(text));
        if covered {
            return Vec::new();
        }

        let span = prd.section_for(Facet::Flows).map(|s| s.span.clone());
        vec![
            self.meta
                .issue("Flows describe only the happy path")
                .with_optional_span(span)
                .with_suggestion("Add steps for errors, timeouts or invalid input"),
        ]
    }
}
