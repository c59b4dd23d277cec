//! Technical hygiene: leftover placeholders and mixed modal strength.

use prdlint_text::{TextSpan, contains_word, is_word_bounded, locate_all};
use serde::Deserialize;

use super::{find_terms, to_strings};
use crate::document::ParsedPrd;
use crate::rule::{Rule, RuleMeta};
use crate::{Category, Fix, LintIssue, Severity};

pub(crate) const NO_PLACEHOLDERS: &str = "no-placeholders";
pub(crate) const CONSISTENT_BOUNDARY_MODALS: &str = "consistent-boundary-modals";

const DEFAULT_PLACEHOLDERS: &[&str] = &[
    "TBD",
    "TBA",
    "TODO",
    "FIXME",
    "XXX",
    "???",
    "Lorem ipsum",
    "lorem ipsum",
];

/// Options for `no-placeholders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PlaceholderOptions {
    pub terms: Vec<String>,
    /// When false, `todo` in prose is flagged as well.
    pub case_sensitive: bool,
}

impl Default for PlaceholderOptions {
    fn default() -> Self {
        Self {
            terms: to_strings(DEFAULT_PLACEHOLDERS),
            case_sensitive: true,
        }
    }
}

/// Flags unfinished text such as `TBD` or lorem ipsum filler.
pub struct NoPlaceholders {
    meta: RuleMeta,
    options: PlaceholderOptions,
}

impl NoPlaceholders {
    pub fn new(options: PlaceholderOptions) -> Self {
        Self {
            meta: RuleMeta::new(
                NO_PLACEHOLDERS,
                "No placeholders",
                Category::Technical,
                Severity::Error,
            )
            .with_description("Placeholder text like TBD or TODO must be resolved"),
            options,
        }
    }
}

impl Rule for NoPlaceholders {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        find_terms(prd, &self.options.terms, !self.options.case_sensitive)
            .into_iter()
            .map(|(_, span)| {
                self.meta
                    .issue(format!(
                        "Placeholder \"{}\" must be replaced before review",
                        span.matched_text
                    ))
                    .with_suggestion("Replace the placeholder with the actual requirement")
                    .with_span(span)
            })
            .collect()
    }
}

/// Flags hard boundaries phrased with "should", offering "must" as a fix.
pub struct ConsistentBoundaryModals {
    meta: RuleMeta,
}

impl ConsistentBoundaryModals {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta::new(
                CONSISTENT_BOUNDARY_MODALS,
                "Consistent boundary modals",
                Category::Technical,
                Severity::Warning,
            )
            .with_description("Hard constraints should use \"must\" rather than \"should\""),
        }
    }
}

impl Default for ConsistentBoundaryModals {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ConsistentBoundaryModals {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        for (item, item_span) in prd.located_hard_boundaries() {
            if !contains_word(item, "should") {
                continue;
            }

            let spans = item_span
                .map(|item_span| should_spans(prd.content(), item_span))
                .unwrap_or_default();

            if spans.is_empty() {
                issues.push(self.issue_for(None));
                continue;
            }
            issues.extend(spans.into_iter().map(|span| self.issue_for(Some(span))));
        }
        issues
    }
}

impl ConsistentBoundaryModals {
    fn issue_for(&self, span: Option<TextSpan>) -> LintIssue {
        let issue = self
            .meta
            .issue("Hard boundary uses \"should\", which reads as optional")
            .with_suggestion("Use \"must\" for non-negotiable constraints");
        match span {
            Some(span) => {
                let fix = Fix::replace(&span, must_like(&span.matched_text));
                issue.with_span(span).with_fix(fix)
            }
            None => issue,
        }
    }
}

/// Finds word-bounded "should" inside the item located at `item`.
fn should_spans(content: &str, item: &TextSpan) -> Vec<TextSpan> {
    let base = item.byte_range(content);
    let text = &content[base.clone()];
    locate_all(text, "should", true)
        .filter(|local| is_word_bounded(text, local))
        .map(|local| {
            let local = local.byte_range(text);
            TextSpan::from_range(content, base.start + local.start, base.start + local.end)
        })
        .collect()
}

/// Returns "must" in the capitalisation of `should`.
fn must_like(should: &str) -> &'static str {
    let mut chars = should.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => "MUST",
        (Some(first), _) if first.is_uppercase() => "Must",
        _ => "must",
    }
}
