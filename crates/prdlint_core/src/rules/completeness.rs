//! Presence checks for the PRD facets.

use crate::document::{Facet, ParsedPrd};
use crate::rule::{Rule, RuleMeta};
use crate::{Category, LintIssue, Severity};

pub(crate) const REQUIRES_USER_STORIES: &str = "requires-user-stories";
pub(crate) const REQUIRES_BOUNDARIES: &str = "requires-boundaries";
pub(crate) const REQUIRES_HARD_BOUNDARIES: &str = "requires-hard-boundaries";
pub(crate) const REQUIRES_FLOWS: &str = "requires-flows";
pub(crate) const REQUIRES_EDGE_CASES: &str = "requires-edge-cases";

/// Reports a facet that is missing or has no entries.
///
/// A missing section is reported with the rule's default severity; a section
/// that exists but is empty gets the (milder) `empty` severity.
pub struct FacetPresence {
    meta: RuleMeta,
    facet: Facet,
    empty: Severity,
    suggestion: &'static str,
}

impl FacetPresence {
    pub fn user_stories() -> Self {
        Self {
            meta: RuleMeta::new(
                REQUIRES_USER_STORIES,
                "Requires user stories",
                Category::Completeness,
                Severity::Error,
            )
            .with_description("The document must contain at least one user story"),
            facet: Facet::UserStories,
            empty: Severity::Warning,
            suggestion: "Add a \"User Stories\" section with entries like \"As a <role>, I want <goal> so that <benefit>\"",
        }
    }

    pub fn boundaries() -> Self {
        Self {
            meta: RuleMeta::new(
                REQUIRES_BOUNDARIES,
                "Requires boundaries",
                Category::Completeness,
                Severity::Warning,
            )
            .with_description("The document should list hard and soft constraints"),
            facet: Facet::Boundaries,
            empty: Severity::Info,
            suggestion: "Add a \"Boundaries\" section listing what the product must never do and what it should prefer",
        }
    }

    pub fn flows() -> Self {
        Self {
            meta: RuleMeta::new(
                REQUIRES_FLOWS,
                "Requires flows",
                Category::Completeness,
                Severity::Warning,
            )
            .with_description("The document should describe at least one user flow"),
            facet: Facet::Flows,
            empty: Severity::Info,
            suggestion: "Add a \"User Flows\" section with numbered steps",
        }
    }

    pub fn edge_cases() -> Self {
        Self {
            meta: RuleMeta::new(
                REQUIRES_EDGE_CASES,
                "Requires edge cases",
                Category::Completeness,
                Severity::Warning,
            )
            .with_description("The document should enumerate edge cases"),
            facet: Facet::EdgeCases,
            empty: Severity::Info,
            suggestion: "Add an \"Edge Cases\" section covering empty, invalid and failure states",
        }
    }
}

impl Rule for FacetPresence {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let label = self.facet.label();
        let issue = match prd.facet_len(self.facet) {
            None => self.meta.issue(format!("No {} section found", label)),
            Some(0) => self
                .meta
                .issue(format!("The {} section is empty", label))
                .with_severity(self.empty),
            Some(_) => return Vec::new(),
        };
        vec![issue.with_suggestion(self.suggestion)]
    }
}

/// Reports boundaries that only contain soft preferences.
pub struct RequiresHardBoundaries {
    meta: RuleMeta,
}

impl RequiresHardBoundaries {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta::new(
                REQUIRES_HARD_BOUNDARIES,
                "Requires hard boundaries",
                Category::Completeness,
                Severity::Info,
            )
            .with_description("Boundaries should include at least one non-negotiable constraint"),
        }
    }
}

impl Default for RequiresHardBoundaries {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RequiresHardBoundaries {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let Some(boundaries) = &prd.boundaries else {
            return Vec::new();
        };
        if !boundaries.hard.is_empty() || boundaries.soft.is_empty() {
            return Vec::new();
        }

        let span = prd.section_for(Facet::Boundaries).map(|s| s.span.clone());
        vec![
            self.meta
                .issue("Boundaries list only soft preferences")
                .with_optional_span(span)
                .with_suggestion("Add at least one hard constraint using \"must\" or \"never\""),
        ]
    }
}
