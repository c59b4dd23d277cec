//! Rule abstraction and the explicitly constructed rule registry.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::document::ParsedPrd;
use crate::{Category, LintIssue, LinterError, Severity};

/// Identity and defaults of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    /// Stable identifier. Never changes once published.
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Default severity; individual issues may differ.
    pub severity: Severity,
}

impl RuleMeta {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            severity,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Creates an issue carrying this rule's id, category and default severity.
    pub fn issue(&self, message: impl Into<String>) -> LintIssue {
        LintIssue::new(self.id.clone(), self.category, self.severity, message)
    }
}

/// A pure check over a parsed document.
///
/// Rules must not depend on each other's output, so they can run in any
/// order or in parallel.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue>;
}

/// A rule backed by a closure, for ad-hoc checks that do not need a type.
pub struct FnRule<F> {
    meta: RuleMeta,
    check: F,
}

impl<F> FnRule<F>
where
    F: Fn(&RuleMeta, &ParsedPrd) -> Vec<LintIssue> + Send + Sync,
{
    pub fn new(meta: RuleMeta, check: F) -> Self {
        Self { meta, check }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&RuleMeta, &ParsedPrd) -> Vec<LintIssue> + Send + Sync,
{
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        (self.check)(&self.meta, prd)
    }
}

/// A registered rule plus its configured severity override.
pub struct RuleEntry {
    rule: Box<dyn Rule>,
    severity_override: Option<Severity>,
}

impl RuleEntry {
    pub fn meta(&self) -> &RuleMeta {
        self.rule.meta()
    }

    pub fn severity_override(&self) -> Option<Severity> {
        self.severity_override
    }

    /// Runs the rule and applies the severity override to its issues.
    pub fn run(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let mut issues = self.rule.check(prd);
        if let Some(severity) = self.severity_override {
            for issue in &mut issues {
                issue.severity = severity;
            }
        }
        debug!(rule = %self.meta().id, issues = issues.len(), "Rule finished");
        issues
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("meta", self.meta())
            .field("severity_override", &self.severity_override)
            .finish()
    }
}

/// Ordered collection of enabled rules with unique ids.
///
/// Registration order is the execution and reporting order.
#[derive(Debug, Default)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl RuleSet {
    /// Builds a rule set, failing on empty or duplicate ids.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Result<Self, LinterError> {
        let mut set = Self::default();
        for rule in rules {
            set.register(rule)?;
        }
        Ok(set)
    }

    /// Appends a rule, failing on an empty or duplicate id.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), LinterError> {
        let id = &rule.meta().id;
        if id.trim().is_empty() {
            return Err(LinterError::config("Rule id must not be empty"));
        }
        if self.get(id).is_some() {
            return Err(LinterError::config(format!("Duplicate rule id '{}'", id)));
        }
        self.entries.push(RuleEntry {
            rule,
            severity_override: None,
        });
        Ok(())
    }

    /// Forces every issue of rule `id` to `severity`.
    pub fn set_severity(&mut self, id: &str, severity: Severity) -> Result<(), LinterError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.meta().id == id)
            .ok_or_else(|| LinterError::config(format!("Unknown rule '{}'", id)))?;
        entry.severity_override = Some(severity);
        Ok(())
    }

    /// Keeps only the rules whose metadata satisfies `keep`.
    pub fn get(&self, id: &str) -> Option<&RuleEntry> {
        self.entries.iter().find(|e| e.meta().id == id)
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.meta().id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
