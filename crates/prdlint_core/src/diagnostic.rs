//! Issue types emitted by lint rules.

use std::fmt;
use std::str::FromStr;

use prdlint_text::TextSpan;
use serde::{Deserialize, Serialize};

use crate::LinterError;

/// Severity level for issues.
///
/// Variants are declared from most to least severe, so the derived ordering
/// sorts errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
    /// Suggestion - optional improvement.
    Suggestion,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Suggestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Suggestion => "suggestion",
        }
    }

    /// Returns true if an issue of this severity fails its rule.
    pub fn is_failing(&self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "suggestion" => Ok(Severity::Suggestion),
            _ => Err(LinterError::config(format!(
                "Invalid severity '{}'. Expected 'error', 'warning', 'info' or 'suggestion'",
                s
            ))),
        }
    }
}

/// Reporting category of a rule. Categories never affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Completeness,
    Clarity,
    Technical,
    Ux,
    Security,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Completeness,
        Category::Clarity,
        Category::Technical,
        Category::Ux,
        Category::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Completeness => "completeness",
            Category::Clarity => "clarity",
            Category::Technical => "technical",
            Category::Ux => "ux",
            Category::Security => "security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LinterError::config(format!("Unknown rule category '{}'", s)))
    }
}

/// A text replacement that resolves an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    /// Start character offset of the replaced range.
    pub start_offset: usize,
    /// End character offset of the replaced range (exclusive).
    pub end_offset: usize,
    /// The replacement text.
    pub text: String,
}

impl Fix {
    /// Creates a fix replacing the text covered by `span`.
    pub fn replace(span: &TextSpan, text: impl Into<String>) -> Self {
        Self {
            start_offset: span.start_offset,
            end_offset: span.end_offset,
            text: text.into(),
        }
    }
}

/// A single issue reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintIssue {
    /// The rule that generated this issue.
    pub rule_id: String,

    /// Severity level.
    pub severity: Severity,

    /// The issue message.
    pub message: String,

    /// Location in the source. Document-level findings have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,

    /// Short advice on how to resolve the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Alternative phrasings or values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    /// Whether `fix` can be applied mechanically.
    #[serde(default)]
    pub auto_fixable: bool,

    /// Reporting category, copied from the rule.
    pub category: Category,

    /// Replacement resolving the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl LintIssue {
    /// Creates a new document-level issue.
    pub fn new(
        rule_id: impl Into<String>,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            span: None,
            suggestion: None,
            suggestions: None,
            auto_fixable: false,
            category,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attaches a source location.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches an optional source location.
    pub fn with_optional_span(mut self, span: Option<TextSpan>) -> Self {
        self.span = span;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Sets an auto-fix and marks the issue as fixable.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self.auto_fixable = true;
        self
    }

    /// Start offset used for presentation ordering.
    pub fn start_offset(&self) -> Option<usize> {
        self.span.as_ref().map(|s| s.start_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Suggestion);
    }

    #[rstest]
    #[case(Severity::Error, true)]
    #[case(Severity::Warning, true)]
    #[case(Severity::Info, false)]
    #[case(Severity::Suggestion, false)]
    fn test_severity_is_failing(#[case] severity: Severity, #[case] failing: bool) {
        assert_eq!(severity.is_failing(), failing);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_category_from_str_unknown() {
        let err = "performance".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Unknown rule category 'performance'"));
    }

    #[test]
    fn test_issue_builder_chain() {
        let span = TextSpan::from_range("Users should log in", 6, 12);
        let issue = LintIssue::new("rule", Category::Technical, Severity::Warning, "msg")
            .with_span(span.clone())
            .with_suggestion("Use must")
            .with_fix(Fix::replace(&span, "must"));

        assert_eq!(issue.span, Some(span));
        assert!(issue.auto_fixable);
        assert_eq!(issue.fix.as_ref().unwrap().text, "must");
        assert_eq!(issue.start_offset(), Some(6));
    }

    #[test]
    fn test_issue_serialization() {
        let issue = LintIssue::new(
            "requires-user-stories",
            Category::Completeness,
            Severity::Error,
            "No user stories section found",
        );
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["ruleId"], "requires-user-stories");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["category"], "completeness");
        assert_eq!(json["autoFixable"], false);
        assert!(json.get("span").is_none());
    }
}
