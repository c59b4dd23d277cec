use serde::Deserialize;

use super::{find_terms, to_strings};
use crate::document::ParsedPrd;
use crate::rule::{Rule, RuleMeta};
use crate::{Category, LintIssue, Severity};

pub(crate) const SECURITY_CONSTRAINTS: &str = "security-constraints";

const DEFAULT_SENSITIVE_TERMS: &[&str] = &[
    "password",
    "passwords",
    "credential",
    "credentials",
    "token",
    "tokens",
    "api key",
    "api keys",
    "secret",
    "secrets",
    "credit card",
    "payment",
    "payments",
    "personal data",
    "pii",
    "social security number",
    "health record",
    "health records",
];

const DEFAULT_SECURITY_TERMS: &[&str] = &[
    "encrypt",
    "hash",
    "secur",
    "auth",
    "access control",
    "permission",
    "privilege",
    "redact",
    "mask",
    "tls",
    "https",
    "gdpr",
    "hipaa",
    "pci",
    "audit",
    "plaintext",
    "plain text",
];

/// Options for `security-constraints`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SecurityOptions {
    /// Whole-word phrases that indicate sensitive data.
    pub sensitive_terms: Vec<String>,
    /// Fragments that mark a hard boundary as security related.
    /// Matched as lowercase substrings, so `encrypt` covers `encrypted`.
    pub security_terms: Vec<String>,
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            sensitive_terms: to_strings(DEFAULT_SENSITIVE_TERMS),
            security_terms: to_strings(DEFAULT_SECURITY_TERMS),
        }
    }
}

/// Reports sensitive data that no hard boundary protects.
pub struct SecurityConstraints {
    meta: RuleMeta,
    options: SecurityOptions,
}

impl SecurityConstraints {
    pub fn new(options: SecurityOptions) -> Self {
        let security_terms = options
            .security_terms
            .iter()
            .map(|t| t.to_lowercase())
            .collect();
        Self {
            meta: RuleMeta::new(
                SECURITY_CONSTRAINTS,
                "Security constraints",
                Category::Security,
                Severity::Warning,
            )
            .with_description("Documents handling sensitive data need a hard security boundary"),
            options: SecurityOptions {
                security_terms,
                ..options
            },
        }
    }

    fn has_security_boundary(&self, prd: &ParsedPrd) -> bool {
        let Some(boundaries) = &prd.boundaries else {
            return false;
        };
        boundaries.hard.iter().any(|item| {
            let lower = item.to_lowercase();
            self.options
                .security_terms
                .iter()
                .any(|term| !term.is_empty() && lower.contains(term.as_str()))
        })
    }
}

impl Rule for SecurityConstraints {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let Some((_, first)) = find_terms(prd, &self.options.sensitive_terms, true)
            .into_iter()
            .next()
        else {
            return Vec::new();
        };
        if self.has_security_boundary(prd) {
            return Vec::new();
        }

        vec![
            self.meta
                .issue(format!(
                    "Sensitive data (\"{}\") is mentioned but no hard boundary addresses security",
                    first.matched_text
                ))
                .with_suggestion(
                    "Add a hard boundary such as \"Passwords must be hashed and never logged\"",
                )
                .with_span(first),
        ]
    }
}
