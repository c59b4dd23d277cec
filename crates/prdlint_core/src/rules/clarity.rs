//! Clarity rules: vague phrasing, unmeasurable adjectives, story shape.

use serde::Deserialize;

use super::{find_terms, to_strings};
use crate::document::ParsedPrd;
use crate::rule::{Rule, RuleMeta};
use crate::{Category, LintIssue, Severity};

pub(crate) const NO_VAGUE_LANGUAGE: &str = "no-vague-language";
pub(crate) const NO_AMBIGUOUS_TERMS: &str = "no-ambiguous-terms";
pub(crate) const USER_STORY_FORMAT: &str = "user-story-format";

const DEFAULT_VAGUE_TERMS: &[&str] = &[
    "etc.",
    "and so on",
    "and so forth",
    "and more",
    "among others",
    "and the like",
    "as needed",
    "as appropriate",
    "if possible",
    "or something",
];

const DEFAULT_AMBIGUOUS_TERMS: &[&str] = &[
    "fast",
    "quick",
    "quickly",
    "easy",
    "simple",
    "user-friendly",
    "intuitive",
    "seamless",
    "scalable",
    "robust",
    "reliable",
    "efficient",
    "flexible",
];

/// Options for `no-vague-language`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct VagueLanguageOptions {
    /// Phrases to flag (case-insensitive).
    pub terms: Vec<String>,
    /// Above this many findings every finding is reported as an error.
    pub max_occurrences: usize,
}

impl Default for VagueLanguageOptions {
    fn default() -> Self {
        Self {
            terms: to_strings(DEFAULT_VAGUE_TERMS),
            max_occurrences: 5,
        }
    }
}

/// Flags open-ended phrases such as "etc." once per occurrence.
pub struct NoVagueLanguage {
    meta: RuleMeta,
    options: VagueLanguageOptions,
}

impl NoVagueLanguage {
    pub fn new(options: VagueLanguageOptions) -> Self {
        Self {
            meta: RuleMeta::new(
                NO_VAGUE_LANGUAGE,
                "No vague language",
                Category::Clarity,
                Severity::Warning,
            )
            .with_description("Avoid open-ended phrases like \"etc.\" and \"and so on\""),
            options,
        }
    }
}

impl Rule for NoVagueLanguage {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        let found = find_terms(prd, &self.options.terms, true);
        let severity = if found.len() > self.options.max_occurrences {
            Severity::Error
        } else {
            self.meta.severity
        };

        found
            .into_iter()
            .map(|(_, span)| {
                self.meta
                    .issue(format!(
                        "Vague phrase \"{}\" leaves the requirement open-ended",
                        span.matched_text
                    ))
                    .with_severity(severity)
                    .with_suggestion("Spell out the complete list or criteria")
                    .with_span(span)
            })
            .collect()
    }
}

/// Options for `no-ambiguous-terms`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AmbiguousTermsOptions {
    /// Adjectives to flag (case-insensitive, whole words).
    pub terms: Vec<String>,
}

impl Default for AmbiguousTermsOptions {
    fn default() -> Self {
        Self {
            terms: to_strings(DEFAULT_AMBIGUOUS_TERMS),
        }
    }
}

/// Flags adjectives that state a quality without a measurable target.
pub struct NoAmbiguousTerms {
    meta: RuleMeta,
    options: AmbiguousTermsOptions,
}

impl NoAmbiguousTerms {
    pub fn new(options: AmbiguousTermsOptions) -> Self {
        Self {
            meta: RuleMeta::new(
                NO_AMBIGUOUS_TERMS,
                "No ambiguous terms",
                Category::Clarity,
                Severity::Info,
            )
            .with_description("Replace unmeasurable adjectives like \"fast\" with concrete targets"),
            options,
        }
    }
}

impl Rule for NoAmbiguousTerms {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        find_terms(prd, &self.options.terms, true)
            .into_iter()
            .map(|(idx, span)| {
                let issue = self
                    .meta
                    .issue(format!(
                        "Ambiguous term \"{}\" is not measurable",
                        span.matched_text
                    ))
                    .with_suggestion("Replace it with a measurable target");
                let alternatives = measurable_alternatives(&self.options.terms[idx]);
                let issue = if alternatives.is_empty() {
                    issue
                } else {
                    issue.with_suggestions(to_strings(alternatives))
                };
                issue.with_span(span)
            })
            .collect()
    }
}

fn measurable_alternatives(term: &str) -> &'static [&'static str] {
    match term.to_lowercase().as_str() {
        "fast" | "quick" | "quickly" => &[
            "responds within 200 ms at the 95th percentile",
            "completes in under 2 seconds",
        ],
        "easy" | "simple" | "user-friendly" | "intuitive" | "seamless" => &[
            "new users finish the task in 3 steps or fewer",
            "90% task success rate in usability testing",
        ],
        "scalable" => &[
            "supports 10,000 concurrent users",
            "handles 5x the current peak load",
        ],
        "robust" | "reliable" => &[
            "99.9% monthly uptime",
            "recovers from a failed dependency within 5 minutes",
        ],
        "efficient" => &[
            "uses under 100 MB of memory",
            "processes 1,000 records per second",
        ],
        _ => &[],
    }
}

/// Suggests the "As a <role>, I want <goal>" shape for user stories.
pub struct UserStoryFormat {
    meta: RuleMeta,
}

impl UserStoryFormat {
    pub fn new() -> Self {
        Self {
            meta: RuleMeta::new(
                USER_STORY_FORMAT,
                "User story format",
                Category::Clarity,
                Severity::Suggestion,
            )
            .with_description("User stories should name a role and a goal"),
        }
    }
}

impl Default for UserStoryFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for UserStoryFormat {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn check(&self, prd: &ParsedPrd) -> Vec<LintIssue> {
        prd.located_user_stories()
            .filter(|(story, _)| !is_well_formed_story(story))
            .map(|(_, span)| {
                self.meta
                    .issue("User story does not follow the \"As a <role>, I want <goal>\" form")
                    .with_suggestion("Rewrite as \"As a <role>, I want <goal> so that <benefit>\"")
                    .with_optional_span(span.cloned())
            })
            .collect()
    }
}

fn is_well_formed_story(story: &str) -> bool {
    let lower = story.to_lowercase();
    let has_role = ["as a ", "as an ", "as the "]
        .iter()
        .any(|prefix| lower.starts_with(prefix));
    let has_goal = ["i want", "i need", "i can", "i would like"]
        .iter()
        .any(|phrase| lower.contains(phrase));
    has_role && has_goal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_vague_language_reports_each_occurrence() {
        let prd = parse("Support PDF, CSV, etc.\nAlso images, video etc. for now.");
        let issues = NoVagueLanguage::new(VagueLanguageOptions::default()).check(&prd);

        assert_eq!(issues.len(), 2);
        let first = issues[0].span.as_ref().unwrap();
        let second = issues[1].span.as_ref().unwrap();
        assert_eq!((first.line, first.column), (1, 19));
        assert_eq!((second.line, second.column), (2, 20));
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_vague_language_escalates_above_threshold() {
        let options = VagueLanguageOptions {
            max_occurrences: 1,
            ..Default::default()
        };
        let prd = parse("A, B, etc. and C, D, and so on.");
        let issues = NoVagueLanguage::new(options).check(&prd);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_vague_language_preserves_source_case() {
        let prd = parse("Formats: PNG, JPG, ETC.");
        let issues = NoVagueLanguage::new(VagueLanguageOptions::default()).check(&prd);
        assert_eq!(issues[0].span.as_ref().unwrap().matched_text, "ETC.");
        assert_eq!(
            issues[0].message,
            "Vague phrase \"ETC.\" leaves the requirement open-ended"
        );
    }

    #[test]
    fn test_ambiguous_terms_with_alternatives() {
        let prd = parse("The dashboard must be fast and easy to read.");
        let issues = NoAmbiguousTerms::new(AmbiguousTermsOptions::default()).check(&prd);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].span.as_ref().unwrap().matched_text, "fast");
        assert_eq!(issues[1].span.as_ref().unwrap().matched_text, "easy");
        assert!(issues[0].suggestions.as_ref().is_some_and(|s| s.len() == 2));
    }

    #[test]
    fn test_ambiguous_custom_term_has_no_alternatives() {
        let options = AmbiguousTermsOptions {
            terms: vec!["snappy".to_string()],
        };
        let issues = NoAmbiguousTerms::new(options).check(&parse("A snappy UI"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].suggestions, None);
    }

    #[test]
    fn test_ambiguous_terms_ignore_embedded_words() {
        let issues = NoAmbiguousTerms::new(AmbiguousTermsOptions::default())
            .check(&parse("Serve breakfast steadfastly"));
        assert!(issues.is_empty());
    }

    #[rstest]
    #[case("As a user, I want to export reports", true)]
    #[case("As an admin I need audit logs", true)]
    #[case("Export reports to PDF", false)]
    #[case("As a user, reports are exported", false)]
    fn test_story_shape(#[case] story: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed_story(story), expected);
    }

    #[test]
    fn test_user_story_format_locates_story() {
        let prd = parse("## User Stories\n- Export reports to PDF\n- As a user, I want search\n");
        let issues = UserStoryFormat::new().check(&prd);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Suggestion);
        let span = issues[0].span.as_ref().unwrap();
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 3);
    }

    #[test]
    fn test_user_story_format_ignores_matching_prose_elsewhere() {
        let prd = parse("# Overview\nExport reports to PDF\n\n## User Stories\n- Export reports to PDF\n");
        let issues = UserStoryFormat::new().check(&prd);
        assert_eq!(issues.len(), 1);
        let span = issues[0].span.as_ref().unwrap();
        assert_eq!((span.line, span.column), (5, 3));
        assert_eq!(span.start_offset, 52);
    }

    #[test]
    fn test_user_story_format_skips_absent_stories() {
        assert!(UserStoryFormat::new().check(&parse("")).is_empty());
    }
}
