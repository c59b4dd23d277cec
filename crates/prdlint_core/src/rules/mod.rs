//! Built-in PRD rules.
//!
//! Every rule is constructed from an optional JSON options object taken from
//! the configuration. `null` means defaults; unknown option keys are rejected.

mod clarity;
mod completeness;
mod security;
mod technical;
mod ux;

use prdlint_text::{TextSpan, is_word_bounded};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::ParsedPrd;
use crate::rule::{Rule, RuleSet};
use crate::LinterError;

pub use clarity::{NoAmbiguousTerms, NoVagueLanguage, UserStoryFormat};
pub use completeness::{FacetPresence, RequiresHardBoundaries};
pub use security::SecurityConstraints;
pub use technical::{ConsistentBoundaryModals, NoPlaceholders};
pub use ux::FlowsCoverFailures;

/// Ids of the built-in rules, in registration order.
pub const BUILTIN_RULE_IDS: &[&str] = &[
    completeness::REQUIRES_USER_STORIES,
    completeness::REQUIRES_BOUNDARIES,
    completeness::REQUIRES_HARD_BOUNDARIES,
    completeness::REQUIRES_FLOWS,
    completeness::REQUIRES_EDGE_CASES,
    clarity::NO_VAGUE_LANGUAGE,
    clarity::NO_AMBIGUOUS_TERMS,
    clarity::USER_STORY_FORMAT,
    technical::NO_PLACEHOLDERS,
    technical::CONSISTENT_BOUNDARY_MODALS,
    ux::FLOWS_COVER_FAILURES,
    security::SECURITY_CONSTRAINTS,
];

/// Creates the built-in rule `id` from its options.
///
/// Returns `Ok(None)` for ids that are not built in.
pub fn create_builtin(id: &str, options: &Value) -> Result<Option<Box<dyn Rule>>, LinterError> {
    let rule: Box<dyn Rule> = match id {
        completeness::REQUIRES_USER_STORIES => {
            reject_options(id, options)?;
            Box::new(FacetPresence::user_stories())
        }
        completeness::REQUIRES_BOUNDARIES => {
            reject_options(id, options)?;
            Box::new(FacetPresence::boundaries())
        }
        completeness::REQUIRES_HARD_BOUNDARIES => {
            reject_options(id, options)?;
            Box::new(RequiresHardBoundaries::new())
        }
        completeness::REQUIRES_FLOWS => {
            reject_options(id, options)?;
            Box::new(FacetPresence::flows())
        }
        completeness::REQUIRES_EDGE_CASES => {
            reject_options(id, options)?;
            Box::new(FacetPresence::edge_cases())
        }
        clarity::NO_VAGUE_LANGUAGE => Box::new(NoVagueLanguage::new(parse_options(id, options)?)),
        clarity::NO_AMBIGUOUS_TERMS => {
            Box::new(NoAmbiguousTerms::new(parse_options(id, options)?))
        }
        clarity::USER_STORY_FORMAT => {
            reject_options(id, options)?;
            Box::new(UserStoryFormat::new())
        }
        technical::NO_PLACEHOLDERS => Box::new(NoPlaceholders::new(parse_options(id, options)?)),
        technical::CONSISTENT_BOUNDARY_MODALS => {
            reject_options(id, options)?;
            Box::new(ConsistentBoundaryModals::new())
        }
        ux::FLOWS_COVER_FAILURES => {
            Box::new(FlowsCoverFailures::new(parse_options(id, options)?))
        }
        security::SECURITY_CONSTRAINTS => {
            Box::new(SecurityConstraints::new(parse_options(id, options)?))
        }
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

/// Returns every built-in rule with default options.
pub fn builtin_rules() -> RuleSet {
    let mut set = RuleSet::default();
    for id in BUILTIN_RULE_IDS {
        if let Ok(Some(rule)) = create_builtin(id, &Value::Null) {
            // Built-in ids are distinct constants.
            let _ = set.register(rule);
        }
    }
    set
}

fn parse_options<T: DeserializeOwned + Default>(id: &str, options: &Value) -> Result<T, LinterError> {
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|e| LinterError::config(format!("Invalid options for rule '{}': {}", id, e)))
}

fn reject_options(id: &str, options: &Value) -> Result<(), LinterError> {
    match options {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        _ => Err(LinterError::config(format!(
            "Rule '{}' does not accept options",
            id
        ))),
    }
}

/// Finds word-bounded occurrences of any of `terms`.
///
/// Returns `(term index, span)` pairs in source order. Where matches of
/// different terms overlap, the one starting first (then the longer one) wins.
pub(crate) fn find_terms(
    prd: &ParsedPrd,
    terms: &[String],
    case_insensitive: bool,
) -> Vec<(usize, TextSpan)> {
    let mut found: Vec<(usize, TextSpan)> = terms
        .iter()
        .enumerate()
        .flat_map(|(idx, term)| {
            prd.occurrences(term, case_insensitive)
                .iter()
                .filter(|span| is_word_bounded(prd.content(), span))
                .map(|span| (idx, span.clone()))
                .collect::<Vec<_>>()
        })
        .collect();

    found.sort_by(|(_, a), (_, b)| {
        a.start_offset
            .cmp(&b.start_offset)
            .then(b.end_offset.cmp(&a.end_offset))
    });

    let mut result: Vec<(usize, TextSpan)> = Vec::with_capacity(found.len());
    for (idx, span) in found {
        if result.last().is_some_and(|(_, last)| last.overlaps(&span)) {
            continue;
        }
        result.push((idx, span));
    }
    result
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_rules_have_unique_ids() {
        let set = builtin_rules();
        assert_eq!(set.len(), BUILTIN_RULE_IDS.len());
        let ids: HashSet<_> = set.ids().collect();
        assert_eq!(ids.len(), BUILTIN_RULE_IDS.len());
    }

    #[test]
    fn test_builtin_ids_match_meta() {
        for id in BUILTIN_RULE_IDS {
            let rule = create_builtin(id, &Value::Null).unwrap().unwrap();
            assert_eq!(rule.meta().id, *id);
            assert!(!rule.meta().description.is_empty());
        }
    }

    #[test]
    fn test_create_builtin_unknown_id() {
        assert!(create_builtin("no-such-rule", &Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_create_builtin_rejects_unexpected_options() {
        let err = create_builtin("requires-flows", &serde_json::json!({ "max": 1 }))
            .err()
            .unwrap();
        assert!(err.to_string().contains("does not accept options"));
    }

    #[test]
    fn test_create_builtin_rejects_unknown_option_keys() {
        let err = create_builtin("no-vague-language", &serde_json::json!({ "words": [] }))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid options for rule 'no-vague-language'"));
    }

    #[test]
    fn test_find_terms_prefers_earliest_longest() {
        let prd = ParsedPrd::new("It is easy to use and easy.");
        let terms = to_strings(&["easy", "easy to use"]);
        let found = find_terms(&prd, &terms, true);
        let matched: Vec<_> = found.iter().map(|(_, s)| s.matched_text.as_str()).collect();
        assert_eq!(matched, vec!["easy to use", "easy"]);
    }

    #[test]
    fn test_find_terms_skips_embedded_words() {
        let prd = ParsedPrd::new("Breakfast is served fast.");
        let found = find_terms(&prd, &to_strings(&["fast"]), true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.start_offset, 20);
    }
}
