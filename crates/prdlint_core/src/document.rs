//! Parsed PRD facets.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use prdlint_text::{TextSpan, locate_all};
use serde::Serialize;

/// One structured aspect extracted from a PRD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    UserStories,
    Boundaries,
    Flows,
    EdgeCases,
}

impl Facet {
    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::UserStories => "user stories",
            Facet::Boundaries => "boundaries",
            Facet::Flows => "flows",
            Facet::EdgeCases => "edge cases",
        }
    }
}

/// Hard and soft constraints listed under a boundaries section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Boundaries {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

impl Boundaries {
    pub fn is_empty(&self) -> bool {
        self.hard.is_empty() && self.soft.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hard.len() + self.soft.len()
    }
}

/// Source locations of facet items, index-aligned with the facet lists.
///
/// An item joined from continuation lines spans all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSpans {
    pub user_stories: Vec<TextSpan>,
    pub hard_boundaries: Vec<TextSpan>,
    pub soft_boundaries: Vec<TextSpan>,
    pub flows: Vec<TextSpan>,
    pub edge_cases: Vec<TextSpan>,
}

/// A heading recognised by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Heading text without markers.
    pub title: String,
    /// 1-6 for markdown headings; label lines rank below all of them.
    pub level: u8,
    /// Location of the heading text.
    pub span: TextSpan,
    /// The facet this heading opened, if any.
    pub facet: Option<Facet>,
}

/// Immutable snapshot of the facets found in a raw document.
///
/// A facet is `None` when no heading for it exists and `Some(empty)` when the
/// heading exists without content; rules report the two cases differently.
#[derive(Debug, Default)]
pub struct ParsedPrd {
    content: String,
    pub user_stories: Option<Vec<String>>,
    pub boundaries: Option<Boundaries>,
    pub flows: Option<Vec<String>>,
    pub edge_cases: Option<Vec<String>>,
    pub sections: Vec<Section>,
    pub item_spans: ItemSpans,
    occurrences: Mutex<HashMap<(String, bool), Arc<[TextSpan]>>>,
}

impl ParsedPrd {
    /// Creates a snapshot with every facet absent.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Returns the raw, unmodified document text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the number of entries in a facet, or `None` when it is absent.
    pub fn facet_len(&self, facet: Facet) -> Option<usize> {
        match facet {
            Facet::UserStories => self.user_stories.as_ref().map(Vec::len),
            Facet::Boundaries => self.boundaries.as_ref().map(Boundaries::len),
            Facet::Flows => self.flows.as_ref().map(Vec::len),
            Facet::EdgeCases => self.edge_cases.as_ref().map(Vec::len),
        }
    }

    /// Returns the heading that opened `facet`, if any.
    pub fn section_for(&self, facet: Facet) -> Option<&Section> {
        self.sections.iter().find(|s| s.facet == Some(facet))
    }

    /// Pairs each user story with the place it was read from.
    pub fn located_user_stories(&self) -> impl Iterator<Item = (&str, Option<&TextSpan>)> {
        located(self.user_stories.as_deref(), &self.item_spans.user_stories)
    }

    /// Pairs each hard boundary with the place it was read from.
    pub fn located_hard_boundaries(&self) -> impl Iterator<Item = (&str, Option<&TextSpan>)> {
        located(
            self.boundaries.as_ref().map(|b| b.hard.as_slice()),
            &self.item_spans.hard_boundaries,
        )
    }

    /// Returns all non-overlapping occurrences of `term` in the content.
    ///
    /// Results are memoized per `(term, case_insensitive)` so rules searching
    /// the same phrase share one scan.
    pub fn occurrences(&self, term: &str, case_insensitive: bool) -> Arc<[TextSpan]> {
        let key = (term.to_string(), case_insensitive);
        if let Some(hit) = self.occurrences.lock().get(&key) {
            return Arc::clone(hit);
        }

        let spans: Arc<[TextSpan]> = locate_all(&self.content, term, case_insensitive).collect();
        Arc::clone(self.occurrences.lock().entry(key).or_insert(spans))
    }
}

fn located<'a>(
    items: Option<&'a [String]>,
    spans: &'a [TextSpan],
) -> impl Iterator<Item = (&'a str, Option<&'a TextSpan>)> {
    items
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(move |(idx, item)| (item.as_str(), spans.get(idx)))
}
