//! Heading-driven segmentation of raw PRD text into facets.
//!
//! Parsing is purely line based: markdown headings (`#` .. `######`), bold
//! lines (`**Title**`) and short label lines ending in `:` open sections, and
//! the items below a facet heading become that facet's entries. Any input is
//! accepted; in the worst case every facet is absent.

use std::ops::Range;

use prdlint_text::{TextSpan, words};
use tracing::{debug, trace};

use crate::document::{Boundaries, Facet, ItemSpans, ParsedPrd, Section};

/// Level assigned to bold and label headings; below every markdown heading.
const LABEL_LEVEL: u8 = 7;

/// Maximum number of words in a label heading such as `Hard constraints:`.
const MAX_LABEL_WORDS: usize = 5;

const HARD_MODALS: &[&str] = &[
    "must", "never", "shall", "always", "required", "cannot", "can't", "mustn't",
];
const SOFT_MODALS: &[&str] = &[
    "should",
    "prefer",
    "preferably",
    "preferred",
    "ideally",
    "may",
    "could",
    "avoid",
];

/// Parses raw text into a [`ParsedPrd`].
pub fn parse(raw: &str) -> ParsedPrd {
    let mut prd = ParsedPrd::new(raw);
    let mut collector = FacetCollector::default();
    let mut open: Option<OpenSection> = None;
    let mut in_fence = false;
    let mut offset = 0;

    for raw_line in raw.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(heading) = parse_heading(line) {
            let title = &line[heading.start..heading.end];
            let facet = facet_for(title);
            let span =
                TextSpan::from_range(raw, line_start + heading.start, line_start + heading.end);

            let nested = open.as_ref().is_some_and(|o| {
                (facet.is_none() || facet == Some(o.facet))
                    && (heading.level == LABEL_LEVEL || heading.level > o.level)
            });

            if nested {
                if let Some(o) = open.as_mut() {
                    o.hint = strength_hint(title);
                    o.continuation = false;
                }
                prd.sections.push(Section {
                    title: title.to_string(),
                    level: heading.level,
                    span,
                    facet: None,
                });
                continue;
            }

            open = facet.map(|facet| {
                collector.open(facet);
                OpenSection {
                    facet,
                    level: heading.level,
                    hint: None,
                    continuation: false,
                }
            });
            prd.sections.push(Section {
                title: title.to_string(),
                level: heading.level,
                span,
                facet,
            });
            continue;
        }

        let Some(section) = open.as_mut() else {
            continue;
        };

        if trimmed.is_empty() {
            section.continuation = false;
            continue;
        }
        if is_thematic_break(trimmed) {
            continue;
        }

        let (has_marker, text) = strip_list_marker(trimmed);
        if text.is_empty() {
            continue;
        }

        let start = line_start + offset_within(line, text);
        let range = start..start + text.len();
        let indented = line.starts_with([' ', '\t']);
        if !has_marker && indented && section.continuation {
            collector.extend_last(section.facet, text, range.end);
        } else {
            collector.push(section.facet, text, range, section.hint);
            section.continuation = true;
        }
    }

    collector.finish(raw, &mut prd);
    debug!(
        sections = prd.sections.len(),
        user_stories = ?prd.facet_len(Facet::UserStories),
        boundaries = ?prd.facet_len(Facet::Boundaries),
        flows = ?prd.facet_len(Facet::Flows),
        edge_cases = ?prd.facet_len(Facet::EdgeCases),
        "Parsed document"
    );
    prd
}

/// Strength of a boundary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strength {
    Hard,
    Soft,
}

struct OpenSection {
    facet: Facet,
    level: u8,
    /// Strength implied by the closest sub-heading, e.g. `Hard constraints:`.
    hint: Option<Strength>,
    /// Whether an indented unmarked line continues the previous item.
    continuation: bool,
}

struct Item {
    text: String,
    /// Byte range in the source, from the first line to the last continuation.
    range: Range<usize>,
    hint: Option<Strength>,
}

#[derive(Default)]
struct FacetCollector {
    user_stories: Option<Vec<Item>>,
    boundaries: Option<Vec<Item>>,
    flows: Option<Vec<Item>>,
    edge_cases: Option<Vec<Item>>,
}

impl FacetCollector {
    fn slot(&mut self, facet: Facet) -> &mut Option<Vec<Item>> {
        match facet {
            Facet::UserStories => &mut self.user_stories,
            Facet::Boundaries => &mut self.boundaries,
            Facet::Flows => &mut self.flows,
            Facet::EdgeCases => &mut self.edge_cases,
        }
    }

    fn open(&mut self, facet: Facet) {
        self.slot(facet).get_or_insert_with(Vec::new);
    }

    fn push(&mut self, facet: Facet, text: &str, range: Range<usize>, hint: Option<Strength>) {
        self.slot(facet).get_or_insert_with(Vec::new).push(Item {
            text: text.to_string(),
            range,
            hint,
        });
    }

    fn extend_last(&mut self, facet: Facet, text: &str, end: usize) {
        if let Some(last) = self.slot(facet).as_mut().and_then(|items| items.last_mut()) {
            last.text.push(' ');
            last.text.push_str(text);
            last.range.end = end;
        }
    }

    fn finish(self, raw: &str, prd: &mut ParsedPrd) {
        let spans = &mut prd.item_spans;
        prd.user_stories = self
            .user_stories
            .map(|items| located_texts(raw, items, &mut spans.user_stories));
        prd.flows = self
            .flows
            .map(|items| located_texts(raw, items, &mut spans.flows));
        prd.edge_cases = self
            .edge_cases
            .map(|items| located_texts(raw, items, &mut spans.edge_cases));
        prd.boundaries = self
            .boundaries
            .map(|items| classify_boundaries(raw, items, spans));
    }
}

fn located_texts(raw: &str, items: Vec<Item>, spans: &mut Vec<TextSpan>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| {
            spans.push(TextSpan::from_range(raw, item.range.start, item.range.end));
            item.text
        })
        .collect()
}

fn classify_boundaries(raw: &str, items: Vec<Item>, spans: &mut ItemSpans) -> Boundaries {
    let mut boundaries = Boundaries::default();
    for item in items {
        let (target, target_spans) = match item.hint.or_else(|| modal_strength(&item.text)) {
            Some(Strength::Hard) => (&mut boundaries.hard, &mut spans.hard_boundaries),
            Some(Strength::Soft) => (&mut boundaries.soft, &mut spans.soft_boundaries),
            None => {
                trace!(item = %item.text, "Dropping unclassified boundary");
                continue;
            }
        };
        target.push(item.text);
        target_spans.push(TextSpan::from_range(raw, item.range.start, item.range.end));
    }
    boundaries
}

/// Byte offset of `inner` within `outer`; `inner` must be a subslice of it.
fn offset_within(outer: &str, inner: &str) -> usize {
    inner.as_ptr() as usize - outer.as_ptr() as usize
}

/// Classifies a boundary by its modal verbs. Hard modals win over soft ones.
fn modal_strength(text: &str) -> Option<Strength> {
    let mut soft = false;
    for word in words(text) {
        if HARD_MODALS.contains(&word.as_str()) {
            return Some(Strength::Hard);
        }
        soft |= SOFT_MODALS.contains(&word.as_str());
    }
    if soft || text.to_lowercase().contains("nice to have") {
        Some(Strength::Soft)
    } else {
        None
    }
}

fn strength_hint(title: &str) -> Option<Strength> {
    let lower = title.to_lowercase();
    if lower.contains("hard") || lower.contains("must") || lower.contains("non-negotiable") {
        Some(Strength::Hard)
    } else if lower.contains("soft")
        || lower.contains("should")
        || lower.contains("nice")
        || lower.contains("prefer")
    {
        Some(Strength::Soft)
    } else {
        None
    }
}

fn facet_for(title: &str) -> Option<Facet> {
    let lower = title.to_lowercase();
    if lower.contains("edge case") {
        Some(Facet::EdgeCases)
    } else if lower.contains("user stor") {
        Some(Facet::UserStories)
    } else if lower.contains("boundar") || lower.contains("constraint") {
        Some(Facet::Boundaries)
    } else if lower.contains("flow") {
        Some(Facet::Flows)
    } else {
        None
    }
}

/// Byte range of a heading's title within its line, plus its level.
#[derive(Debug, PartialEq, Eq)]
struct Heading {
    level: u8,
    start: usize,
    end: usize,
}

fn parse_heading(line: &str) -> Option<Heading> {
    parse_atx_heading(line).or_else(|| parse_label_heading(line))
}

fn parse_atx_heading(line: &str) -> Option<Heading> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }

    let mut title = after.trim();
    let without_closing = title.trim_end_matches('#');
    if without_closing.is_empty() {
        title = "";
    } else if without_closing.ends_with([' ', '\t']) {
        title = without_closing.trim_end();
    }

    let start = indent + hashes + (after.len() - after.trim_start().len());
    Some(Heading {
        level: hashes as u8,
        start,
        end: start + title.len(),
    })
}

fn parse_label_heading(line: &str) -> Option<Heading> {
    let trimmed = line.trim();
    if trimmed.is_empty() || strip_list_marker(trimmed).0 {
        return None;
    }
    let lead = line.len() - line.trim_start().len();

    let (start, title) = if let Some(inner) = trimmed
        .strip_prefix("**")
        .and_then(|s| s.strip_suffix("**"))
    {
        let inner_trimmed = inner.trim_start();
        let title = inner_trimmed.trim_end().trim_end_matches(':').trim_end();
        (lead + 2 + (inner.len() - inner_trimmed.len()), title)
    } else if let Some(title) = trimmed.strip_suffix(':') {
        (lead, title.trim_end())
    } else {
        return None;
    };

    let word_count = title.split_whitespace().count();
    if word_count == 0 || word_count > MAX_LABEL_WORDS {
        return None;
    }
    Some(Heading {
        level: LABEL_LEVEL,
        start,
        end: start + title.len(),
    })
}

/// Strips a leading list marker and task checkbox.
///
/// Returns whether a list marker was present and the remaining text.
fn strip_list_marker(text: &str) -> (bool, &str) {
    let bullet = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| text.strip_prefix(*marker));

    let stripped = bullet.or_else(|| {
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let rest = &text[digits..];
        rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
    });

    match stripped {
        Some(rest) => {
            let rest = rest.trim_start();
            let rest = ["[ ] ", "[x] ", "[X] "]
                .iter()
                .find_map(|checkbox| rest.strip_prefix(*checkbox))
                .unwrap_or(rest);
            (true, rest.trim())
        }
        None => (false, text.trim()),
    }
}

fn is_thematic_break(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&mark| compact.chars().all(|c| c == mark))
}
