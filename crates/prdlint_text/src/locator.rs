//! Term lookup over raw document text.
//!
//! Searches never allocate lowercased copies of the document: case-insensitive
//! matching compares characters by their lowercase mappings while walking the
//! original text, so every reported offset refers to the original content and
//! `matched_text` keeps the source casing. Scanning works on bytes; the
//! returned spans carry character offsets.

use std::iter::FusedIterator;

use crate::TextSpan;

/// Returns the first occurrence of `term` in `content`, if any.
pub fn locate_first(content: &str, term: &str, case_insensitive: bool) -> Option<TextSpan> {
    locate_all(content, term, case_insensitive).next()
}

/// Returns a lazy iterator over the non-overlapping occurrences of `term`.
///
/// Matches are produced left to right; after a match at `[s, e)` the scan
/// resumes at `e`. Calling this again starts a fresh scan. An empty term
/// never matches.
pub fn locate_all<'a>(content: &'a str, term: &'a str, case_insensitive: bool) -> Occurrences<'a> {
    Occurrences {
        content,
        term,
        case_insensitive,
        cursor: 0,
        done: term.is_empty(),
    }
}

/// Iterator returned by [`locate_all`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    content: &'a str,
    term: &'a str,
    case_insensitive: bool,
    cursor: usize,
    done: bool,
}

impl Iterator for Occurrences<'_> {
    type Item = TextSpan;

    fn next(&mut self) -> Option<TextSpan> {
        if self.done {
            return None;
        }

        let found = if self.case_insensitive {
            find_ignore_case(self.content, self.term, self.cursor)
        } else {
            self.content[self.cursor..]
                .find(self.term)
                .map(|idx| (self.cursor + idx, self.cursor + idx + self.term.len()))
        };

        match found {
            Some((start, end)) => {
                self.cursor = end;
                if end >= self.content.len() {
                    self.done = true;
                }
                Some(TextSpan::from_range(self.content, start, end))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

/// Maps a byte offset to a 1-indexed `(line, column)` pair.
///
/// The line counts `\n` strictly before `offset`; the column counts the
/// characters since the last newline. Offsets past the end are clamped and
/// offsets inside a multi-byte character snap back to its start.
pub fn line_column(content: &str, offset: usize) -> (u32, u32) {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &content[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;

    (line as u32, column as u32)
}

fn find_ignore_case(content: &str, term: &str, from: usize) -> Option<(usize, usize)> {
    let haystack = &content[from..];
    haystack.char_indices().find_map(|(idx, _)| {
        match_len_ignore_case(&haystack[idx..], term)
            .map(|len| (from + idx, from + idx + len))
    })
}

/// Returns the byte length of the prefix of `haystack` matching `term`.
fn match_len_ignore_case(haystack: &str, term: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for expected in term.chars() {
        let (_, actual) = hay.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_locate_first_not_found() {
        assert_eq!(locate_first("nothing here", "etc.", false), None);
    }

    #[test]
    fn test_locate_first_preserves_source_case() {
        let span = locate_first("Use the API wisely", "api", true).unwrap();
        assert_eq!(span.matched_text, "API");
        assert_eq!(span.start_offset, 8);
        assert_eq!(span.end_offset, 11);
        assert_eq!(span.column, 9);
    }

    #[test]
    fn test_locate_first_case_sensitive_misses_other_case() {
        assert_eq!(locate_first("Use the API wisely", "api", false), None);
    }

    #[test]
    fn test_locate_all_is_non_overlapping() {
        let spans: Vec<_> = locate_all("aaaa", "aa", false).collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start_offset, 0);
        assert_eq!(spans[1].start_offset, 2);
    }

    #[test]
    fn test_locate_all_odd_repetition() {
        let spans: Vec<_> = locate_all("aaaaa", "aa", true).collect();
        let starts: Vec<_> = spans.iter().map(|s| s.start_offset).collect();
        assert_eq!(starts, vec![0, 2]);
    }

    #[test]
    fn test_locate_all_is_restartable() {
        let content = "etc. and etc.";
        let first: Vec<_> = locate_all(content, "etc.", false).collect();
        let second: Vec<_> = locate_all(content, "etc.", false).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_locate_all_line_and_column() {
        let content = "First line etc.\nSecond\n  and etc. again";
        let spans: Vec<_> = locate_all(content, "etc.", false).collect();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].line, spans[0].column), (1, 12));
        assert_eq!((spans[1].line, spans[1].column), (3, 7));
    }

    #[test]
    fn test_locate_all_empty_term() {
        assert_eq!(locate_all("abc", "", false).count(), 0);
        assert_eq!(locate_all("abc", "", true).count(), 0);
    }

    #[test]
    fn test_locate_all_is_fused() {
        let mut iter = locate_all("x", "x", false);
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_case_insensitive_multibyte_offsets() {
        let content = "Größe: ÜBER alles";
        let span = locate_first(content, "über", true).unwrap();
        assert_eq!(span.matched_text, "ÜBER");
        assert_eq!(&content[span.byte_range(content)], "ÜBER");
        assert_eq!(span.start_offset, 7);
        assert_eq!(span.column, 8);
    }

    #[rstest]
    #[case("", 0, (1, 1))]
    #[case("abc", 2, (1, 3))]
    #[case("ab\ncd", 3, (2, 1))]
    #[case("ab\ncd", 4, (2, 2))]
    #[case("ab\n\n", 4, (3, 1))]
    #[case("ab", 99, (1, 3))]
    fn test_line_column(#[case] content: &str, #[case] offset: usize, #[case] expected: (u32, u32)) {
        assert_eq!(line_column(content, offset), expected);
    }

    #[test]
    fn test_match_lengths_never_exceed_content() {
        let content = "TBD tbd TbD xtbdx";
        let total: usize = locate_all(content, "tbd", true).map(|s| s.len()).sum();
        assert!(total <= content.len());
        assert_eq!(locate_all(content, "tbd", true).count(), 4);
    }
}
