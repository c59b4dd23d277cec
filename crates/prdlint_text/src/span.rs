//! Span type for located source regions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::locator::line_column;

/// A located region of source text.
///
/// Offsets are 0-indexed character offsets into the analyzed content, so
/// consumers that index by character (editors, web UIs) can use them as is.
/// Lines and columns are 1-indexed and describe the start offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    /// Start character offset (inclusive).
    pub start_offset: usize,
    /// End character offset (exclusive).
    pub end_offset: usize,
    /// Line number of the start offset (1-indexed).
    pub line: u32,
    /// Column of the start offset in characters (1-indexed).
    pub column: u32,
    /// The literal source text covered by the span.
    pub matched_text: String,
}

impl TextSpan {
    /// Builds a span over the byte range `content[start..end]`.
    ///
    /// Both offsets must lie on char boundaries of `content`; the span
    /// records them as character offsets.
    pub fn from_range(content: &str, start: usize, end: usize) -> Self {
        let (line, column) = line_column(content, start);
        let start_char = content[..start].chars().count();
        let matched_text = &content[start..end];
        Self {
            start_offset: start_char,
            end_offset: start_char + matched_text.chars().count(),
            line,
            column,
            matched_text: matched_text.to_string(),
        }
    }

    /// Returns the byte range of the span within `content`, for slicing.
    ///
    /// `content` must be the text the span was built from. Offsets past the
    /// end are clamped.
    pub fn byte_range(&self, content: &str) -> Range<usize> {
        let start = byte_offset(content, self.start_offset);
        let end = start + byte_offset(&content[start..], self.end_offset - self.start_offset);
        start..end
    }

    /// Returns the length of the span in characters.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Returns true if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// Returns true if the two spans share at least one character.
    #[inline]
    pub const fn overlaps(&self, other: &TextSpan) -> bool {
        self.start_offset < other.end_offset && other.start_offset < self.end_offset
    }
}

/// Maps a character offset to a byte offset, clamped to `content.len()`.
pub fn byte_offset(content: &str, char_offset: usize) -> usize {
    if content.is_ascii() {
        return char_offset.min(content.len());
    }
    content
        .char_indices()
        .nth(char_offset)
        .map_or(content.len(), |(idx, _)| idx)
}
