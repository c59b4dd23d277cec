//! # prdlint_text
//!
//! Text primitives shared by the PRD Lint engine:
//! - [`TextSpan`]: a located region of the source with line/column coordinates
//! - [`locate_first`] / [`locate_all`]: term lookup over raw document text
//! - word helpers used for modal classification and word-boundary checks

mod locator;
mod span;
mod words;

pub use locator::{Occurrences, line_column, locate_all, locate_first};
pub use span::{TextSpan, byte_offset};
pub use words::{contains_word, is_word_bounded, words};
