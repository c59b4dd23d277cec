use unicode_segmentation::UnicodeSegmentation;

use crate::TextSpan;

/// Yields the lowercase Unicode words of `text`.
///
/// Apostrophes inside words are kept, so `can't` stays a single word.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words().map(str::to_lowercase)
}

/// Returns true if `text` contains `word` as a whole word, ignoring case.
pub fn contains_word(text: &str, word: &str) -> bool {
    words(text).any(|w| w.eq_ignore_ascii_case(word))
}

/// Returns true if the span is not embedded in a larger alphanumeric word.
///
/// Only edges that are themselves alphanumeric are checked, so a span such
/// as `etc.` is bounded regardless of the character that follows the dot.
pub fn is_word_bounded(content: &str, span: &TextSpan) -> bool {
    let range = span.byte_range(content);
    let text = &content[range.clone()];

    let starts_alnum = text.chars().next().is_some_and(char::is_alphanumeric);
    let ends_alnum = text.chars().next_back().is_some_and(char::is_alphanumeric);

    let before = content[..range.start].chars().next_back();
    let after = content[range.end..].chars().next();

    let left_ok = !starts_alnum || !before.is_some_and(char::is_alphanumeric);
    let right_ok = !ends_alnum || !after.is_some_and(char::is_alphanumeric);

    left_ok && right_ok
}
