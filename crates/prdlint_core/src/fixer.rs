//! Auto-fix functionality for applying issue fixes.

use prdlint_text::byte_offset;
use tracing::{debug, warn};

use crate::{Fix, LintIssue};

/// Result of applying fixes to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The fixed content.
    pub output: String,
    /// Number of fixes applied.
    pub applied: usize,
    /// Number of fixes dropped because they overlapped or were out of bounds.
    pub skipped: usize,
}

impl FixOutcome {
    /// Returns true if the output differs from the input.
    pub fn modified(&self) -> bool {
        self.applied > 0
    }
}

/// Applies the fixes carried by `issues` to `content`.
///
/// Fix offsets are character offsets into `content`. Fixes are applied from
/// the end of the document to the beginning so earlier offsets stay valid. When two fixes overlap, the one starting
/// later wins and the other is skipped.
pub fn apply_fixes(content: &str, issues: &[LintIssue]) -> FixOutcome {
    let mut fixes: Vec<&Fix> = issues.iter().filter_map(|i| i.fix.as_ref()).collect();
    fixes.sort_by(|a, b| {
        b.start_offset
            .cmp(&a.start_offset)
            .then(b.end_offset.cmp(&a.end_offset))
    });

    let char_len = content.chars().count();
    let mut output = content.to_string();
    let mut applied = 0;
    let mut skipped = 0;
    // The applied fix with the smallest start so far.
    let mut last_applied: Option<&Fix> = None;

    for fix in fixes {
        let (start, end) = (fix.start_offset, fix.end_offset);

        if start > end || end > char_len {
            warn!("Invalid fix span: start={}, end={}, content_len={}", start, end, char_len);
            skipped += 1;
            continue;
        }

        if last_applied == Some(fix) {
            continue;
        }

        let overlaps = match last_applied {
            // Fixes that only touch do not overlap, unless both sit at one point.
            Some(last) => {
                end > last.start_offset || (end == last.start_offset && start == last.start_offset)
            }
            None => false,
        };
        if overlaps {
            warn!("Skipping overlapping fix at [{}, {}]", start, end);
            skipped += 1;
            continue;
        }

        debug!("Applying fix: replace [{}..{}] with '{}'", start, end, fix.text);
        let byte_start = byte_offset(content, start);
        let byte_end = byte_start + byte_offset(&content[byte_start..], end - start);
        output.replace_range(byte_start..byte_end, &fix.text);
        last_applied = Some(fix);
        applied += 1;
    }

    FixOutcome {
        output,
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Severity};
    use pretty_assertions::assert_eq;

    fn fixing(start: usize, end: usize, text: &str) -> LintIssue {
        LintIssue::new("fix", Category::Technical, Severity::Warning, "msg").with_fix(Fix {
            start_offset: start,
            end_offset: end,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_apply_multiple_fixes() {
        let content = "We should log. We should audit.";
        let issues = vec![fixing(3, 9, "must"), fixing(18, 24, "must")];
        let outcome = apply_fixes(content, &issues);

        assert_eq!(outcome.output, "We must log. We must audit.");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.modified());
    }

    #[test]
    fn test_no_fixes_returns_input() {
        let issues = vec![LintIssue::new("x", Category::Clarity, Severity::Info, "msg")];
        let outcome = apply_fixes("unchanged", &issues);
        assert_eq!(outcome.output, "unchanged");
        assert!(!outcome.modified());
    }

    #[test]
    fn test_overlapping_fix_is_skipped() {
        let content = "abcdefgh";
        let issues = vec![fixing(0, 4, "X"), fixing(2, 6, "Y")];
        let outcome = apply_fixes(content, &issues);
        assert_eq!(outcome.output, "abYgh");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_adjacent_fixes_both_apply() {
        let outcome = apply_fixes("abcd", &[fixing(0, 2, "X"), fixing(2, 4, "Y")]);
        assert_eq!(outcome.output, "XY");
        assert_eq!(outcome.applied, 2);
    }

    #[test]
    fn test_identical_fixes_apply_once() {
        let outcome = apply_fixes("should", &[fixing(0, 6, "must"), fixing(0, 6, "must")]);
        assert_eq!(outcome.output, "must");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_out_of_bounds_fix_is_skipped() {
        let outcome = apply_fixes("short", &[fixing(2, 50, "x")]);
        assert_eq!(outcome.output, "short");
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_offsets_count_characters() {
        let outcome = apply_fixes("héllo wörld", &[fixing(6, 11, "earth"), fixing(1, 2, "e")]);
        assert_eq!(outcome.output, "hello earth");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_fix_past_last_character_is_skipped() {
        // 5 characters, 6 bytes.
        let outcome = apply_fixes("héllo", &[fixing(5, 6, "!")]);
        assert_eq!(outcome.output, "héllo");
        assert_eq!(outcome.skipped, 1);
    }
}
