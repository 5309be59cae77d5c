//! Greedy word-aware line breaking.
//!
//! Lines are consumed left to right. Each output line is the longest run of
//! at most `max_width` characters that ends before whitespace, right after a
//! hyphen joining two word characters, or at the end of the input line. A
//! word that offers no such break is cut at `max_width` and the rest of it is
//! dropped.
//!
//! Lines that already look like drawn frames (two or more `|`) have their
//! spaces pinned so a nested border row is never split.
//!
//! ```
//! use textpanel::frame::wrap_lines;
//!
//! assert_eq!(wrap_lines("hello world", 5), vec!["hello", "world"]);
//! assert_eq!(wrap_lines("well-known", 7), vec!["well-", "known"]);
//! ```

/// Stand-in for spaces inside pre-drawn frame rows while breaking.
const PINNED_SPACE: char = '\u{E000}';

/// Wrap `text` to `max_width` columns, joining the result with `\n`.
pub fn wrap(text: &str, max_width: usize) -> String {
    wrap_lines(text, max_width).join("\n")
}

/// Wrap `text` to `max_width` columns.
///
/// A single trailing newline is ignored, an empty input line yields one empty
/// output line, and `max_width == 0` yields one empty line per input line.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let pinned = is_drawn_frame(raw);
        let chars: Vec<char> = if pinned {
            raw.chars()
                .map(|ch| if ch == ' ' { PINNED_SPACE } else { ch })
                .collect()
        } else {
            raw.chars().collect()
        };

        let first = lines.len();
        wrap_line(&chars, max_width, &mut lines);

        if pinned {
            for line in &mut lines[first..] {
                *line = line.replace(PINNED_SPACE, " ");
            }
        }
    }

    lines
}

fn is_drawn_frame(line: &str) -> bool {
    line.matches('|').count() >= 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Break {
    /// Characters emitted on the line.
    len: usize,
    /// Characters consumed from the input, including a swallowed space.
    consumed: usize,
}

fn wrap_line(chars: &[char], max_width: usize, out: &mut Vec<String>) {
    if chars.is_empty() || max_width == 0 {
        out.push(String::new());
        return;
    }

    let mut pos = 0;
    while pos < chars.len() {
        let rest = &chars[pos..];
        match find_break(rest, max_width) {
            Some(brk) => {
                if brk.len > 0 {
                    out.push(rest[..brk.len].iter().collect());
                }
                pos += brk.consumed;
            }
            None => {
                out.push(rest[..max_width].iter().collect());
                pos += skip_word(rest, max_width);
            }
        }
    }
}

fn find_break(rest: &[char], max_width: usize) -> Option<Break> {
    if rest.len() <= max_width {
        return Some(Break {
            len: rest.len(),
            consumed: rest.len(),
        });
    }

    // rest.len() > max_width, so rest[len] is always in bounds here.
    (0..=max_width).rev().find_map(|len| {
        if rest[len].is_whitespace() {
            Some(Break {
                len,
                consumed: len + 1,
            })
        } else if is_hyphen_break(rest, len) {
            Some(Break { len, consumed: len })
        } else {
            None
        }
    })
}

/// True when `rest[..len]` ends in `x-` or `x--` and `rest[len]` continues
/// the word.
fn is_hyphen_break(rest: &[char], len: usize) -> bool {
    if len < 2 || rest[len - 1] != '-' || !is_word_char(rest[len]) {
        return false;
    }
    match rest[len - 2] {
        ch if is_word_char(ch) => true,
        '-' => len >= 3 && is_word_char(rest[len - 3]),
        _ => false,
    }
}

pub(super) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Length of the over-long word plus the whitespace that ends it.
fn skip_word(rest: &[char], max_width: usize) -> usize {
    rest[max_width..]
        .iter()
        .position(|ch| ch.is_whitespace())
        .map(|idx| max_width + idx + 1)
        .unwrap_or(rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_on_whitespace() {
        assert_eq!(wrap_lines("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_lines("a b c d", 3), vec!["a b", "c d"]);
    }

    #[test]
    fn keeps_lines_that_fit() {
        assert_eq!(wrap_lines("short", 20), vec!["short"]);
        assert_eq!(wrap_lines("exact", 5), vec!["exact"]);
    }

    #[test]
    fn prefers_longest_fit() {
        let text = "Text that overflows the width\nparameter is placed on the next line.";
        assert_eq!(
            wrap_lines(text, 18),
            vec![
                "Text that",
                "overflows the",
                "width",
                "parameter is",
                "placed on the next",
                "line.",
            ]
        );
    }

    #[test]
    fn truncates_overlong_words() {
        let text = "If a word (e.g., antidisestablishmentarianism)\n\
                    exceeds the width, the offending word is truncated.";
        assert_eq!(
            wrap_lines(text, 18),
            vec![
                "If a word (e.g.,",
                "antidisestablishme",
                "exceeds the width,",
                "the offending word",
                "is truncated.",
            ]
        );
    }

    #[test]
    fn splits_after_hyphen() {
        assert_eq!(wrap_lines("state-of-the-art", 9), vec!["state-of-", "the-art"]);
        assert_eq!(wrap_lines("well--known", 6), vec!["well--", "known"]);
    }

    #[test]
    fn dangling_hyphen_is_not_a_break() {
        assert_eq!(wrap_lines("ab- cd", 4), vec!["ab-", "cd"]);
        assert_eq!(wrap_lines("-abcdef", 3), vec!["-ab"]);
    }

    #[test]
    fn drawn_frames_are_not_split() {
        let lines = wrap_lines("|a b c|", 7);
        assert_eq!(lines, vec!["|a b c|"]);
        let cut = wrap_lines("|a b c|", 4);
        assert_eq!(cut, vec!["|a b"]);
    }

    #[test]
    fn trailing_newline_is_dropped() {
        assert_eq!(wrap_lines("one\ntwo\n", 10), vec!["one", "two"]);
        assert_eq!(wrap_lines("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn zero_width_yields_blank_lines() {
        assert_eq!(wrap_lines("x\ny", 0), vec!["", ""]);
        assert_eq!(wrap_lines("", 4), vec![""]);
    }

    #[test]
    fn output_never_exceeds_width() {
        let text = "The quick brown fox-jumps over the lazy dog; \
                    pneumonoultramicroscopicsilicovolcanoconiosis is long.";
        for width in 1..30 {
            for line in wrap_lines(text, width) {
                assert!(line.chars().count() <= width, "{line:?} > {width}");
            }
        }
    }

    #[test]
    fn joined_form_matches_lines() {
        assert_eq!(wrap("hello world", 5), "hello\nworld");
    }
}
