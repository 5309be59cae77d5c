//! Text preparation ahead of framing.
//!
//! [`clean`] normalises hand-typed prose so that [`wrap`](super::wrap) sees
//! whole paragraphs, and [`bookify`] adds book-style touches on top of it.
//! Both are pure; their output is meant to be handed to a
//! [`Frame`](super::Frame) of the same width.

use super::wrap::is_word_char;

/// Entity that [`bookify`] turns into a page-break rule.
pub const PAGE_BREAK: &str = "&pb;";

const TAB_STOP: &str = "    ";
const PARAGRAPH_INDENT: &str = "    ";

/// Remove whitespace that would get in the way of wrapping.
///
/// Leading blank lines are dropped, tabs become four spaces, a single line
/// break between two words is joined into one space, every line is trimmed
/// and a `--` hyphenation split across lines is mended. A blank line, or a
/// line that starts with whitespace, still begins a new paragraph.
pub fn clean(text: &str) -> String {
    let text = text.trim_start_matches('\n').replace('\t', TAB_STOP);
    join_soft_breaks(&text)
        .split('\n')
        .map(|line| mend_hyphenation(line.trim_matches(' ')))
        .collect::<Vec<_>>()
        .join("\n")
}

/// [`clean`] `text`, then format it like a book page `width` cells wide.
///
/// Double spaces after a full stop collapse to one, each [`PAGE_BREAK`]
/// (with one whitespace character either side) becomes a line of
/// `width - 4 * padding` dashes, and paragraphs longer than
/// `width + 2 * padding` characters get a four-space indent.
pub fn bookify(text: &str, width: usize, padding: usize) -> String {
    let text = clean(text).replace(".  ", ". ");
    let rule = "-".repeat(width.saturating_sub(padding.saturating_mul(4)));
    let text = break_pages(&text, &rule);

    let indent_after = width.saturating_add(padding.saturating_mul(2));
    text.split('\n')
        .map(|line| {
            if line.chars().count() > indent_after {
                format!("{PARAGRAPH_INDENT}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_soft_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\n' {
            let kept = out.trim_end_matches(' ').len();
            let after_word = out[..kept].chars().next_back().is_some_and(|prev| prev != '\n');
            let before_word = chars.peek().is_some_and(|next| !next.is_whitespace());
            if after_word && before_word {
                out.truncate(kept);
                out.push(' ');
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// `word-- rest` becomes `word--rest`.
fn mend_hyphenation(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut idx = 0;
    while idx < chars.len() {
        out.push(chars[idx]);
        if is_word_char(chars[idx]) {
            let dashes = chars[idx + 1..].iter().take_while(|ch| **ch == '-').count();
            if dashes >= 2 && chars.get(idx + 1 + dashes) == Some(&' ') {
                out.extend(&chars[idx + 1..idx + 1 + dashes]);
                idx += dashes + 2;
                continue;
            }
        }
        idx += 1;
    }
    out
}

fn break_pages(text: &str, rule: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(PAGE_BREAK) {
        let before = &rest[..at];
        let before = match before.char_indices().next_back() {
            Some((idx, ch)) if ch.is_whitespace() => &before[..idx],
            _ => before,
        };
        out.push_str(before);
        out.push('\n');
        out.push_str(rule);
        out.push('\n');

        let after = &rest[at + PAGE_BREAK.len()..];
        let mut chars = after.chars();
        rest = match chars.next() {
            Some(ch) if ch.is_whitespace() => chars.as_str(),
            _ => after,
        };
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    #[test]
    fn clean_joins_lines_and_trims() {
        assert_eq!(
            clean("\n\nfirst line\nsecond line\n\n  indented\tline  \nlast"),
            "first line second line\n\nindented    line last"
        );
    }

    #[test]
    fn clean_joins_every_soft_break() {
        assert_eq!(clean("a\nb\nc"), "a b c");
        assert_eq!(clean("para one\n\npara two"), "para one\n\npara two");
    }

    #[test]
    fn clean_mends_split_hyphenation() {
        assert_eq!(clean("well-- \nknown"), "well--known");
        assert_eq!(clean("a--b and x - y"), "a--b and x - y");
    }

    #[test]
    fn bookify_collapses_sentence_spacing() {
        assert_eq!(bookify("One.  Two.", 80, 0), "One. Two.");
    }

    #[test]
    fn bookify_draws_page_breaks() {
        assert_eq!(
            bookify("Chapter one.\n&pb;\nChapter two.", 20, 1),
            "Chapter one.\n----------------\nChapter two."
        );
        assert_eq!(bookify("a &pb; b", 4, 2), "a\n\nb");
    }

    #[test]
    fn bookify_indents_long_paragraphs() {
        assert_eq!(
            bookify("the quick brown fox jumps over\n\nshort", 20, 0),
            "    the quick brown fox jumps over\n\nshort"
        );
    }

    #[test]
    fn bookified_text_fills_a_frame() {
        let page = bookify("Chapter one.\n&pb;\nChapter two.", 16, 0);
        assert_eq!(
            Frame::new().with_width(18).apply(&page),
            "+----------------+\n\
             |Chapter one.    |\n\
             |----------------|\n\
             |Chapter two.    |\n\
             +----------------+"
        );
    }
}
