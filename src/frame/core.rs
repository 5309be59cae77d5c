use std::borrow::Cow;

use crate::geometry::{Borders, HORIZONTAL_PADDING_CELLS};

use super::wrap::wrap_lines;

/// Parameters for drawing a bordered, padded text block.
///
/// `width: None` sizes the block to its longest line. `height: Some(h)` pins
/// the number of rows between the top and bottom border lines to `h`, so the
/// block always has `h + top + bottom` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub padding: usize,
    pub borders: Borders,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            padding: 0,
            borders: Borders::ALL,
        }
    }
}

impl Frame {
    /// Fully bordered, unpadded, auto-sized frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// No borders and no padding: the text is only wrapped and fitted.
    pub fn bare() -> Self {
        Self {
            borders: Borders::NONE,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Frame `text` and join the rows with `\n`.
    pub fn apply(&self, text: &str) -> String {
        self.lines(text).join("\n")
    }

    /// Frame `text`, returning one string per output row.
    pub fn lines(&self, text: &str) -> Vec<String> {
        let padding = self.padding;
        let borders = self.borders;
        let side = borders.side_cells() as isize;
        let padding_cells = padding.saturating_mul(HORIZONTAL_PADDING_CELLS);
        let padding_span = isize::try_from(padding_cells).unwrap_or(isize::MAX);

        let text: Cow<'_, str> = if text.is_empty() {
            let blank = self
                .width
                .map(|width| {
                    to_signed(width)
                        .saturating_sub(padding_span)
                        .saturating_sub(side)
                })
                .unwrap_or(1)
                .max(1) as usize;
            Cow::Owned(" ".repeat(blank))
        } else {
            Cow::Borrowed(text)
        };

        let width = self.width.unwrap_or_else(|| {
            longest_line_width(&text)
                .saturating_add(padding_cells)
                .saturating_add(side as usize)
        });
        let interior = to_signed(width) - side;
        let text_width = interior.saturating_sub(padding_span).max(0) as usize;

        // Rows are cut to the interior anyway, so a wider indent is never seen.
        let indent = " ".repeat(padding.saturating_mul(2).min(interior.max(0) as usize));
        let mut content: Vec<String> = wrap_lines(&text, text_width)
            .into_iter()
            .map(|line| format!("{indent}{line}"))
            .collect();

        if let Some(height) = self.height {
            let content_rows = height.saturating_sub(padding.saturating_mul(2));
            content.truncate(content_rows);
            content.resize(content_rows, String::new());
        }

        let padding_rows = self.height.map_or(padding, |height| padding.min(height));
        let mut body = vec![String::new(); padding_rows];
        body.append(&mut content);
        body.resize(body.len() + padding_rows, String::new());
        if let Some(height) = self.height {
            body.truncate(height);
        }

        let mut rows = Vec::with_capacity(body.len() + borders.edge_cells());
        if borders.top {
            rows.push(edge_row(interior, borders));
        }
        rows.extend(body.iter().map(|row| side_row(row, interior, borders)));
        if borders.bottom {
            rows.push(edge_row(interior, borders));
        }
        rows
    }
}

/// Frame `text` with the given parameters.
pub fn frame(text: &str, frame: &Frame) -> String {
    frame.apply(text)
}

/// Width in cells of the widest line of `text`.
pub fn longest_line_width(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Number of lines in `text`.
pub fn line_height(text: &str) -> usize {
    text.split('\n').count()
}

fn to_signed(cells: usize) -> isize {
    isize::try_from(cells).unwrap_or(isize::MAX)
}

/// Pad `line` with spaces or cut it so it spans exactly `width` cells.
pub(crate) fn fit(line: &str, width: usize) -> String {
    let mut fitted: String = line.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat_n(' ', width - len));
    fitted
}

fn side_row(row: &str, interior: isize, borders: Borders) -> String {
    match interior {
        cells if cells >= 0 => {
            let mut out = String::with_capacity(cells as usize + 2);
            if borders.left {
                out.push('|');
            }
            out.push_str(&fit(row, cells as usize));
            if borders.right {
                out.push('|');
            }
            out
        }
        -1 => "|".to_string(),
        _ => String::new(),
    }
}

fn edge_row(interior: isize, borders: Borders) -> String {
    match interior {
        cells if cells >= 0 => {
            let mut out = String::with_capacity(cells as usize + 2);
            if borders.left {
                out.push('+');
            }
            out.extend(std::iter::repeat_n('-', cells as usize));
            if borders.right {
                out.push('+');
            }
            out
        }
        -1 => "+".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(width: usize) -> Frame {
        Frame::new().with_width(width)
    }

    #[test]
    fn frames_short_text() {
        assert_eq!(sized(6).apply("hi"), "+----+\n|hi  |\n+----+");
    }

    #[test]
    fn auto_width_uses_longest_line() {
        assert_eq!(
            Frame::new().apply("Example Text"),
            "+------------+\n|Example Text|\n+------------+"
        );
    }

    #[test]
    fn nested_frames_survive_wrapping() {
        let inner = Frame::new().apply("Example Text");
        assert_eq!(
            Frame::new().apply(&inner),
            "+--------------+\n\
             |+------------+|\n\
             ||Example Text||\n\
             |+------------+|\n\
             +--------------+"
        );
    }

    #[test]
    fn padding_doubles_horizontally() {
        assert_eq!(
            sized(20).with_padding(1).apply("Extra Padding"),
            "+------------------+\n\
             |                  |\n\
             |  Extra Padding   |\n\
             |                  |\n\
             +------------------+"
        );
    }

    #[test]
    fn bare_frame_only_wraps() {
        let text = "The ASCII frames can be easily\nremoved by setting the padding parameter to -1.";
        assert_eq!(
            Frame::bare().with_width(20).apply(text),
            "The ASCII frames can\n\
             be easily           \n\
             removed by setting  \n\
             the padding         \n\
             parameter to -1.    "
        );
    }

    #[test]
    fn height_pads_with_bordered_blanks() {
        let block = sized(6).with_height(3).apply("hi");
        assert_eq!(block, "+----+\n|hi  |\n|    |\n|    |\n+----+");
    }

    #[test]
    fn height_truncates_but_keeps_padding_rows() {
        let block = sized(8).with_height(3).with_padding(1).apply("a\nb\nc");
        assert_eq!(block, "+------+\n|      |\n|  a   |\n|      |\n+------+");
    }

    #[test]
    fn exact_dimensions_for_any_height() {
        let text = "lorem ipsum dolor sit amet, consectetur adipiscing elit";
        for height in 0..8 {
            for width in 2..24 {
                let lines = sized(width).with_height(height).lines(text);
                assert_eq!(lines.len(), height + 2);
                for line in &lines {
                    assert_eq!(line.chars().count(), width, "{line:?}");
                }
            }
        }
    }

    #[test]
    fn degenerate_interior_widths() {
        assert_eq!(sized(2).apply("x"), "++\n||\n++");
        assert_eq!(sized(1).apply("x"), "+\n|\n+");
        assert_eq!(sized(0).apply("x"), "\n\n");
    }

    #[test]
    fn one_cell_short_with_a_single_side_border() {
        let left_only = Borders::new(true, true, true, false);
        assert_eq!(sized(0).with_borders(left_only).apply("x"), "+\n|\n+");
    }

    #[test]
    fn oversized_padding_saturates() {
        let block = sized(6)
            .with_height(2)
            .with_padding(usize::MAX)
            .apply("hi");
        assert_eq!(block, "+----+\n|    |\n|    |\n+----+");
    }

    #[test]
    fn degenerate_widths_respect_height() {
        assert_eq!(sized(2).with_height(2).lines("x"), vec!["++", "||", "||", "++"]);
        assert_eq!(sized(0).with_height(1).lines("x").len(), 3);
    }

    #[test]
    fn single_side_border_uses_dash_corner() {
        let block = sized(5)
            .with_borders(Borders::new(true, true, true, false))
            .apply("ab");
        assert_eq!(block, "+----\n|ab  \n+----");
    }

    #[test]
    fn empty_text_draws_blank_row() {
        assert_eq!(sized(4).apply(""), "+--+\n|  |\n+--+");
        assert_eq!(Frame::new().apply(""), "+-+\n| |\n+-+");
    }

    #[test]
    fn measures_text() {
        assert_eq!(longest_line_width("a\nabc\nab"), 3);
        assert_eq!(line_height("a\nabc\nab"), 3);
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("ab", 4), "ab  ");
    }
}
