//! Block composition used when rendering containers.
//!
//! Both helpers treat their inputs as rectangular blocks: each block is as
//! wide as its longest line and shorter lines are padded with spaces.

use crate::frame::{fit, longest_line_width};

/// Lay `blocks` out left to right, aligned on their first line.
///
/// Shorter blocks are padded with blank rows of their own width.
pub fn side_by_side<S: AsRef<str>>(blocks: &[S]) -> String {
    let columns: Vec<(usize, Vec<&str>)> = blocks
        .iter()
        .map(|block| {
            let block = block.as_ref();
            (longest_line_width(block), block.split('\n').collect())
        })
        .collect();

    let rows = columns
        .iter()
        .map(|(_, lines)| lines.len())
        .max()
        .unwrap_or(0);

    (0..rows)
        .map(|row| {
            columns
                .iter()
                .map(|(width, lines)| fit(lines.get(row).copied().unwrap_or(""), *width))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stack `blocks` top to bottom, padding every line to the widest block.
pub fn stack<S: AsRef<str>>(blocks: &[S]) -> String {
    let width = blocks
        .iter()
        .map(|block| longest_line_width(block.as_ref()))
        .max()
        .unwrap_or(0);

    blocks
        .iter()
        .flat_map(|block| block.as_ref().split('\n'))
        .map(|line| fit(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_by_side_pads_short_blocks() {
        let left = "<Example 1>\nA.\nB.";
        let right = "<Example 2>\n1.\n2.\n3.";
        assert_eq!(
            side_by_side(&[left, right]),
            "<Example 1><Example 2>\n\
             A.         1.         \n\
             B.         2.         \n\
             \x20          3.         "
        );
    }

    #[test]
    fn stack_aligns_widths() {
        assert_eq!(stack(&["ab", "abcd\nx"]), "ab  \nabcd\nx   ");
    }

    #[test]
    fn empty_inputs_compose_to_nothing() {
        let none: [&str; 0] = [];
        assert_eq!(side_by_side(&none), "");
        assert_eq!(stack(&none), "");
    }
}
