use serde::Serialize;

/// Integer size measured in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Which of the four ASCII border lines a panel or frame draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Borders {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Borders {
    pub const ALL: Self = Self::new(true, true, true, true);
    pub const NONE: Self = Self::new(false, false, false, false);

    pub const fn new(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Number of columns taken by the side borders.
    pub fn side_cells(&self) -> usize {
        usize::from(self.left) + usize::from(self.right)
    }

    /// Number of rows taken by the top and bottom borders.
    pub fn edge_cells(&self) -> usize {
        usize::from(self.top) + usize::from(self.bottom)
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::ALL
    }
}

/// Axis along which a container stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Leaf panel, no children.
    #[default]
    None,
    /// Children sit side by side, left to right.
    Horizontal,
    /// Children are stacked top to bottom.
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Option<Self> {
        match self {
            Orientation::None => None,
            Orientation::Horizontal => Some(Orientation::Vertical),
            Orientation::Vertical => Some(Orientation::Horizontal),
        }
    }
}

/// Horizontal padding costs two literal spaces on each side per unit.
pub const HORIZONTAL_PADDING_CELLS: usize = 4;
/// Vertical padding costs one blank row above and below per unit.
pub const VERTICAL_PADDING_CELLS: usize = 2;

/// Usable width inside borders and padding, saturating at zero.
pub fn interior_width(width: usize, padding: usize, borders: Borders) -> usize {
    width
        .saturating_sub(borders.side_cells())
        .saturating_sub(padding.saturating_mul(HORIZONTAL_PADDING_CELLS))
}

/// Usable height inside borders and padding, saturating at zero.
pub fn interior_height(height: usize, padding: usize, borders: Borders) -> usize {
    height
        .saturating_sub(borders.edge_cells())
        .saturating_sub(padding.saturating_mul(VERTICAL_PADDING_CELLS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_subtracts_borders_and_asymmetric_padding() {
        assert_eq!(interior_width(20, 1, Borders::ALL), 14);
        assert_eq!(interior_height(20, 1, Borders::ALL), 16);
        assert_eq!(interior_width(20, 0, Borders::NONE), 20);
    }

    #[test]
    fn interior_saturates_on_tiny_panels() {
        assert_eq!(interior_width(3, 1, Borders::ALL), 0);
        assert_eq!(interior_height(1, 0, Borders::ALL), 0);
    }

    #[test]
    fn toggle_flips_containers_only() {
        assert_eq!(Orientation::Horizontal.toggled(), Some(Orientation::Vertical));
        assert_eq!(Orientation::Vertical.toggled(), Some(Orientation::Horizontal));
        assert_eq!(Orientation::None.toggled(), None);
    }
}
