//! Positions on a 3x3 grid.
//!
//! The same nine slots address both a sub-board within the meta-board
//! and a cell within a sub-board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A slot on a 3x3 grid, in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Top-left (row 0, col 0)
    TopLeft,
    /// Top-center (row 0, col 1)
    TopCenter,
    /// Top-right (row 0, col 2)
    TopRight,
    /// Middle-left (row 1, col 0)
    MiddleLeft,
    /// Center (row 1, col 1)
    Center,
    /// Middle-right (row 1, col 2)
    MiddleRight,
    /// Bottom-left (row 2, col 0)
    BottomLeft,
    /// Bottom-center (row 2, col 1)
    BottomCenter,
    /// Bottom-right (row 2, col 2)
    BottomRight,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Converts position to grid index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from grid index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from a row and column, each in `0..3`.
    #[instrument]
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row >= 3 || col >= 3 {
            return None;
        }
        Self::from_index(row * 3 + col)
    }

    /// Row of this position (0-2).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this position (0-2).
    pub fn col(self) -> usize {
        self.to_index() % 3
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_matches_index() {
        for (idx, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), idx);
            assert_eq!(pos.row() * 3 + pos.col(), idx);
            assert_eq!(Position::from_row_col(pos.row(), pos.col()), Some(*pos));
        }
    }

    #[test]
    fn test_from_row_col_out_of_range() {
        assert_eq!(Position::from_row_col(3, 0), None);
        assert_eq!(Position::from_row_col(0, 3), None);
        assert_eq!(Position::from_row_col(2, 2), Some(Position::BottomRight));
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Position::from_index(4), Some(Position::Center));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_display_is_row_then_col() {
        assert_eq!(Position::MiddleRight.to_string(), "(1, 2)");
        assert_eq!(Position::BottomLeft.to_string(), "(2, 0)");
    }
}
