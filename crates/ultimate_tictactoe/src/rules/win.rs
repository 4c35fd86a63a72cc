//! Win detection over a 3x3 grid of marks.

use super::super::{Player, Position};
use tracing::instrument;

/// The 8 lines of a 3x3 grid, in evaluation order.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the mark of the first complete line, if any.
///
/// `None` entries are empty: cells for a sub-board, undecided sub-boards
/// for the meta-board.
#[instrument(level = "trace")]
pub fn check_winner(marks: &[Option<Player>; 9]) -> Option<Player> {
    LINES.iter().find_map(|[a, b, c]| {
        let first = marks[a.to_index()]?;
        (marks[b.to_index()] == Some(first) && marks[c.to_index()] == Some(first)).then_some(first)
    })
}
