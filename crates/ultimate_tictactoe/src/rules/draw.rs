//! Full-board detection.

use super::super::{Cell, SubBoard};
use tracing::instrument;

/// Checks if every cell of the sub-board is occupied.
///
/// A full sub-board without a winner is drawn: it stays undecided forever
/// and accepts no further moves.
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &SubBoard) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
