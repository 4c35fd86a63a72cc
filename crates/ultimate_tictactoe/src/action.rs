//! First-class action types for ultimate tic-tac-toe.
//!
//! Moves are domain events, not side effects. They carry the player's
//! intent and are validated against the state before anything changes.

use super::{Player, Position, Target};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player placing their mark in one cell of one sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Sub-board the mark goes into.
    pub board: Position,
    /// Cell within that sub-board.
    pub cell: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, board: Position, cell: Position) -> Self {
        Self {
            player,
            board,
            cell,
        }
    }

    /// Creates a move from raw grid coordinates, each in `0..3`.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::OutOfBounds` if any coordinate is 3 or larger.
    #[instrument]
    pub fn from_coords(
        player: Player,
        sub_row: usize,
        sub_col: usize,
        cell_row: usize,
        cell_col: usize,
    ) -> Result<Self, MoveError> {
        let board = Position::from_row_col(sub_row, sub_col);
        let cell = Position::from_row_col(cell_row, cell_col);
        match (board, cell) {
            (Some(board), Some(cell)) => Ok(Self::new(player, board, cell)),
            _ => Err(MoveError::OutOfBounds),
        }
    }

    /// The cell this move targets.
    pub fn target(&self) -> Target {
        Target::new(self.board, self.cell)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> board {} cell {}", self.player, self.board, self.cell)
    }
}

/// Signal that a move completed a line of sub-boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    /// The player who won the game.
    pub winner: Player,
}

/// What an accepted move changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Set when the move decided its sub-board.
    pub sub_board_won: Option<Player>,
    /// Sub-board the opponent must play in next, if restricted.
    pub next_constraint: Option<Position>,
    /// Set when the move won the game.
    pub game_over: Option<GameOver>,
}

/// Reasons a move is rejected. A rejected move never changes the state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game already has an overall winner.
    #[display("Game is already over, {} won", _0)]
    GameFinished(#[error(not(source))] Player),

    /// The target sub-board already has a winner.
    #[display("Board {} is already decided", _0)]
    BoardAlreadyDecided(#[error(not(source))] Position),

    /// The target cell is not empty.
    #[display("Cell {} of board {} is already occupied", cell, board)]
    CellOccupied {
        /// Sub-board of the occupied cell.
        board: Position,
        /// The occupied cell.
        cell: Position,
    },

    /// The move is outside the sub-board the player was sent to.
    #[display("Must play in board {}, not {}", required, attempted)]
    WrongBoard {
        /// The active constraint.
        required: Position,
        /// The board the move targeted.
        attempted: Position,
    },

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Player),

    /// A coordinate was outside `0..3`.
    #[display("Coordinates out of bounds (must be 0-2)")]
    OutOfBounds,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords() {
        let mov = Move::from_coords(Player::O, 1, 2, 0, 1).expect("in range");
        assert_eq!(mov.board, Position::MiddleRight);
        assert_eq!(mov.cell, Position::TopCenter);
        assert_eq!(mov.target(), Target::new(Position::MiddleRight, Position::TopCenter));
    }

    #[test]
    fn test_from_coords_out_of_bounds() {
        assert_eq!(
            Move::from_coords(Player::X, 0, 0, 3, 0),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(
            Move::from_coords(Player::X, 0, 5, 0, 0),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MoveError::WrongBoard {
            required: Position::Center,
            attempted: Position::TopLeft,
        };
        assert_eq!(err.to_string(), "Must play in board (1, 1), not (0, 0)");
        assert!(
            MoveError::WrongTurn(Player::O)
                .to_string()
                .contains("not O's turn")
        );
    }
}
