//! Contract-based validation for ultimate tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, move)} apply {Q(before, move, after)}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, Transition, UltimateInvariants};
use super::GameState;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, action: &A, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: No one has won the game yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects moves once an overall winner exists.
    pub fn check(_mov: &Move, state: &GameState) -> Result<(), MoveError> {
        match state.board().overall_winner() {
            Some(winner) => Err(MoveError::GameFinished(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: The target sub-board has no winner.
pub struct BoardUndecided;

impl BoardUndecided {
    /// Rejects moves into a decided sub-board.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board().get(mov.board).is_decided() {
            Err(MoveError::BoardAlreadyDecided(mov.board))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves into an occupied cell.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board().get(mov.board).is_empty(mov.cell) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied {
                board: mov.board,
                cell: mov.cell,
            })
        }
    }
}

/// Precondition: The move lands in the sub-board the player was sent to.
pub struct OnActiveBoard;

impl OnActiveBoard {
    /// Rejects moves outside the active constraint, when one is set.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        match state.active_constraint() {
            Some(required) if required != mov.board => Err(MoveError::WrongBoard {
                required,
                attempted: mov.board,
            }),
            _ => Ok(()),
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the player who is not current.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if mov.player != state.current_player() {
            Err(MoveError::WrongTurn(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition. Checks run in a fixed order and the first
/// failure is reported.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "debug", skip_all, fields(mov = %mov))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(mov, state)?;
        BoardUndecided::check(mov, state)?;
        CellIsEmpty::check(mov, state)?;
        OnActiveBoard::check(mov, state)?;
        PlayersTurn::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - Only the target cell changed, and winners only went from unset to set
/// - The turn passed to the opponent
/// - The constraint names an undecided sub-board
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, action: &Move, after: &GameState) -> Result<(), MoveError> {
        let transition = Transition::new(before, action, after);
        UltimateInvariants::check_all(&transition).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            debug!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
