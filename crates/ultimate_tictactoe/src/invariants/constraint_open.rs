//! Constraint invariant: the active constraint never names a decided board.

use super::super::GameState;
use super::{Invariant, Transition};

/// Invariant: If a constraint is set, its sub-board has no winner.
pub struct ConstraintOpenInvariant;

impl Invariant<GameState> for ConstraintOpenInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .active_constraint()
            .is_none_or(|board| !state.board().get(board).is_decided())
    }

    fn description() -> &'static str {
        "Active constraint names an undecided sub-board"
    }
}

impl<'a> Invariant<Transition<'a>> for ConstraintOpenInvariant {
    fn holds(t: &Transition<'a>) -> bool {
        <Self as Invariant<GameState>>::holds(t.after)
    }

    fn description() -> &'static str {
        <Self as Invariant<GameState>>::description()
    }
}
