//! Alternating turn invariant: X, O, X, O, ...

use super::{Invariant, Transition};

/// Invariant: Every accepted move is made by the current player and passes
/// the turn to the opponent.
pub struct AlternatingTurnInvariant;

impl<'a> Invariant<Transition<'a>> for AlternatingTurnInvariant {
    fn holds(t: &Transition<'a>) -> bool {
        t.action.player == t.before.current_player()
            && t.after.current_player() == t.before.current_player().opponent()
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
