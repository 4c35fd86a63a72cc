//! Monotonic board invariant: cells and winners never change once set.

use super::super::{Cell, Position, Target};
use super::{Invariant, Transition};

/// Invariant: A move fills exactly its own target cell.
///
/// Every other cell is unchanged, and sub-board winners only ever go from
/// unset to set.
pub struct MonotonicBoardInvariant;

impl<'a> Invariant<Transition<'a>> for MonotonicBoardInvariant {
    fn holds(t: &Transition<'a>) -> bool {
        let placed = t.action.target();

        let cells_ok = Position::ALL.iter().all(|&board| {
            Position::ALL.iter().all(|&cell| {
                let target = Target::new(board, cell);
                let (was, now) = (t.before.cell(target), t.after.cell(target));
                if target == placed {
                    was == Cell::Empty && now == Cell::Occupied(t.action.player)
                } else {
                    was == now
                }
            })
        });

        let winners_ok = Position::ALL.iter().all(|&board| {
            match t.before.board().get(board).winner() {
                Some(winner) => t.after.board().get(board).winner() == Some(winner),
                None => true,
            }
        });

        cells_ok && winners_ok
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
