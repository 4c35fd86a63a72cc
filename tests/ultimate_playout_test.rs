//! Property tests over random legal playouts.

use proptest::prelude::*;
use ultimate_games::{Cell, GameEngine, Move, Player, Position, Target};

/// Plays the move picked by each choice until the game ends or stalls,
/// checking the per-move rules along the way.
fn playout(choices: &[u16]) -> Result<(), TestCaseError> {
    let mut engine = GameEngine::new();

    for &choice in choices {
        let targets = engine.legal_targets();
        if targets.is_empty() {
            break;
        }
        let target = targets[choice as usize % targets.len()];
        let player = engine.state().current_player();

        if let Some(board) = engine.state().active_constraint() {
            prop_assert_eq!(target.board, board);
        }

        let outcome = engine
            .apply_move(Move::new(player, target.board, target.cell))
            .map_err(|e| TestCaseError::fail(format!("legal target rejected: {}", e)))?;
        let state = engine.state();

        prop_assert_eq!(state.cell(target), Cell::Occupied(player));

        let expected_constraint = if state.board().get(target.cell).is_decided() {
            None
        } else {
            Some(target.cell)
        };
        prop_assert_eq!(state.active_constraint(), expected_constraint);
        prop_assert_eq!(outcome.next_constraint, expected_constraint);

        if outcome.game_over.is_some() {
            break;
        }
        prop_assert_eq!(state.current_player(), player.opponent());
    }
    Ok(())
}

proptest! {
    #[test]
    fn legal_playouts_follow_the_rules(choices in prop::collection::vec(any::<u16>(), 0..81)) {
        playout(&choices)?;
    }

    #[test]
    fn illegal_moves_never_mutate(
        choices in prop::collection::vec(any::<u16>(), 0..40),
        attempt in (any::<bool>(), 0usize..9, 0usize..9),
    ) {
        let mut engine = GameEngine::new();
        for choice in choices {
            let targets = engine.legal_targets();
            if targets.is_empty() || engine.state().board().overall_winner().is_some() {
                break;
            }
            let target = targets[choice as usize % targets.len()];
            let player = engine.state().current_player();
            engine
                .apply_move(Move::new(player, target.board, target.cell))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        let (as_x, board, cell) = attempt;
        let player = if as_x { Player::X } else { Player::O };
        let target = Target::new(
            Position::from_index(board).expect("in range"),
            Position::from_index(cell).expect("in range"),
        );
        let before = engine.state().clone();
        let legal = player == before.current_player() && engine.legal_targets().contains(&target);

        let result = engine.apply_move(Move::new(player, target.board, target.cell));
        prop_assert_eq!(result.is_ok(), legal);
        if !legal {
            prop_assert_eq!(engine.state(), &before);
        }
    }
}
