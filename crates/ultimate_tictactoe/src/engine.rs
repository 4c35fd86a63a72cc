//! Game engine for ultimate tic-tac-toe.
//!
//! The engine owns the single [`GameState`] of a game. All mutation goes
//! through [`GameEngine::apply_move`], [`GameEngine::reset`] and
//! [`GameEngine::restore`]; everything else is a query the presentation
//! layer renders from.

use super::action::{GameOver, Move, MoveError, MoveOutcome};
use super::config::{FullBoardPolicy, LoadPolicy, RulesConfig};
use super::contracts::{Contract, MoveContract};
use super::rules::{check_winner, is_full};
use super::snapshot::{Snapshot, SnapshotError};
use super::{Cell, GameState, Player, Position, Target};
use tracing::{debug, info, instrument};

/// Overall progress of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Moves can still be made.
    InProgress,
    /// A line of sub-boards has been completed.
    Won(Player),
    /// No legal move exists and nobody has won.
    Stalled,
}

/// Ultimate tic-tac-toe game engine.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
    config: RulesConfig,
}

impl GameEngine {
    /// Creates a new game with the default rules.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new game with the given rules.
    #[instrument]
    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            state: GameState::new(),
            config,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the rules in effect.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Applies a move.
    ///
    /// Preconditions are checked in order and the first failure is
    /// returned: game already won, board already decided, cell occupied,
    /// wrong board, wrong turn. A rejected move leaves the state untouched.
    ///
    /// On success the cell is filled, the sub-board is checked for a line,
    /// the turn passes, the next constraint is computed from the cell
    /// position, and the meta-board is checked for a line.
    #[instrument(skip_all, fields(mov = %action))]
    pub fn apply_move(&mut self, action: Move) -> Result<MoveOutcome, MoveError> {
        MoveContract::pre(&self.state, &action)?;

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let sub_board = self.state.board.get_mut(action.board);
        sub_board.set(action.cell, Cell::Occupied(action.player));

        let sub_board_won = check_winner(&sub_board.marks());
        if let Some(winner) = sub_board_won {
            info!(board = %action.board, %winner, "Sub-board won");
            sub_board.set_winner(winner);
        }

        self.state.current_player = action.player.opponent();
        self.state.active_constraint = self.next_constraint(action.cell);

        let game_over = check_winner(&self.state.board.winners()).map(|winner| {
            info!(%winner, "Game won");
            self.state.board.set_overall_winner(Some(winner));
            GameOver { winner }
        });

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &action, &self.state)?;

        debug!(
            next_player = %self.state.current_player,
            next_constraint = ?self.state.active_constraint,
            "Move applied"
        );

        Ok(MoveOutcome {
            sub_board_won,
            next_constraint: self.state.active_constraint,
            game_over,
        })
    }

    /// The sub-board the opponent is sent to by a move into `cell`.
    fn next_constraint(&self, cell: Position) -> Option<Position> {
        let destination = self.state.board.get(cell);
        if destination.is_decided() {
            return None;
        }
        match self.config.full_board_policy {
            FullBoardPolicy::Release if is_full(destination) => None,
            _ => Some(cell),
        }
    }

    /// Starts over: empty board, X to move, no constraint.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.state = GameState::new();
    }

    /// Produces the persisted form of the current state.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Replaces the whole state with a snapshot.
    ///
    /// The current state is left untouched if the snapshot is rejected.
    /// Under [`LoadPolicy::Recompute`] the overall winner is re-derived
    /// from the restored sub-board winners; under [`LoadPolicy::Trust`] it
    /// stays unset.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let mut state = GameState::from_snapshot(snapshot)?;

        if self.config.load_policy == LoadPolicy::Recompute {
            let winner = check_winner(&state.board.winners());
            debug!(?winner, "Recomputed overall winner");
            state.board.set_overall_winner(winner);
        }

        info!(
            current_player = %state.current_player,
            constraint = ?state.active_constraint,
            "Game restored"
        );
        self.state = state;
        Ok(())
    }

    /// Sub-boards a move may currently target.
    ///
    /// The constraint if one is set, otherwise every undecided sub-board.
    /// A full but undecided sub-board is still listed; it simply has no
    /// empty cells.
    pub fn playable_boards(&self) -> Vec<Position> {
        if self.state.board.overall_winner().is_some() {
            return Vec::new();
        }
        match self.state.active_constraint {
            Some(board) => vec![board],
            None => Position::ALL
                .into_iter()
                .filter(|&board| !self.state.board.get(board).is_decided())
                .collect(),
        }
    }

    /// Every cell the current player may move into, in row-major order.
    #[instrument(skip(self))]
    pub fn legal_targets(&self) -> Vec<Target> {
        self.playable_boards()
            .into_iter()
            .flat_map(|board| {
                let sub_board = self.state.board.get(board);
                Position::ALL
                    .into_iter()
                    .filter(move |&cell| sub_board.is_empty(cell))
                    .map(move |cell| Target::new(board, cell))
            })
            .collect()
    }

    /// Returns the overall progress of the game.
    pub fn status(&self) -> GameStatus {
        match self.state.board.overall_winner() {
            Some(winner) => GameStatus::Won(winner),
            None if self.legal_targets().is_empty() => GameStatus::Stalled,
            None => GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(engine: &mut GameEngine, player: Player, board: Position, cell: Position) -> MoveOutcome {
        engine
            .apply_move(Move::new(player, board, cell))
            .expect("legal move")
    }

    #[test]
    fn test_first_move_sets_constraint() {
        let mut engine = GameEngine::new();
        let outcome = play(&mut engine, Player::X, Position::TopLeft, Position::Center);
        assert_eq!(outcome.next_constraint, Some(Position::Center));
        assert_eq!(engine.state().current_player(), Player::O);
        assert_eq!(engine.playable_boards(), vec![Position::Center]);
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut engine = GameEngine::new();
        play(&mut engine, Player::X, Position::TopLeft, Position::Center);
        let before = engine.state().clone();

        let err = engine
            .apply_move(Move::new(Player::O, Position::TopLeft, Position::Center))
            .unwrap_err();
        assert!(matches!(err, MoveError::CellOccupied { .. }));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_legal_targets_fresh_game() {
        let engine = GameEngine::new();
        let targets = engine.legal_targets();
        assert_eq!(targets.len(), 81);
        assert_eq!(targets[0], Target::new(Position::TopLeft, Position::TopLeft));
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_legal_targets_under_constraint() {
        let mut engine = GameEngine::new();
        play(&mut engine, Player::X, Position::Center, Position::TopLeft);
        let targets = engine.legal_targets();
        assert_eq!(targets.len(), 9);
        assert!(targets.iter().all(|t| t.board == Position::TopLeft));
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new();
        play(&mut engine, Player::X, Position::Center, Position::TopLeft);
        engine.reset();
        assert_eq!(engine.state(), &GameState::new());
    }
}
