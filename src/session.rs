//! A running game as the player sees it.
//!
//! The session owns the one engine of an application run together with the
//! presentation-only state: player profiles and where the game is saved.
//! Every interaction is a single call that runs to completion.

use crate::config::{AppConfig, Players};
use crate::save::{LoadError, SaveError, SaveStore};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use ultimate_tictactoe::{
    GameEngine, GameStatus, Move, MoveError, MoveOutcome, Player, Position, RulesConfig, Target,
};

/// What a submitted move led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The move was not accepted. Nothing changed.
    Rejected(MoveError),
    /// The move was accepted and the game goes on.
    Played(MoveOutcome),
    /// The move won the game. The session has already been reset.
    GameOver {
        /// Winning mark.
        winner: Player,
        /// Display name of the winner.
        winner_name: String,
    },
}

/// A game session with two named players.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: GameEngine,
    players: Players,
    store: SaveStore,
}

impl GameSession {
    /// Creates a session with a fresh game.
    #[instrument(skip(players))]
    pub fn new(players: Players, store: SaveStore, rules: RulesConfig) -> Self {
        info!(save_path = %store.path().display(), "Creating new game session");
        Self {
            engine: GameEngine::with_config(rules),
            players,
            store,
        }
    }

    /// Creates a session from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.players().clone(),
            SaveStore::new(config.save_path().clone()),
            *config.rules(),
        )
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the player profiles.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the save store.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Submits a move.
    ///
    /// Rejected moves are a silent no-op for the game; the reason is
    /// returned so callers can show or ignore it. A winning move announces
    /// the winner by display name and starts a new game.
    #[instrument(skip_all, fields(mov = %action))]
    pub fn submit(&mut self, action: Move) -> SessionEvent {
        match self.engine.apply_move(action) {
            Err(reason) => {
                debug!(%reason, "Move rejected");
                SessionEvent::Rejected(reason)
            }
            Ok(MoveOutcome {
                game_over: Some(over),
                ..
            }) => {
                let winner_name = self.players.name_of(over.winner);
                info!(winner = %over.winner, %winner_name, "Game over");
                self.engine.reset();
                SessionEvent::GameOver {
                    winner: over.winner,
                    winner_name,
                }
            }
            Ok(outcome) => SessionEvent::Played(outcome),
        }
    }

    /// Submits a move for the player whose turn it is.
    pub fn submit_at(&mut self, target: Target) -> SessionEvent {
        let player = self.engine.state().current_player();
        self.submit(Move::new(player, target.board, target.cell))
    }

    /// Renames a player mid-game. Names are never saved with the game.
    pub fn rename_player(&mut self, mark: Player, name: &str) {
        self.players.rename(mark, name);
    }

    /// Sets or clears a player's avatar.
    pub fn set_avatar(&mut self, mark: Player, avatar: Option<PathBuf>) {
        self.players.set_avatar(mark, avatar);
    }

    /// Starts a new game.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Saves the current game.
    pub fn save(&self) -> Result<(), SaveError> {
        self.store.save(self.engine.state())
    }

    /// Loads the saved game, keeping the current one on failure.
    pub fn load(&mut self) -> Result<(), LoadError> {
        self.store.restore_into(&mut self.engine).inspect_err(|e| {
            warn!(error = %e, "Load failed, keeping current game");
        })
    }

    /// Turn indicator line, e.g. `Alice (X) to move in (1, 1)`.
    pub fn turn_line(&self) -> String {
        let state = self.engine.state();
        let player = state.current_player();
        let name = self.players.name_of(player);
        match self.engine.status() {
            GameStatus::Won(winner) => {
                format!("{} ({}) has won", self.players.name_of(winner), winner)
            }
            GameStatus::Stalled => format!("{} ({}) has no legal move", name, player),
            GameStatus::InProgress => match state.active_constraint() {
                Some(board) => format!("{} ({}) to move in {}", name, player, board),
                None => format!("{} ({}) to move in any open board", name, player),
            },
        }
    }

    /// Text rendering: the board, the playable sub-boards, the players and
    /// the turn.
    pub fn render(&self) -> String {
        let playable = self
            .engine
            .playable_boards()
            .iter()
            .map(Position::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        let mut out = self.engine.state().board().display();
        out.push('\n');
        out.push_str(&format!("Playable boards: {}\n", playable));
        for mark in [Player::X, Player::O] {
            out.push_str(&self.players.badge(mark));
            out.push('\n');
        }
        out.push_str(&self.turn_line());
        out.push('\n');
        out
    }
}
