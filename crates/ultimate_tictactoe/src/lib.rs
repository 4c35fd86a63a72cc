//! Pure ultimate tic-tac-toe game logic.
//!
//! Ultimate tic-tac-toe is played on a 3x3 grid of 3x3 sub-boards. The
//! cell a player marks sends the opponent to the matching sub-board;
//! winning a sub-board claims that square of the meta-board, and three
//! claimed squares in a line win the game.
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{GameEngine, Move, Player, Position};
//!
//! let mut engine = GameEngine::new();
//! let outcome = engine
//!     .apply_move(Move::new(Player::X, Position::TopLeft, Position::Center))
//!     .unwrap();
//! assert_eq!(outcome.next_constraint, Some(Position::Center));
//! assert_eq!(engine.state().current_player(), Player::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod engine;
mod position;
mod snapshot;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{GameOver, Move, MoveError, MoveOutcome};
pub use config::{FullBoardPolicy, LoadPolicy, RulesConfig};
pub use engine::{GameEngine, GameStatus};
pub use position::Position;
pub use snapshot::{SavedCell, Snapshot, SnapshotError};
pub use types::{Cell, GameState, MetaBoard, Player, SubBoard, Target};
