//! Ultimate Games library - ultimate tic-tac-toe for the terminal
//!
//! # Architecture
//!
//! - **Engine**: pure rules in the `ultimate_tictactoe` crate, re-exported here
//! - **Session**: one engine plus player profiles and the save file
//! - **Save**: JSON save file with all-or-nothing loading
//! - **Config**: TOML settings for names, save path and rule variants
//!
//! # Example
//!
//! ```no_run
//! use ultimate_games::{AppConfig, GameSession, SessionEvent, Target, Position};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load_or_default("ultimate.toml")?;
//! let mut session = GameSession::from_config(&config);
//! if let SessionEvent::Rejected(reason) =
//!     session.submit_at(Target::new(Position::Center, Position::Center))
//! {
//!     println!("{}", reason);
//! }
//! session.save()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod save;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, PlayerProfile, Players};

// Crate-level exports - Persistence
pub use save::{LoadError, SaveError, SaveStore};

// Crate-level exports - Session
pub use session::{GameSession, SessionEvent};

// Crate-level exports - Game types
pub use ultimate_tictactoe::{
    Cell, FullBoardPolicy, GameEngine, GameOver, GameState, GameStatus, LoadPolicy, MetaBoard,
    Move, MoveError, MoveOutcome, Player, Position, RulesConfig, SavedCell, Snapshot,
    SnapshotError, SubBoard, Target,
};
