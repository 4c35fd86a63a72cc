//! Command-line interface for ultimate_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ultimate_tictactoe::Player;

/// Ultimate tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "ultimate_games")]
#[command(about = "Ultimate tic-tac-toe with save/load", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "ultimate.toml")]
    pub config: PathBuf,

    /// Save file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,

    /// Re-derive the overall winner when loading a saved game
    #[arg(long, global = true)]
    pub recompute_on_load: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new game and write it to the save file
    New,

    /// Print the saved game
    Show,

    /// Apply one move to the saved game
    Move {
        /// Mark making the move (X or O)
        player: Player,
        /// Sub-board row (0-2)
        sub_row: usize,
        /// Sub-board column (0-2)
        sub_col: usize,
        /// Cell row within the sub-board (0-2)
        cell_row: usize,
        /// Cell column within the sub-board (0-2)
        cell_col: usize,
    },

    /// List every legal move in the saved game
    Targets,

    /// Reset the saved game
    Reset,

    /// Play interactively on stdin
    Play {
        /// Resume the saved game instead of starting fresh
        #[arg(long)]
        resume: bool,
    },
}
