//! Core domain types for ultimate tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell inside a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A fully-qualified cell address: which sub-board, which cell within it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct Target {
    /// Sub-board within the meta-board.
    pub board: Position,
    /// Cell within the sub-board.
    pub cell: Position,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.board.row(),
            self.board.col(),
            self.cell.row(),
            self.cell.col()
        )
    }
}

/// One of the nine inner 3x3 boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBoard {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
    /// Set at most once, by the first completed line.
    winner: Option<Player>,
}

impl SubBoard {
    /// Creates a new empty sub-board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
            winner: None,
        }
    }

    /// Builds a sub-board from stored cells and winner.
    pub(crate) fn from_parts(cells: [Cell; 9], winner: Option<Player>) -> Self {
        Self { cells, winner }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position (unchecked).
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Cells reduced to their marks, for line evaluation.
    pub fn marks(&self) -> [Option<Player>; 9] {
        self.cells.map(Cell::mark)
    }

    /// Returns the winner of this sub-board, if decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Whether a line has been completed on this sub-board.
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub(crate) fn set_winner(&mut self, winner: Player) {
        self.winner = Some(winner);
    }

    /// Formats one row of the sub-board, e.g. `X.O`.
    ///
    /// A decided sub-board renders every cell as the winner's mark.
    pub fn display_row(&self, row: usize) -> String {
        (0..3)
            .map(|col| {
                let mark = match self.winner {
                    Some(winner) => Some(winner),
                    None => self.cells[row * 3 + col].mark(),
                };
                match mark {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                }
            })
            .collect()
    }
}

impl Default for SubBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// The 3x3 grid of sub-boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBoard {
    /// Sub-boards in row-major order (0-8).
    boards: [SubBoard; 9],
    /// Derived from the sub-board winners, never persisted.
    overall_winner: Option<Player>,
}

impl MetaBoard {
    /// Creates a new meta-board of empty sub-boards.
    pub fn new() -> Self {
        Self {
            boards: std::array::from_fn(|_| SubBoard::new()),
            overall_winner: None,
        }
    }

    pub(crate) fn from_boards(boards: [SubBoard; 9]) -> Self {
        Self {
            boards,
            overall_winner: None,
        }
    }

    /// Gets the sub-board at the given position.
    pub fn get(&self, pos: Position) -> &SubBoard {
        &self.boards[pos.to_index()]
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> &mut SubBoard {
        &mut self.boards[pos.to_index()]
    }

    /// Returns all sub-boards.
    pub fn boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    /// Sub-board winners, for the overall line evaluation.
    pub fn winners(&self) -> [Option<Player>; 9] {
        std::array::from_fn(|i| self.boards[i].winner())
    }

    /// Returns the overall winner, if one has been detected.
    pub fn overall_winner(&self) -> Option<Player> {
        self.overall_winner
    }

    pub(crate) fn set_overall_winner(&mut self, winner: Option<Player>) {
        self.overall_winner = winner;
    }

    /// Formats the meta-board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for meta_row in 0..3 {
            for row in 0..3 {
                let line = (0..3)
                    .map(|meta_col| self.boards[meta_row * 3 + meta_col].display_row(row))
                    .collect::<Vec<_>>()
                    .join(" | ");
                result.push_str(&line);
                result.push('\n');
            }
            if meta_row < 2 {
                result.push_str("----+-----+----\n");
            }
        }
        result
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The meta-board.
    pub(crate) board: MetaBoard,
    /// Current player to move.
    pub(crate) current_player: Player,
    /// Sub-board the next move is restricted to, if any.
    pub(crate) active_constraint: Option<Position>,
}

impl GameState {
    /// Creates a fresh game: empty board, X to move, free choice.
    pub fn new() -> Self {
        Self {
            board: MetaBoard::new(),
            current_player: Player::X,
            active_constraint: None,
        }
    }

    /// Returns the meta-board.
    pub fn board(&self) -> &MetaBoard {
        &self.board
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the active constraint.
    pub fn active_constraint(&self) -> Option<Position> {
        self.active_constraint
    }

    /// Returns the cell at the given target.
    pub fn cell(&self, target: Target) -> Cell {
        self.board.get(target.board).get(target.cell)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
