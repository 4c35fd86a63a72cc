//! Persisted form of a game.
//!
//! The layout is the flat save-file object shared with the classic desktop
//! game:
//!
//! ```json
//! {
//!   "currentPlayer": "X",
//!   "nextBoard": [1, 1],
//!   "boards": [[["", "X", ""], ["", "", ""], ["", "", ""]], ...],
//!   "winners": [[null, "O", null], [null, null, null], [null, null, null]]
//! }
//! ```
//!
//! `boards` holds the nine sub-boards in row-major order (`row * 3 + col`).
//! The overall winner is not part of the snapshot.

use super::{Cell, GameState, MetaBoard, Player, Position, SubBoard};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A cell mark as stored on disk: `""`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedCell {
    /// Empty cell.
    #[default]
    #[serde(rename = "")]
    Empty,
    /// Cell marked by X.
    X,
    /// Cell marked by O.
    O,
}

impl From<Cell> for SavedCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => SavedCell::Empty,
            Cell::Occupied(Player::X) => SavedCell::X,
            Cell::Occupied(Player::O) => SavedCell::O,
        }
    }
}

impl From<SavedCell> for Cell {
    fn from(cell: SavedCell) -> Self {
        match cell {
            SavedCell::Empty => Cell::Empty,
            SavedCell::X => Cell::Occupied(Player::X),
            SavedCell::O => Cell::Occupied(Player::O),
        }
    }
}

/// Structural snapshot of a game: cells, sub-board winners, turn and
/// constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Player to move.
    pub current_player: Player,
    /// Active constraint as `[row, col]`, or `null` for free choice.
    pub next_board: Option<[usize; 2]>,
    /// Cell marks per sub-board, indexed `[board][row][col]`.
    pub boards: [[[SavedCell; 3]; 3]; 9],
    /// Sub-board winners, indexed `[row][col]`.
    pub winners: [[Option<Player>; 3]; 3],
}

/// A snapshot that parses but does not describe a playable state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    /// `nextBoard` has a coordinate outside `0..3`.
    #[display("nextBoard [{}, {}] is out of range", row, col)]
    NextBoardOutOfRange {
        /// Stored row.
        row: usize,
        /// Stored column.
        col: usize,
    },
    /// `nextBoard` names a sub-board that already has a winner.
    #[display("nextBoard {} names a decided board", _0)]
    NextBoardDecided(#[error(not(source))] Position),
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        let boards = std::array::from_fn(|board| {
            let sub_board = &state.board().boards()[board];
            std::array::from_fn(|row| {
                std::array::from_fn(|col| SavedCell::from(sub_board.cells()[row * 3 + col]))
            })
        });
        let winners = std::array::from_fn(|row| {
            std::array::from_fn(|col| state.board().boards()[row * 3 + col].winner())
        });

        Self {
            current_player: state.current_player(),
            next_board: state.active_constraint().map(|pos| [pos.row(), pos.col()]),
            boards,
            winners,
        }
    }
}

impl GameState {
    /// Produces the persisted form of this state.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Rebuilds a state from a snapshot.
    ///
    /// Cells and winners are taken as stored. The overall winner is not
    /// derived.
    ///
    /// # Errors
    ///
    /// Fails if `nextBoard` is out of range or names a decided sub-board.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let boards: [SubBoard; 9] = std::array::from_fn(|board| {
            let cells = std::array::from_fn(|i| Cell::from(snapshot.boards[board][i / 3][i % 3]));
            SubBoard::from_parts(cells, snapshot.winners[board / 3][board % 3])
        });

        let active_constraint = match snapshot.next_board {
            None => None,
            Some([row, col]) => {
                let pos = Position::from_row_col(row, col).ok_or_else(|| {
                    warn!(row, col, "Snapshot constraint out of range");
                    SnapshotError::NextBoardOutOfRange { row, col }
                })?;
                if boards[pos.to_index()].is_decided() {
                    warn!(board = %pos, "Snapshot constraint names a decided board");
                    return Err(SnapshotError::NextBoardDecided(pos));
                }
                Some(pos)
            }
        };

        Ok(Self {
            board: MetaBoard::from_boards(boards),
            current_player: snapshot.current_player,
            active_constraint,
        })
    }
}
