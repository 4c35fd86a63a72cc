//! Game rules for ultimate tic-tac-toe.
//!
//! Pure functions over board contents. The same line evaluation decides
//! a sub-board (over its cells) and the game (over the sub-board winners).

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};
