//! Rule variants for behaviors the classic desktop game leaves loose.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// What happens when a move sends the opponent to a full, undecided sub-board.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FullBoardPolicy {
    /// The full board still becomes the constraint and offers no legal cells.
    #[default]
    KeepActive,
    /// A full board frees the opponent's choice, like a decided one.
    Release,
}

/// How a restored snapshot treats the overall winner, which is never saved.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadPolicy {
    /// Leave the overall winner unset; an already-won game keeps accepting
    /// moves until another line completes.
    #[default]
    Trust,
    /// Re-derive the overall winner from the restored sub-board winners.
    Recompute,
}

/// Rule variants for a [`GameEngine`](crate::GameEngine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct RulesConfig {
    /// Constraint behavior for full, undecided sub-boards.
    pub full_board_policy: FullBoardPolicy,
    /// Overall-winner behavior after a restore.
    pub load_policy: LoadPolicy,
}
