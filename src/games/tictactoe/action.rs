//! Move results for tic-tac-toe.
//!
//! Every call to [`GameEngine::apply_move`](super::GameEngine::apply_move)
//! yields a [`MoveResult`]; illegal moves are a value, not an error.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::rules::WinningLine;
use super::{Player, Position};

/// Result of applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Move accepted, game continues with the given player to move.
    Continue(Player),
    /// Move accepted and completed `line` for `winner`.
    Win {
        /// The player who just moved.
        winner: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// Move accepted and filled the board with no winner.
    Draw,
    /// Move ignored; the game state is unchanged.
    Rejected(MoveRejection),
}

impl MoveResult {
    /// Returns the scoring outcome if this move ended the game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            MoveResult::Win { winner, .. } => Some(Outcome::Winner(*winner)),
            MoveResult::Draw => Some(Outcome::Draw),
            MoveResult::Continue(_) | MoveResult::Rejected(_) => None,
        }
    }

    /// Returns true if the move was ignored.
    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveResult::Rejected(_))
    }
}

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MoveRejection {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The index does not name a square.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),
}
