//! Two-player tic-tac-toe.

mod action;
mod engine;
mod outcome;
mod position;
pub mod rules;
mod types;

pub use action::{MoveRejection, MoveResult};
pub use engine::GameEngine;
pub use outcome::Outcome;
pub use position::Position;
pub use rules::WinningLine;
pub use types::{Board, GameState, GameStatus, Player, Square};
