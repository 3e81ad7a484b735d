//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The engine composes them
//! after every accepted move.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, WinningLine};
