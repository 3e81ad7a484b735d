//! Tally Toe - two-player tic-tac-toe with a persistent scoreboard.
//!
//! # Architecture
//!
//! - **Games**: the tic-tac-toe engine ([`GameEngine`]), a pure state machine
//!   that applies moves and detects wins and draws
//! - **Scores**: [`ScoreTracker`] keeps the win/draw tally and writes it
//!   through to a [`ScoreStore`]
//! - **Db**: store backends, in memory ([`MemoryStore`]) or SQLite
//!   ([`SqliteStore`])
//! - **Tui**: the terminal front-end, including the confetti burst
//!
//! # Example
//!
//! ```
//! use tally_toe::{GameEngine, MemoryStore, MoveResult, Player, ScoreRecord, ScoreTracker};
//!
//! let mut engine = GameEngine::new();
//! let mut tracker = ScoreTracker::new(MemoryStore::new());
//!
//! let mut last = MoveResult::Continue(Player::X);
//! for index in [0, 4, 1, 5, 2] {
//!     last = engine.apply_move(index);
//! }
//!
//! let outcome = last.outcome().expect("top row wins");
//! let record = tracker.record(outcome)?;
//! assert_eq!(record, ScoreRecord::new(1, 0, 0));
//! # Ok::<(), tally_toe::StoreError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod scores;
mod tui;

// Crate-level exports - Settings
pub use config::{ConfigError, DB_PATH_ENV, Settings};

// Crate-level exports - Persistence
pub use db::{MemoryStore, NewScoreEntry, ScoreEntry, ScoreStore, SqliteStore, StoreError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameEngine, GameState, GameStatus, MoveRejection, MoveResult, Outcome, Player, Position,
    Square, WinningLine, rules,
};

// Crate-level exports - Scoreboard
pub use scores::{ScoreKey, ScoreRecord, ScoreTracker, parse_count};

// Crate-level exports - Terminal UI
pub use tui::{App, BURST_LENGTH, Confetti, Confirmation, PARTICLE_COUNT, Particle, run_tui};
