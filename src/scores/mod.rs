//! Persistent win/draw scoreboard.

mod record;
mod tracker;

pub use record::{ScoreKey, ScoreRecord, parse_count};
pub use tracker::ScoreTracker;
