//! Persistence layer for the scoreboard.

mod error;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;
mod store;

pub use error::StoreError;
pub use models::{NewScoreEntry, ScoreEntry};
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, ScoreStore};
