//! Cumulative scoreboard backed by a [`ScoreStore`].

use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

use crate::db::{ScoreStore, StoreError};
use crate::games::tictactoe::Outcome;
use crate::scores::{ScoreKey, ScoreRecord, parse_count};

/// Keeps the win/draw tally and writes it through to the store.
///
/// The in-memory [`ScoreRecord`] is a cache of the store; every mutation
/// writes all three counters back before returning.
#[derive(Debug)]
pub struct ScoreTracker<S> {
    store: S,
    record: ScoreRecord,
}

impl<S: ScoreStore> ScoreTracker<S> {
    /// Creates a tracker and loads the persisted tally from `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        let mut tracker = Self {
            store,
            record: ScoreRecord::default(),
        };
        tracker.load();
        tracker
    }

    /// Reloads the tally from the store.
    ///
    /// Never fails: missing or malformed entries read as 0, and read errors
    /// are logged and treated as missing.
    #[instrument(skip(self))]
    pub fn load(&mut self) -> ScoreRecord {
        let mut record = ScoreRecord::default();
        for key in ScoreKey::iter() {
            let raw = match self.store.get(key.as_key()) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(key = key.as_key(), error = %e, "Failed to read score, using 0");
                    None
                }
            };
            record.set(key, parse_count(raw.as_deref()));
        }

        info!(%record, "Scores loaded");
        self.record = record;
        record
    }

    /// Counts a finished game and persists the new tally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails. The in-memory tally keeps
    /// the increment either way.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) -> Result<ScoreRecord, StoreError> {
        self.record.increment(outcome);
        self.persist()?;
        info!(%outcome, record = %self.record, "Score recorded");
        Ok(self.record)
    }

    /// Zeroes every counter and persists the result.
    ///
    /// Callers are expected to have confirmed this with the user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) -> Result<ScoreRecord, StoreError> {
        self.record = ScoreRecord::default();
        self.persist()?;
        info!("Scores reset");
        Ok(self.record)
    }

    /// Returns the current tally.
    pub fn scores(&self) -> &ScoreRecord {
        &self.record
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let entries: Vec<(&str, String)> = ScoreKey::iter()
            .map(|key| (key.as_key(), self.record.get(key).to_string()))
            .collect();
        self.store.set_all(&entries)
    }
}
