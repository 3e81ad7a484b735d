//! Key-value store seam for the scoreboard.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::db::StoreError;

/// A string key-value store holding the persisted scores.
///
/// Values are opaque strings; parsing is the caller's concern.
pub trait ScoreStore {
    /// Reads the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes several entries. Backends that support it do so atomically.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the raw entries.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    #[instrument(skip(self))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing in-memory score entry");
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        (**self).set_all(entries)
    }
}
