//! SQLite-backed score store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{NewScoreEntry, ScoreEntry, ScoreStore, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Score store persisted in an SQLite database file.
///
/// Opens a fresh connection per operation, so `":memory:"` does not keep
/// anything between calls; use [`MemoryStore`](crate::MemoryStore) for that.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };

        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Failed to run migrations: {}", e)))?;

        info!(path = %store.db_path, migrations = applied.len(), "Score store opened");
        Ok(store)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Lists every stored entry ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entries(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut conn = self.connection()?;

        let entries = schema::scores::table
            .order(schema::scores::key.asc())
            .select(ScoreEntry::as_select())
            .load(&mut conn)?;

        debug!(count = entries.len(), "Score entries loaded");
        Ok(entries)
    }
}

impl ScoreStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;

        let value = schema::scores::table
            .find(key)
            .select(schema::scores::value)
            .first::<String>(&mut conn)
            .optional()?;

        debug!(found = value.is_some(), "Score entry read");
        Ok(value)
    }

    #[instrument(skip(self))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        diesel::replace_into(schema::scores::table)
            .values(&NewScoreEntry::new(key.to_string(), value.to_string()))
            .execute(&mut conn)?;

        debug!("Score entry written");
        Ok(())
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for (key, value) in entries {
                diesel::replace_into(schema::scores::table)
                    .values(&NewScoreEntry::new(key.to_string(), value.clone()))
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!("Score entries written");
        Ok(())
    }
}
