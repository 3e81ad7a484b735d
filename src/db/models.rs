//! Database models for the score table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// One persisted score entry.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct ScoreEntry {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable score entry; `updated_at` is filled by the database.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScoreEntry {
    key: String,
    value: String,
}
