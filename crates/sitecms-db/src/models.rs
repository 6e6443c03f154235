//! Rust models matching the database schema.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row` whose columns follow the order of the matching
//! `*_COLUMNS` constant in the query module.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use serde::{Deserialize, Serialize};
use sitecms_common::{AdminId, ContentId};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    Uuid::parse_str(&s)
        .map(T::from)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse an RFC 3339 timestamp from a text column.
fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// Administrator account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    /// bcrypt hash; never the plaintext password.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            created_at: parse_timestamp(row, 3)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Article shown on the site, authored by an admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub id: ContentId,
    pub title: String,
    pub body: String,
    pub created_by: AdminId,
    pub created_at: DateTime<Utc>,
}

impl Content {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            created_by: parse_id(row, 3)?,
            created_at: parse_timestamp(row, 4)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Game shown in the gallery, keyed by its label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub label: String,
    pub name: String,
    pub description: String,
    pub image_main: String,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
}

impl Game {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            label: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            image_main: row.get(3)?,
            image_1: row.get(4)?,
            image_2: row.get(5)?,
            image_3: row.get(6)?,
        })
    }

    /// All images that are set, main image first.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image_main.as_str()).chain(
            [&self.image_1, &self.image_2, &self.image_3]
                .into_iter()
                .filter_map(|i| i.as_deref()),
        )
    }
}
