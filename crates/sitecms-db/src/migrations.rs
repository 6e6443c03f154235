//! Embedded SQL migrations and runner.
//!
//! The schema definition in `database/schema.sql` is embedded as V1. A
//! `schema_migrations` table tracks which versions have been applied.

use rusqlite::Connection;
use sitecms_common::{Error, Result};

/// The bundled schema definition, also used by the seed routine when no
/// external schema file is configured.
pub const SCHEMA_SQL: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../database/schema.sql"
));

const MIGRATIONS: &[(i64, &str, &str)] = &[(1, "initial", SCHEMA_SQL)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    let mut applied = 0;
    for &(version, name, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            rusqlite::params![version, name],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::debug!(version, name, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}

/// Get the current schema version without applying migrations.
pub fn current_version(conn: &Connection) -> Result<i64> {
    let tracked: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_migrations'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if !tracked {
        return Ok(0);
    }

    let version: Option<i64> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(version.unwrap_or(0))
}

/// Get the latest available migration version.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|&(v, _, _)| v).unwrap_or(0)
}
