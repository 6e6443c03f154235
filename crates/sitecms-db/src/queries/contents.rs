//! Content (article) database queries.

use chrono::Utc;
use rusqlite::Connection;
use sitecms_common::{AdminId, ContentId, Error, Result};

use super::{require, write_error};
use crate::models::Content;

const CONTENT_COLUMNS: &str = "id, title, body, created_by, created_at";

/// Create a new article authored by `created_by`.
///
/// # Returns
///
/// * `Ok(Content)` - The created article
/// * `Err(Error::Validation)` - If title or body is empty
/// * `Err(Error::Conflict)` - If `created_by` does not reference an admin
/// * `Err(Error::Database)` - On any other database failure
pub fn insert(conn: &Connection, title: &str, body: &str, created_by: AdminId) -> Result<Content> {
    require("title", title)?;
    require("body", body)?;

    let id = ContentId::new();
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO contents (id, title, body, created_by, created_at)
         VALUES (:id, :title, :body, :created_by, :created_at)",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":title": title,
            ":body": body,
            ":created_by": created_by.to_string(),
            ":created_at": created_at.to_rfc3339(),
        },
    )
    .map_err(|e| write_error(e, || format!("Admin {created_by} does not exist")))?;

    Ok(Content {
        id,
        title: title.to_string(),
        body: body.to_string(),
        created_by,
        created_at,
    })
}

/// Create an article whose author is looked up by username in the same
/// statement.
///
/// Nothing is written when no admin has this username, or when that admin
/// already has an article with the same title, which makes repeated seeding
/// harmless.
///
/// # Returns
///
/// * `Ok(true)` - The article was created
/// * `Ok(false)` - Unknown author or duplicate title; nothing changed
pub fn insert_by_author(conn: &Connection, title: &str, body: &str, username: &str) -> Result<bool> {
    require("title", title)?;
    require("body", body)?;

    let rows_affected = conn
        .execute(
            "INSERT INTO contents (id, title, body, created_by, created_at)
             SELECT :id, :title, :body, a.id, :created_at
             FROM admins a
             WHERE a.username = :username
               AND NOT EXISTS (
                   SELECT 1 FROM contents c WHERE c.created_by = a.id AND c.title = :title
               )",
            rusqlite::named_params! {
                ":id": ContentId::new().to_string(),
                ":title": title,
                ":body": body,
                ":created_at": Utc::now().to_rfc3339(),
                ":username": username,
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// List all articles, oldest first.
pub fn find_all(conn: &Connection) -> Result<Vec<Content>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents ORDER BY created_at ASC, title ASC"
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let contents = stmt
        .query_map([], Content::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(contents)
}

/// List the articles written by one admin, oldest first.
pub fn find_by_author(conn: &Connection, created_by: AdminId) -> Result<Vec<Content>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE created_by = :created_by
             ORDER BY created_at ASC, title ASC"
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let contents = stmt
        .query_map(
            rusqlite::named_params! { ":created_by": created_by.to_string() },
            Content::from_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(contents)
}

/// Get an article by ID.
pub fn find_by_id(conn: &Connection, id: ContentId) -> Result<Option<Content>> {
    let result = conn.query_row(
        &format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE id = :id"),
        rusqlite::named_params! { ":id": id.to_string() },
        Content::from_row,
    );

    match result {
        Ok(content) => Ok(Some(content)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Replace an article's title and body.
///
/// Returns `Ok(false)` without error when no article has this ID.
pub fn modify(conn: &Connection, id: ContentId, title: &str, body: &str) -> Result<bool> {
    require("title", title)?;
    require("body", body)?;

    let rows_affected = conn
        .execute(
            "UPDATE contents SET title = :title, body = :body WHERE id = :id",
            rusqlite::named_params! {
                ":id": id.to_string(),
                ":title": title,
                ":body": body,
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// Delete an article. Returns `Ok(false)` when no article has this ID.
pub fn destroy(conn: &Connection, id: ContentId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM contents WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
